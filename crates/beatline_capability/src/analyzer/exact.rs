//! Whole-input matching.

use async_trait::async_trait;
use beatline_core::AnalysisContext;
use beatline_error::BeatlineResult;
use beatline_interface::Analyzer;
use tracing::{debug, instrument};

/// Matches when the trimmed input equals an answer, ignoring case.
///
/// Handles every context kind. Useful for debugging scripts and for
/// point-and-click input, where the provider returns the answer label.
///
/// # Examples
///
/// ```
/// use beatline_capability::ExactMatchAnalyzer;
/// use beatline_core::{AnalysisContext, BasicContext};
/// use beatline_interface::Analyzer;
///
/// # #[tokio::main]
/// # async fn main() {
/// let ctx = AnalysisContext::Basic(BasicContext::new(" yes ", vec!["No".into(), "Yes".into()]));
/// let index = ExactMatchAnalyzer.analyze(&ctx).await.unwrap();
/// assert_eq!(index, Some(1));
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchAnalyzer;

impl ExactMatchAnalyzer {
    /// Registry name.
    pub const NAME: &'static str = "exact";
}

#[async_trait]
impl Analyzer for ExactMatchAnalyzer {
    #[instrument(skip(self, context), fields(answers = context.answers().len()))]
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>> {
        let input = context.user_input().trim().to_lowercase();
        let matched = context
            .answers()
            .iter()
            .position(|answer| answer.trim().to_lowercase() == input);
        debug!(?matched, "Exact match finished");
        Ok(matched)
    }

    fn can_handle(&self, _context: &AnalysisContext) -> bool {
        true
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
