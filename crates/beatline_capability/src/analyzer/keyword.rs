//! Substring matching.

use async_trait::async_trait;
use beatline_core::AnalysisContext;
use beatline_error::BeatlineResult;
use beatline_interface::Analyzer;
use tracing::{debug, instrument};

/// Matches the first answer that appears anywhere in the input, ignoring case.
///
/// Blank answers never match. Handles every context kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatchAnalyzer;

impl KeywordMatchAnalyzer {
    /// Registry name.
    pub const NAME: &'static str = "keyword";
}

#[async_trait]
impl Analyzer for KeywordMatchAnalyzer {
    #[instrument(skip(self, context), fields(answers = context.answers().len()))]
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>> {
        let input = context.user_input().to_lowercase();
        let matched = context.answers().iter().position(|answer| {
            let keyword = answer.trim().to_lowercase();
            !keyword.is_empty() && input.contains(&keyword)
        });
        debug!(?matched, "Keyword match finished");
        Ok(matched)
    }

    fn can_handle(&self, _context: &AnalysisContext) -> bool {
        true
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatline_core::{BasicContext, QuizContext};

    fn context(input: &str) -> AnalysisContext {
        AnalysisContext::Basic(BasicContext::new(
            input,
            vec!["left".into(), "".into(), "Right".into()],
        ))
    }

    #[tokio::test]
    async fn test_first_contained_answer_wins() {
        let analyzer = KeywordMatchAnalyzer;
        assert_eq!(
            analyzer.analyze(&context("Go RIGHT, then left")).await.unwrap(),
            Some(0)
        );
        assert_eq!(analyzer.analyze(&context("turn right")).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_blank_answer_never_matches() {
        let analyzer = KeywordMatchAnalyzer;
        assert_eq!(analyzer.analyze(&context("straight on")).await.unwrap(), None);
    }

    #[test]
    fn test_handles_quiz_context() {
        let quiz = AnalysisContext::Quiz(QuizContext::new(
            BasicContext::default(),
            Some(0),
            Vec::new(),
        ));
        assert!(KeywordMatchAnalyzer.can_handle(&quiz));
    }
}
