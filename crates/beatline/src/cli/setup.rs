//! Loading shared by the command handlers.

use crate::cli::AnalyzerChoice;
use beatline::{
    AnalyzerRegistry, BeatlineConfig, BeatlineResult, ChatCompletionAnalyzer, ClipFactoryRegistry,
    ExactMatchAnalyzer, KeywordMatchAnalyzer, ScriptGraph, load_script_file,
};
use std::path::Path;
use std::sync::Arc;

/// Load configuration from `path`, or from the default locations.
pub fn load_config(path: Option<&Path>) -> BeatlineResult<BeatlineConfig> {
    match path {
        Some(path) => BeatlineConfig::from_file(path),
        None => BeatlineConfig::load(),
    }
}

/// Load a script with the built-in clip types.
pub fn load_script(path: &Path) -> BeatlineResult<ScriptGraph> {
    tracing::info!(path = %path.display(), "Loading script");
    let registry = ClipFactoryRegistry::with_builtin()?;
    load_script_file(path, &registry)
}

/// Every bundled analyzer, keyed by name.
pub fn analyzers(config: &BeatlineConfig) -> AnalyzerRegistry {
    AnalyzerRegistry::new()
        .with(Arc::new(ExactMatchAnalyzer))
        .with(Arc::new(KeywordMatchAnalyzer))
        .with(Arc::new(ChatCompletionAnalyzer::new(config.analyzer.clone())))
}

/// The command-line choice wins over the configured default.
pub fn default_analyzer(choice: Option<AnalyzerChoice>, config: &BeatlineConfig) -> Option<String> {
    choice
        .map(|choice| choice.name().to_string())
        .or_else(|| config.playback.default_analyzer().clone())
}
