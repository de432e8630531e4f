//! Script validation command handler.

use super::setup;
use crate::cli::AnalyzerChoice;
use beatline::{BeatlineResult, ScriptValidator};
use std::path::Path;

/// Validate a script and print every finding.
///
/// Returns `Ok(false)` when at least one finding is an error.
pub fn validate_script(
    path: &Path,
    characters: &[String],
    analyzer: Option<AnalyzerChoice>,
    config_path: Option<&Path>,
) -> BeatlineResult<bool> {
    let config = setup::load_config(config_path)?;
    let script = setup::load_script(path)?;
    let registry = setup::analyzers(&config);

    let known: Vec<String> = if characters.is_empty() {
        script
            .characters()
            .iter()
            .map(|character| character.name().clone())
            .collect()
    } else {
        characters.to_vec()
    };

    let default = setup::default_analyzer(analyzer, &config).and_then(|name| registry.get(&name));
    let mut validator = ScriptValidator::new()
        .with_characters(known)
        .with_analyzers(&registry);
    if let Some(default) = &default {
        validator = validator.with_default_analyzer(default.as_ref());
    }

    let findings = validator.validate(Some(&script));
    for finding in &findings {
        println!("{}", finding);
    }

    let errors = findings.iter().filter(|finding| finding.is_error()).count();
    println!(
        "{}: {} clip(s), {} error(s), {} warning(s)",
        path.display(),
        script.len(),
        errors,
        findings.len() - errors
    );
    Ok(errors == 0)
}
