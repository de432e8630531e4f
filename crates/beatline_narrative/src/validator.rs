//! Static checks over a script graph.

use crate::AnalyzerRegistry;
use beatline_core::{
    Clip, END_OF_SCRIPT, ENTRY_CLIP, ScriptGraph, ValidationResult, ValidationTarget,
};
use beatline_interface::Analyzer;
use std::collections::{HashSet, VecDeque};

/// Checks a script before it is played.
///
/// Four independent checks run and every finding is returned: empty
/// slots, reachability from the entry clip, character coverage, and
/// analyzer compatibility. Only a missing graph short-circuits.
///
/// # Examples
///
/// ```
/// use beatline_capability::KeywordMatchAnalyzer;
/// use beatline_core::{Clip, ClipHeader, LinearClip, ScriptGraph};
/// use beatline_narrative::ScriptValidator;
///
/// let script = ScriptGraph::from_clips(vec![
///     Clip::from(LinearClip::new(ClipHeader::new("a"), 1)),
///     Clip::from(LinearClip::new(ClipHeader::new("b"), -1)),
/// ]);
/// let findings = ScriptValidator::new()
///     .with_default_analyzer(&KeywordMatchAnalyzer)
///     .validate(Some(&script));
/// assert!(findings.is_empty());
///
/// // Without an analyzer every clip is flagged.
/// assert_eq!(ScriptValidator::new().validate(Some(&script)).len(), 2);
/// ```
#[derive(Default)]
pub struct ScriptValidator<'a> {
    characters: HashSet<String>,
    analyzers: Option<&'a AnalyzerRegistry>,
    default_analyzer: Option<&'a dyn Analyzer>,
}

impl<'a> ScriptValidator<'a> {
    /// A validator with no characters and no analyzers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the names that have runtime controllers.
    pub fn with_characters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.characters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the registry overrides are looked up in.
    pub fn with_analyzers(mut self, analyzers: &'a AnalyzerRegistry) -> Self {
        self.analyzers = Some(analyzers);
        self
    }

    /// Builder method to set the analyzer used when a clip names none.
    pub fn with_default_analyzer(mut self, analyzer: &'a dyn Analyzer) -> Self {
        self.default_analyzer = Some(analyzer);
        self
    }

    /// Run every check over `script`.
    #[tracing::instrument(skip_all, fields(clips = script.map(ScriptGraph::len)))]
    pub fn validate(&self, script: Option<&ScriptGraph>) -> Vec<ValidationResult> {
        let Some(script) = script else {
            return vec![ValidationResult::error(
                "No script graph to validate",
                Some(ValidationTarget::Script),
            )];
        };

        let mut findings = Vec::new();
        findings.extend(check_slots(script));
        findings.extend(check_reachability(script));
        findings.extend(self.check_characters(script));
        findings.extend(self.check_analyzers(script));

        let errors = findings.iter().filter(|f| f.is_error()).count();
        tracing::debug!(
            errors,
            warnings = findings.len() - errors,
            "Validation complete"
        );
        findings
    }

    fn check_characters(&self, script: &ScriptGraph) -> Vec<ValidationResult> {
        script
            .characters()
            .iter()
            .filter(|character| !self.characters.contains(character.name()))
            .map(|character| {
                ValidationResult::error(
                    format!(
                        "Character '{}' has no registered controller",
                        character.name()
                    ),
                    Some(ValidationTarget::Character(character.name().clone())),
                )
            })
            .collect()
    }

    fn check_analyzers(&self, script: &ScriptGraph) -> Vec<ValidationResult> {
        let mut findings = Vec::new();

        for (index, slot) in script.slots().iter().enumerate() {
            let Some(clip) = slot else { continue };
            let target = Some(ValidationTarget::Clip(index));

            let analyzer = match clip.header().analyzer() {
                Some(name) => match self.analyzers.and_then(|registry| registry.get(name)) {
                    Some(analyzer) => analyzer,
                    None => {
                        findings.push(ValidationResult::error(
                            format!(
                                "Clip {} '{}' names unregistered analyzer '{}'",
                                index,
                                clip.name(),
                                name
                            ),
                            target,
                        ));
                        continue;
                    }
                },
                None => match self.default_analyzer {
                    Some(analyzer) => {
                        findings.extend(compatibility(index, clip, analyzer));
                        continue;
                    }
                    None => {
                        findings.push(ValidationResult::error(
                            format!("Clip {} '{}' has no analyzer", index, clip.name()),
                            target,
                        ));
                        continue;
                    }
                },
            };
            findings.extend(compatibility(index, clip, analyzer.as_ref()));
        }

        findings
    }
}

fn compatibility(index: usize, clip: &Clip, analyzer: &dyn Analyzer) -> Option<ValidationResult> {
    let context = clip.validation_context();
    if analyzer.can_handle(&context) {
        return None;
    }
    Some(ValidationResult::error(
        format!(
            "Analyzer '{}' cannot handle {} of clip {} '{}'",
            analyzer.name(),
            context.kind(),
            index,
            clip.name()
        ),
        Some(ValidationTarget::Clip(index)),
    ))
}

fn check_slots(script: &ScriptGraph) -> Vec<ValidationResult> {
    script
        .slots()
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(index, _)| {
            ValidationResult::error(
                format!("Clip slot {} is empty", index),
                Some(ValidationTarget::Clip(index)),
            )
        })
        .collect()
}

/// Breadth-first walk from the entry clip over declared targets.
fn check_reachability(script: &ScriptGraph) -> Vec<ValidationResult> {
    let mut findings = Vec::new();
    if script.is_empty() {
        return findings;
    }

    let mut reached = vec![false; script.len()];
    let mut queue = VecDeque::from([ENTRY_CLIP]);
    reached[ENTRY_CLIP] = true;

    while let Some(index) = queue.pop_front() {
        let Some(clip) = script.clip(index) else {
            continue;
        };
        for target in clip.targets() {
            if target == END_OF_SCRIPT {
                continue;
            }
            match script.resolve(target) {
                Some(next) => {
                    if !reached[next] {
                        reached[next] = true;
                        queue.push_back(next);
                    }
                }
                None => findings.push(ValidationResult::error(
                    format!(
                        "Clip {} '{}' branches to out-of-bounds index {}",
                        index,
                        clip.name(),
                        target
                    ),
                    Some(ValidationTarget::Clip(index)),
                )),
            }
        }
    }

    for (index, reached) in reached.into_iter().enumerate() {
        if !reached {
            let name = script.clip(index).map_or("<missing>", Clip::name);
            findings.push(ValidationResult::warning(
                format!("Orphan clip {} '{}' is unreachable from the entry clip", index, name),
                Some(ValidationTarget::Clip(index)),
            ));
        }
    }

    findings
}
