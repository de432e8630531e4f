//! Validation findings produced for authoring tools.

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationSeverity {
    /// The script will misbehave at runtime
    Error,
    /// Suspicious but playable
    Warning,
}

/// What a finding points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationTarget {
    /// The script as a whole
    Script,
    /// A clip slot
    Clip(usize),
    /// A roster entry
    Character(String),
}

/// One validation finding.
///
/// # Examples
///
/// ```
/// use beatline_core::{ValidationResult, ValidationSeverity, ValidationTarget};
///
/// let finding = ValidationResult::warning("Orphan clip", Some(ValidationTarget::Clip(3)));
/// assert_eq!(*finding.severity(), ValidationSeverity::Warning);
/// assert!(!finding.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ValidationResult {
    /// Severity
    severity: ValidationSeverity,
    /// Human-readable message
    message: String,
    /// Offending node, if any
    target: Option<ValidationTarget>,
}

impl ValidationResult {
    /// An error finding.
    pub fn error(message: impl Into<String>, target: Option<ValidationTarget>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            message: message.into(),
            target,
        }
    }

    /// A warning finding.
    pub fn warning(message: impl Into<String>, target: Option<ValidationTarget>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            message: message.into(),
            target,
        }
    }

    /// True for [`ValidationSeverity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }

    /// The clip index this finding points at, if any.
    pub fn clip_index(&self) -> Option<usize> {
        match self.target {
            Some(ValidationTarget::Clip(index)) => Some(index),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
