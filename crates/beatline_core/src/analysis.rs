//! Analysis contexts handed from clips to analyzers.
//!
//! A context is created for every answer-collection attempt and dropped
//! once the analyzer answers. Clips also build an empty context at
//! validation time so the validator can ask an analyzer whether it
//! understands the clip's context kind.

/// The kinds of context a clip can produce.
///
/// # Examples
///
/// ```
/// use beatline_core::AnalysisContextKind;
///
/// assert_eq!(AnalysisContextKind::Quiz.to_string(), "QuizAnalysisContext");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AnalysisContextKind {
    /// User input plus candidate answers
    #[display("AnalysisContext")]
    Basic,
    /// Basic context plus the correct answer and per-answer feedback
    #[display("QuizAnalysisContext")]
    Quiz,
}

/// User input together with the candidate answers.
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_getters::Getters)]
pub struct BasicContext {
    /// Text obtained from the input provider
    user_input: String,
    /// Candidate answers, in branch order
    answers: Vec<String>,
}

impl BasicContext {
    /// Create a basic context.
    pub fn new(user_input: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            user_input: user_input.into(),
            answers,
        }
    }
}

/// Quiz context: the basic data plus what the author considers correct.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct QuizContext {
    /// Input and answers
    basic: BasicContext,
    /// Index of the correct answer, if the author set one
    correct_answer: Option<usize>,
    /// Feedback text per answer
    feedback: Vec<String>,
}

impl QuizContext {
    /// Create a quiz context.
    pub fn new(basic: BasicContext, correct_answer: Option<usize>, feedback: Vec<String>) -> Self {
        Self {
            basic,
            correct_answer,
            feedback,
        }
    }
}

/// The context an analyzer classifies.
///
/// # Examples
///
/// ```
/// use beatline_core::{AnalysisContext, AnalysisContextKind, BasicContext};
///
/// let ctx = AnalysisContext::Basic(BasicContext::new("b", vec!["A".into(), "B".into()]));
/// assert_eq!(ctx.kind(), AnalysisContextKind::Basic);
/// assert_eq!(ctx.answers().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisContext {
    /// Produced by linear and choice clips
    Basic(BasicContext),
    /// Produced by quiz clips
    Quiz(QuizContext),
}

impl AnalysisContext {
    /// The context kind, used by compatibility checks.
    pub fn kind(&self) -> AnalysisContextKind {
        match self {
            Self::Basic(_) => AnalysisContextKind::Basic,
            Self::Quiz(_) => AnalysisContextKind::Quiz,
        }
    }

    fn basic(&self) -> &BasicContext {
        match self {
            Self::Basic(basic) => basic,
            Self::Quiz(quiz) => &quiz.basic,
        }
    }

    /// The user's input text.
    pub fn user_input(&self) -> &str {
        &self.basic().user_input
    }

    /// The candidate answers.
    pub fn answers(&self) -> &[String] {
        &self.basic().answers
    }

    /// Quiz details, when this is a quiz context.
    pub fn as_quiz(&self) -> Option<&QuizContext> {
        match self {
            Self::Quiz(quiz) => Some(quiz),
            Self::Basic(_) => None,
        }
    }
}
