//! Clip variants: the atomic executable narrative beats.

use crate::{AnalysisContext, BasicContext, ClipTarget, PerformanceData, QuizContext};
use beatline_error::{ScriptError, ScriptErrorKind};
use std::time::Duration;

/// Default UI for interactive clips.
pub const DEFAULT_CHOICE_UI: &str = "ChoiceClipUI";

/// Fields shared by every clip variant.
///
/// # Examples
///
/// ```
/// use beatline_core::{ClipHeader, PerformanceData};
/// use std::time::Duration;
///
/// let header = ClipHeader::new("intro")
///     .with_duration_secs(2.5)
///     .with_performance(PerformanceData::new("Ada").speaking("Hi."));
/// assert_eq!(header.nominal_duration(), Duration::from_millis(2500));
/// assert_eq!(header.performances().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ClipHeader {
    /// Clip name, unique by convention
    name: String,
    /// Camera index; -1 leaves the camera alone
    camera: i32,
    /// Pause after the clip body completes, in seconds
    end_delay_secs: f32,
    /// Nominal clip length in seconds; performances may run longer
    duration_secs: f32,
    /// Ordered character performances
    performances: Vec<PerformanceData>,
    /// Registered analyzer name that overrides the conductor default
    analyzer: Option<String>,
}

impl ClipHeader {
    /// Create a header with no performances and zero durations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: -1,
            end_delay_secs: 0.0,
            duration_secs: 0.0,
            performances: Vec::new(),
            analyzer: None,
        }
    }

    /// Builder method to set the camera index.
    pub fn with_camera(mut self, camera: i32) -> Self {
        self.camera = camera;
        self
    }

    /// Builder method to set the end delay.
    pub fn with_end_delay_secs(mut self, secs: f32) -> Self {
        self.end_delay_secs = secs;
        self
    }

    /// Builder method to set the nominal duration.
    pub fn with_duration_secs(mut self, secs: f32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Builder method to append one performance.
    pub fn with_performance(mut self, performance: PerformanceData) -> Self {
        self.performances.push(performance);
        self
    }

    /// Builder method to replace all performances.
    pub fn with_performances(mut self, performances: Vec<PerformanceData>) -> Self {
        self.performances = performances;
        self
    }

    /// Builder method to set the analyzer override.
    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Nominal duration as a [`Duration`]. Negative or non-finite values count as zero.
    pub fn nominal_duration(&self) -> Duration {
        seconds(self.duration_secs)
    }

    /// End delay as a [`Duration`]. Negative or non-finite values count as zero.
    pub fn end_delay(&self) -> Duration {
        seconds(self.end_delay_secs)
    }
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

/// Plays its performances, waits, then moves to a fixed next clip.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct LinearClip {
    /// Shared clip fields
    header: ClipHeader,
    /// Statically configured next clip
    next_clip: ClipTarget,
}

impl LinearClip {
    /// Create a linear clip.
    pub fn new(header: ClipHeader, next_clip: ClipTarget) -> Self {
        Self { header, next_clip }
    }
}

/// Asks a question and branches on which answer the analyzer matched.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ChoiceClip {
    /// Shared clip fields
    header: ClipHeader,
    /// Name of the interactive UI to request from the host
    ui_name: String,
    /// Question text shown to the user
    question: String,
    /// Candidate answers
    answers: Vec<String>,
    /// Next clip per answer, same length as `answers`
    next_clips: Vec<ClipTarget>,
}

impl ChoiceClip {
    /// Create a choice clip.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::BranchCountMismatch`] when `next_clips`
    /// and `answers` differ in length.
    pub fn new(
        header: ClipHeader,
        question: impl Into<String>,
        answers: Vec<String>,
        next_clips: Vec<ClipTarget>,
    ) -> Result<Self, ScriptError> {
        if answers.len() != next_clips.len() {
            return Err(ScriptError::new(ScriptErrorKind::BranchCountMismatch {
                clip: header.name.clone(),
                answers: answers.len(),
                next_clips: next_clips.len(),
            }));
        }
        Ok(Self {
            header,
            ui_name: DEFAULT_CHOICE_UI.to_string(),
            question: question.into(),
            answers,
            next_clips,
        })
    }

    /// Builder method to pick a different UI.
    pub fn with_ui_name(mut self, ui_name: impl Into<String>) -> Self {
        self.ui_name = ui_name.into();
        self
    }

    /// Context for one answer attempt.
    pub fn analysis_context(&self, user_input: impl Into<String>) -> AnalysisContext {
        AnalysisContext::Basic(BasicContext::new(user_input, self.answers.clone()))
    }

    /// Branch target for a matched answer.
    pub fn target_for(&self, answer: usize) -> Option<ClipTarget> {
        self.next_clips.get(answer).copied()
    }
}

/// A choice with a correct answer and per-answer feedback.
///
/// Branching still follows `next_clips`; correctness only decides which
/// feedback is shown.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct QuizClip {
    /// The underlying choice
    choice: ChoiceClip,
    /// Feedback per answer, same length as the answers
    feedback: Vec<String>,
    /// Index of the correct answer
    correct_answer: Option<usize>,
}

impl QuizClip {
    /// Create a quiz clip.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::FeedbackCountMismatch`] when `feedback`
    /// and the choice's answers differ in length.
    pub fn new(
        choice: ChoiceClip,
        feedback: Vec<String>,
        correct_answer: Option<usize>,
    ) -> Result<Self, ScriptError> {
        if feedback.len() != choice.answers.len() {
            return Err(ScriptError::new(ScriptErrorKind::FeedbackCountMismatch {
                clip: choice.header.name.clone(),
                answers: choice.answers.len(),
                feedback: feedback.len(),
            }));
        }
        Ok(Self {
            choice,
            feedback,
            correct_answer,
        })
    }

    /// Context for one answer attempt.
    pub fn analysis_context(&self, user_input: impl Into<String>) -> AnalysisContext {
        AnalysisContext::Quiz(QuizContext::new(
            BasicContext::new(user_input, self.choice.answers.clone()),
            self.correct_answer,
            self.feedback.clone(),
        ))
    }

    /// Whether `answer` is the correct one.
    pub fn is_correct(&self, answer: usize) -> bool {
        self.correct_answer == Some(answer)
    }
}

/// Clip variant discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ClipKind {
    /// [`LinearClip`]
    #[display("LinearClip")]
    Linear,
    /// [`ChoiceClip`]
    #[display("ChoiceClip")]
    Choice,
    /// [`QuizClip`]
    #[display("QuizClip")]
    Quiz,
}

/// One node of a script graph.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Clip {
    /// Fixed successor
    Linear(LinearClip),
    /// Branch on the matched answer
    Choice(ChoiceClip),
    /// Branch on the matched answer, with correctness feedback
    Quiz(QuizClip),
}

impl Clip {
    /// Shared clip fields.
    pub fn header(&self) -> &ClipHeader {
        match self {
            Self::Linear(clip) => &clip.header,
            Self::Choice(clip) => &clip.header,
            Self::Quiz(clip) => &clip.choice.header,
        }
    }

    /// Clip name.
    pub fn name(&self) -> &str {
        &self.header().name
    }

    /// Variant discriminator.
    pub fn kind(&self) -> ClipKind {
        match self {
            Self::Linear(_) => ClipKind::Linear,
            Self::Choice(_) => ClipKind::Choice,
            Self::Quiz(_) => ClipKind::Quiz,
        }
    }

    /// Every branch target this clip declares, in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use beatline_core::{Clip, ClipHeader, LinearClip};
    ///
    /// let clip = Clip::from(LinearClip::new(ClipHeader::new("a"), 4));
    /// assert_eq!(clip.targets(), vec![4]);
    /// ```
    pub fn targets(&self) -> Vec<ClipTarget> {
        match self {
            Self::Linear(clip) => vec![clip.next_clip],
            Self::Choice(clip) => clip.next_clips.clone(),
            Self::Quiz(clip) => clip.choice.next_clips.clone(),
        }
    }

    /// The context this clip would hand an analyzer, with empty input.
    ///
    /// Used by compatibility checks before anything runs.
    pub fn validation_context(&self) -> AnalysisContext {
        match self {
            Self::Linear(_) => AnalysisContext::Basic(BasicContext::default()),
            Self::Choice(clip) => clip.analysis_context(String::new()),
            Self::Quiz(clip) => clip.analysis_context(String::new()),
        }
    }
}
