use super::{Halt, answer, fail};
use crate::{ConductorEvent, RuntimeContext, StopSignal};
use beatline_core::{ClipTarget, QuizClip};
use beatline_error::PlaybackErrorKind;

pub(super) async fn play(
    clip: &QuizClip,
    context: &RuntimeContext,
    stop: &StopSignal,
) -> Result<ClipTarget, Halt> {
    let choice = clip.choice();
    let ui = context
        .ui()
        .quiz_ui(choice.ui_name())
        .ok_or_else(|| fail(PlaybackErrorKind::UiUnavailable(choice.ui_name().clone())))?;

    answer::present(choice, ui.as_ref(), context, stop).await?;
    let matched = answer::collect(choice, ui.as_ref(), context, stop, |input| {
        clip.analysis_context(input)
    })
    .await?;

    let text = clip
        .feedback()
        .get(matched)
        .map(String::as_str)
        .unwrap_or_default();
    let correct = clip.is_correct(matched);
    if correct {
        ui.show_correct_feedback(matched, text);
    } else {
        ui.show_incorrect_feedback(matched, *clip.correct_answer(), text);
    }
    tracing::info!(answer = matched, correct, "Quiz answer graded");
    context.emit(ConductorEvent::ResponseCorrectness {
        index: *context.clip_index(),
        answer: matched,
        correct,
    });

    stop.wait_until(context.settings().ui_poll_interval(), || !ui.is_animating())
        .await?;
    stop.guard(ui.hide()).await?;

    // Routing follows the matched answer, not its correctness.
    Ok(answer::target(choice, matched))
}
