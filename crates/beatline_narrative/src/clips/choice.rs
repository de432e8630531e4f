use super::{Halt, answer, fail};
use crate::{RuntimeContext, StopSignal};
use beatline_core::{ChoiceClip, ClipTarget};
use beatline_error::PlaybackErrorKind;

pub(super) async fn play(
    clip: &ChoiceClip,
    context: &RuntimeContext,
    stop: &StopSignal,
) -> Result<ClipTarget, Halt> {
    let ui = context
        .ui()
        .interactive_ui(clip.ui_name())
        .ok_or_else(|| fail(PlaybackErrorKind::UiUnavailable(clip.ui_name().clone())))?;

    answer::present(clip, ui.as_ref(), context, stop).await?;
    let matched = answer::collect(clip, ui.as_ref(), context, stop, |input| {
        clip.analysis_context(input)
    })
    .await?;

    stop.guard(ui.hide()).await?;
    Ok(answer::target(clip, matched))
}
