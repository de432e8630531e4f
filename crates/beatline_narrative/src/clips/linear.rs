use super::{Halt, play_performances};
use crate::{RuntimeContext, StopSignal};
use beatline_core::{ClipTarget, LinearClip};

pub(super) async fn play(
    clip: &LinearClip,
    context: &RuntimeContext,
    stop: &StopSignal,
) -> Result<ClipTarget, Halt> {
    let hold = play_performances(clip.header(), context);
    tracing::debug!(?hold, "Playing linear clip");
    stop.sleep(hold).await?;
    Ok(*clip.next_clip())
}
