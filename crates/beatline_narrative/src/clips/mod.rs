//! Clip execution.
//!
//! Every variant runs through [`run_clip`], which gives the body a fresh
//! stop signal, honours the end delay, and silences the cast if the clip
//! is stopped part way through.

mod answer;
mod choice;
mod linear;
mod quiz;

use crate::{RuntimeContext, StopSignal, Stopped};
use beatline_core::{Clip, ClipHeader, ClipTarget};
use beatline_error::{BeatlineError, BeatlineResult, PlaybackError, PlaybackErrorKind};
use std::time::Duration;

/// How a clip execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The clip finished and reported where to go next
    Advance(ClipTarget),
    /// The clip was stopped; no next index was reported
    Stopped,
}

/// Why a clip body returned early.
#[derive(Debug, derive_more::From)]
pub(crate) enum Halt {
    /// A stop request reached a suspension point
    Stopped(Stopped),
    /// Playback cannot continue
    Failed(BeatlineError),
}

#[track_caller]
pub(crate) fn fail(kind: PlaybackErrorKind) -> Halt {
    Halt::Failed(PlaybackError::new(kind).into())
}

/// Execute one clip to completion or until stopped.
///
/// # Errors
///
/// Returns an error only when the clip cannot make progress at all, for
/// example when its UI is unavailable or no analyzer is configured.
/// Soft failures are handled inside the clip.
#[tracing::instrument(
    skip_all,
    fields(clip = clip.name(), kind = %clip.kind(), index = context.clip_index())
)]
pub async fn run_clip(
    clip: &Clip,
    context: &RuntimeContext,
    stop: &StopSignal,
) -> BeatlineResult<ClipOutcome> {
    let stop = stop.child();

    let body = match clip {
        Clip::Linear(linear) => linear::play(linear, context, &stop).await,
        Clip::Choice(choice) => choice::play(choice, context, &stop).await,
        Clip::Quiz(quiz) => quiz::play(quiz, context, &stop).await,
    };

    let finished = match body {
        Ok(target) => {
            let delay = clip.header().end_delay();
            if !delay.is_zero() {
                tracing::debug!(?delay, "Holding for end delay");
            }
            stop.sleep(delay).await.map(|()| target).map_err(Halt::from)
        }
        Err(halt) => Err(halt),
    };

    match finished {
        Ok(target) => {
            tracing::debug!(next = target, "Clip complete");
            Ok(ClipOutcome::Advance(target))
        }
        Err(Halt::Stopped(_)) => {
            tracing::info!("Clip stopped");
            silence(clip.header(), context);
            Ok(ClipOutcome::Stopped)
        }
        Err(Halt::Failed(error)) => {
            tracing::error!(%error, "Clip failed");
            Err(error)
        }
    }
}

/// Start every performance and return how long the clip should hold.
///
/// The hold is the longest of the nominal duration and each controller's
/// reported performance length. Characters without a controller are skipped.
pub(crate) fn play_performances(header: &ClipHeader, context: &RuntimeContext) -> Duration {
    header
        .performances()
        .iter()
        .fold(header.nominal_duration(), |longest, performance| {
            match context.characters().get(performance.character()) {
                Some(controller) => longest.max(controller.start_performance(performance)),
                None => {
                    tracing::warn!(
                        character = %performance.character(),
                        "No controller registered for character, skipping performance"
                    );
                    longest
                }
            }
        })
}

fn silence(header: &ClipHeader, context: &RuntimeContext) {
    let mut names: Vec<&str> = header
        .performances()
        .iter()
        .map(|performance| performance.character().as_str())
        .collect();
    names.sort_unstable();
    names.dedup();

    for name in names {
        if let Some(controller) = context.characters().get(name) {
            tracing::debug!(character = name, "Stopping audio");
            controller.force_stop_audio();
        }
    }
}
