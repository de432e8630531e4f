//! Present-and-answer flow shared by choice and quiz clips.

use super::{Halt, fail, play_performances};
use crate::{ConductorEvent, RuntimeContext, StopSignal};
use beatline_core::{AnalysisContext, ChoiceClip, ClipTarget, END_OF_SCRIPT};
use beatline_error::PlaybackErrorKind;
use beatline_interface::{InteractiveUi, UiErrorKind};
use tokio::sync::oneshot;

/// Play the lead-in, wait for the UI, then put the question on screen.
pub(super) async fn present<U>(
    clip: &ChoiceClip,
    ui: &U,
    context: &RuntimeContext,
    stop: &StopSignal,
) -> Result<(), Halt>
where
    U: InteractiveUi + ?Sized,
{
    let hold = play_performances(clip.header(), context);
    stop.sleep(hold).await?;

    context.emit(ConductorEvent::ChoicePresented {
        index: *context.clip_index(),
        question: clip.question().clone(),
    });

    stop.wait_until(context.settings().ui_poll_interval(), || ui.is_loaded())
        .await?;
    ui.set_choices(clip.question(), clip.answers());
    stop.guard(ui.show()).await?;
    Ok(())
}

/// Request input and analyze it until an answer matches.
///
/// Each failed attempt is reported through [`InteractiveUi::show_error`]
/// and retried. The loop only gives up when an attempt limit is configured.
pub(super) async fn collect<U, F>(
    clip: &ChoiceClip,
    ui: &U,
    context: &RuntimeContext,
    stop: &StopSignal,
    analysis_for: F,
) -> Result<usize, Halt>
where
    U: InteractiveUi + ?Sized,
    F: Fn(String) -> AnalysisContext,
{
    let name = clip.header().name();
    let analyzer = context
        .analyzer()
        .clone()
        .ok_or_else(|| fail(PlaybackErrorKind::NoAnalyzer(name.clone())))?;
    let settings = context.settings();
    let max_attempts = settings.attempt_limit();
    let mut attempts: u32 = 0;

    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(fail(PlaybackErrorKind::AttemptsExhausted {
                clip: name.clone(),
                attempts,
            }));
        }
        attempts += 1;

        let input = match request_input(context, stop).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::debug!(attempts, "No input detected");
                ui.show_error(UiErrorKind::InputNotDetected);
                continue;
            }
        };

        let analysis = analysis_for(input);
        let verdict = stop
            .guard(async {
                match settings.analysis_timeout() {
                    Some(limit) => tokio::time::timeout(limit, analyzer.analyze(&analysis))
                        .await
                        .ok(),
                    None => Some(analyzer.analyze(&analysis).await),
                }
            })
            .await?;

        match verdict {
            Some(Ok(Some(index))) if index < clip.answers().len() => {
                tracing::info!(
                    analyzer = analyzer.name(),
                    answer = index,
                    attempts,
                    "Answer matched"
                );
                return Ok(index);
            }
            Some(Ok(Some(index))) => {
                tracing::warn!(
                    analyzer = analyzer.name(),
                    index,
                    "Analyzer returned an index outside the answer list"
                );
                ui.show_error(UiErrorKind::AnalysisFailed);
            }
            Some(Ok(None)) => {
                tracing::debug!(analyzer = analyzer.name(), attempts, "No answer matched");
                ui.show_error(UiErrorKind::AnalysisFailed);
            }
            Some(Err(error)) => {
                tracing::warn!(analyzer = analyzer.name(), %error, "Analysis failed");
                ui.show_error(UiErrorKind::NetworkConnection);
            }
            None => {
                tracing::warn!(analyzer = analyzer.name(), "Analysis timed out");
                ui.show_error(UiErrorKind::NetworkConnection);
            }
        }
    }
}

/// Branch target for a matched answer.
pub(super) fn target(clip: &ChoiceClip, answer: usize) -> ClipTarget {
    clip.target_for(answer).unwrap_or(END_OF_SCRIPT)
}

/// One input request. `Ok(None)` means the request timed out.
async fn request_input(context: &RuntimeContext, stop: &StopSignal) -> Result<Option<String>, Halt> {
    let provider = context.input();
    let (sender, receiver) = oneshot::channel();
    provider.request_input(Box::new(move |text| {
        let _ = sender.send(text);
    }))?;

    let timeout = context.settings().input_timeout();
    let received = stop
        .guard(async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, receiver).await.ok(),
                None => Some(receiver.await),
            }
        })
        .await;

    match received {
        Ok(Some(Ok(text))) => Ok(Some(text)),
        Ok(Some(Err(_))) => Err(fail(PlaybackErrorKind::InputAbandoned(
            provider.name().to_string(),
        ))),
        Ok(None) => {
            tracing::debug!(provider = provider.name(), ?timeout, "Input timed out");
            provider.cancel();
            Ok(None)
        }
        Err(stopped) => {
            provider.cancel();
            Err(stopped.into())
        }
    }
}
