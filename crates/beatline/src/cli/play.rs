//! Terminal playback command handler.

use super::setup;
use crate::cli::AnalyzerChoice;
use beatline::console::{ConsoleCharacter, ConsoleInput, ConsoleUi, ConsoleUiFactory};
use beatline::{
    BeatlineResult, CharacterRegistry, Conductor, ConductorEvent, PlaybackError,
    PlaybackErrorKind, PlaybackOutcome,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Play a script, reading answers from stdin. Ctrl-C stops playback.
pub async fn play_script(
    path: &Path,
    analyzer: Option<AnalyzerChoice>,
    pace: f32,
    config_path: Option<&Path>,
) -> BeatlineResult<()> {
    let config = setup::load_config(config_path)?;
    let script = setup::load_script(path)?;

    let mut characters = CharacterRegistry::new();
    for character in script.characters() {
        characters.register(Arc::new(
            ConsoleCharacter::new(character.name().clone()).with_seconds_per_word(pace),
        ));
    }

    let ui = Arc::new(ConsoleUi::new());
    let input = Arc::new(ConsoleInput::new(ui.clone()));

    let mut settings = config.playback.clone();
    if let Some(name) = setup::default_analyzer(analyzer, &config) {
        settings = settings.with_default_analyzer(name);
    }

    let conductor = Conductor::new(
        script,
        input.provider(),
        Arc::new(ConsoleUiFactory::new(ui)),
    )
    .with_characters(characters)
    .with_settings(settings)
    .with_analyzers(setup::analyzers(&config));

    let findings = conductor.validate();
    for finding in findings.iter().filter(|finding| finding.is_error()) {
        tracing::warn!(%finding, "Script has validation errors");
    }

    let reader = input.clone();
    let stdin_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if !reader.feed(&line) {
                println!("(not waiting for an answer)");
            }
        }
    });

    let mut events = conductor.subscribe();
    let event_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ConductorEvent::ClipStarted { index, name } => {
                    tracing::debug!(index, %name, "Clip started");
                }
                other => tracing::info!(event = %other, "Playback event"),
            }
        }
    });

    let mut handle = conductor.start().await;
    let finished = tokio::select! {
        joined = &mut handle => Some(joined),
        _ = tokio::signal::ctrl_c() => None,
    };
    let joined = match finished {
        Some(joined) => joined,
        None => {
            conductor.stop();
            handle.await
        }
    };

    stdin_task.abort();
    event_task.abort();

    let summary = joined
        .map_err(|e| PlaybackError::new(PlaybackErrorKind::RunAborted(e.to_string())))??;
    match summary.outcome() {
        PlaybackOutcome::Finished => println!("\nThe end. ({} clips)", summary.visited().len()),
        PlaybackOutcome::Stopped { index } => println!("\nStopped at clip {}.", index),
    }
    Ok(())
}
