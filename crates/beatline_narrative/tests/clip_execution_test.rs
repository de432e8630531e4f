//! Tests for running individual clips.

mod test_utils;

use beatline_core::{ChoiceClip, Clip, ClipHeader, LinearClip, PerformanceData, QuizClip};
use beatline_error::PlaybackErrorKind;
use beatline_interface::{InputProvider, UiErrorKind};
use beatline_narrative::{ClipOutcome, ConductorEvent, PlaybackSettings, StopSignal, run_clip};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    Harness, RecordingCharacter, RecordingUi, ScriptedAnalyzer, ScriptedInput, SingleUiFactory,
    UiCall, Verdict,
};
use tokio::time::Instant;

fn answers(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn choice(name: &str, next_clips: Vec<i32>) -> ChoiceClip {
    ChoiceClip::new(
        ClipHeader::new(name),
        "Which door?",
        answers(&["Red", "Blue"]),
        next_clips,
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_linear_waits_for_nominal_duration() {
    let ada = RecordingCharacter::new("Ada", Duration::from_millis(500));
    let harness = Harness::new(ScriptedInput::silent(), SingleUiFactory::empty())
        .with_character(ada.clone());
    let clip = Clip::from(LinearClip::new(
        ClipHeader::new("intro")
            .with_duration_secs(2.0)
            .with_performance(PerformanceData::new("Ada").speaking("Hello.")),
        3,
    ));

    let started = Instant::now();
    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(3));
    assert_eq!(ada.performances(), 1);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "finished after {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(2100), "finished after {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_linear_waits_for_longest_performance() {
    let ada = RecordingCharacter::new("Ada", Duration::from_secs(5));
    let harness = Harness::new(ScriptedInput::silent(), SingleUiFactory::empty())
        .with_character(ada);
    let clip = Clip::from(LinearClip::new(
        ClipHeader::new("speech")
            .with_duration_secs(1.0)
            .with_end_delay_secs(0.5)
            .with_performance(PerformanceData::new("Ada").speaking("A long speech.")),
        -1,
    ));

    let started = Instant::now();
    run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(5500));
}

#[tokio::test(start_paused = true)]
async fn test_missing_character_is_skipped() {
    let ada = RecordingCharacter::new("Ada", Duration::ZERO);
    let harness = Harness::new(ScriptedInput::silent(), SingleUiFactory::empty())
        .with_character(ada.clone());
    let clip = Clip::from(LinearClip::new(
        ClipHeader::new("crowd")
            .with_performance(PerformanceData::new("Ghost").speaking("Boo."))
            .with_performance(PerformanceData::new("Ada").speaking("Eek!")),
        1,
    ));

    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(1));
    assert_eq!(ada.performances(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_choice_retries_until_match() {
    let input = ScriptedInput::replying(&["umm", "what", "blue please"]);
    let analyzer = ScriptedAnalyzer::new(
        "scripted",
        vec![Verdict::NoMatch, Verdict::NoMatch, Verdict::Match(1)],
        Verdict::NoMatch,
    );
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone());
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let outcome = run_clip(&clip, &harness.context(2), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(9));
    assert_eq!(input.requests(), 3);
    assert_eq!(analyzer.calls(), 3);
    assert_eq!(analyzer.inputs(), vec!["umm", "what", "blue please"]);
    assert_eq!(
        ui.errors(),
        vec![UiErrorKind::AnalysisFailed, UiErrorKind::AnalysisFailed]
    );
    let calls = ui.calls();
    assert_eq!(
        calls.first(),
        Some(&UiCall::Choices("Which door?".into(), answers(&["Red", "Blue"])))
    );
    assert_eq!(calls.get(1), Some(&UiCall::Shown));
    assert_eq!(calls.last(), Some(&UiCall::Hidden));
}

#[tokio::test(start_paused = true)]
async fn test_choice_reprompts_on_blank_input() {
    let input = ScriptedInput::replying(&["   ", "red"]);
    let analyzer = ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(0));
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone());
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(4));
    assert_eq!(input.requests(), 2);
    assert_eq!(analyzer.calls(), 1);
    assert_eq!(ui.errors(), vec![UiErrorKind::InputNotDetected]);
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_and_failed_analysis_are_retried() {
    let input = ScriptedInput::always("blue");
    let analyzer = ScriptedAnalyzer::new(
        "scripted",
        vec![Verdict::Match(7), Verdict::Fail, Verdict::Match(1)],
        Verdict::NoMatch,
    );
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input, SingleUiFactory::new(ui.clone())).with_analyzer(analyzer);
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(9));
    assert_eq!(
        ui.errors(),
        vec![UiErrorKind::AnalysisFailed, UiErrorKind::NetworkConnection]
    );
}

#[tokio::test(start_paused = true)]
async fn test_attempt_limit_ends_with_error() {
    let input = ScriptedInput::always("purple");
    let analyzer = ScriptedAnalyzer::new("scripted", vec![], Verdict::NoMatch);
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone())
        .with_settings(PlaybackSettings::default().with_max_answer_attempts(2));
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let err = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.playback_kind(),
        Some(&PlaybackErrorKind::AttemptsExhausted {
            clip: "doors".into(),
            attempts: 2
        })
    );
    assert_eq!(input.requests(), 2);
    assert_eq!(analyzer.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_zero_attempt_cap_keeps_asking() {
    let input = ScriptedInput::always("blue");
    let analyzer = ScriptedAnalyzer::new(
        "scripted",
        vec![Verdict::NoMatch, Verdict::NoMatch],
        Verdict::Match(1),
    );
    let harness = Harness::new(input.clone(), SingleUiFactory::new(Arc::default()))
        .with_analyzer(analyzer.clone())
        .with_settings(PlaybackSettings::default().with_max_answer_attempts(0));
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(9));
    assert_eq!(input.requests(), 3);
    assert_eq!(analyzer.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_analysis_timeout_reprompts_with_connection_error() {
    let input = ScriptedInput::always("blue");
    let analyzer = ScriptedAnalyzer::new(
        "scripted",
        vec![Verdict::Stall(Duration::from_secs(3600), 0)],
        Verdict::Match(1),
    );
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone())
        .with_settings(PlaybackSettings::default().with_analysis_timeout(Duration::from_secs(2)));
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let started = Instant::now();
    let outcome = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(9));
    assert_eq!(ui.errors(), vec![UiErrorKind::NetworkConnection]);
    assert_eq!(input.requests(), 2);
    assert_eq!(analyzer.calls(), 2);
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_input_timeout_reprompts_and_cancels() {
    let input = ScriptedInput::silent();
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(0)))
        .with_settings(
            PlaybackSettings::default()
                .with_max_answer_attempts(2)
                .with_input_timeout(Duration::from_secs(10)),
        );
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let err = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.playback_kind(),
        Some(PlaybackErrorKind::AttemptsExhausted { attempts: 2, .. })
    ));
    assert_eq!(input.cancels(), 2);
    assert_eq!(
        ui.errors(),
        vec![UiErrorKind::InputNotDetected, UiErrorKind::InputNotDetected]
    );
}

#[tokio::test(start_paused = true)]
async fn test_choice_without_analyzer_fails() {
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(ScriptedInput::always("red"), SingleUiFactory::new(ui));
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let err = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.playback_kind(),
        Some(&PlaybackErrorKind::NoAnalyzer("doors".into()))
    );
}

#[tokio::test(start_paused = true)]
async fn test_choice_without_ui_fails() {
    let harness = Harness::new(ScriptedInput::always("red"), SingleUiFactory::empty())
        .with_analyzer(ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(0)));
    let clip = Clip::from(choice("doors", vec![4, 9]).with_ui_name("DoorPicker"));

    let err = run_clip(&clip, &harness.context(0), &StopSignal::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.playback_kind(),
        Some(&PlaybackErrorKind::UiUnavailable("DoorPicker".into()))
    );
}

fn quiz() -> Clip {
    let choice = ChoiceClip::new(
        ClipHeader::new("capitals"),
        "Capital of France?",
        answers(&["Paris", "Lyon"]),
        vec![5, 7],
    )
    .unwrap();
    Clip::from(
        QuizClip::new(
            choice,
            answers(&["Right, Paris.", "No, it is Paris."]),
            Some(0),
        )
        .unwrap(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_quiz_branches_on_matched_answer_when_wrong() {
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(ScriptedInput::always("lyon"), SingleUiFactory::new(ui.clone()))
        .with_analyzer(ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(1)));
    let mut events = harness.events.subscribe();

    let outcome = run_clip(&quiz(), &harness.context(4), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(7));
    assert!(
        ui.calls()
            .contains(&UiCall::Incorrect(1, Some(0), "No, it is Paris.".into()))
    );
    assert_eq!(
        events.recv().await.unwrap(),
        ConductorEvent::ChoicePresented {
            index: 4,
            question: "Capital of France?".into()
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        ConductorEvent::ResponseCorrectness {
            index: 4,
            answer: 1,
            correct: false
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_quiz_branches_on_matched_answer_when_right() {
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(ScriptedInput::always("paris"), SingleUiFactory::new(ui.clone()))
        .with_analyzer(ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(0)));

    let outcome = run_clip(&quiz(), &harness.context(4), &StopSignal::new())
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::Advance(5));
    assert!(ui.calls().contains(&UiCall::Correct(0, "Right, Paris.".into())));
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_waiting_for_input() {
    let ada = RecordingCharacter::new("Ada", Duration::from_secs(1));
    let input = ScriptedInput::silent();
    let analyzer = ScriptedAnalyzer::new("scripted", vec![], Verdict::Match(0));
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone())
        .with_character(ada.clone());
    let clip = Clip::from(
        ChoiceClip::new(
            ClipHeader::new("doors")
                .with_performance(PerformanceData::new("Ada").speaking("Pick one.")),
            "Which door?",
            answers(&["Red", "Blue"]),
            vec![1, 2],
        )
        .unwrap(),
    );

    let stop = StopSignal::new();
    let context = harness.context(0);
    let run_stop = stop.clone();
    let task = tokio::spawn(async move { run_clip(&clip, &context, &run_stop).await });

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(input.is_listening());
    stop.stop();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome, ClipOutcome::Stopped);
    assert_eq!(input.cancels(), 1);
    assert_eq!(analyzer.calls(), 0);
    assert_eq!(ada.audio_stops(), 1);
    assert!(!ui.calls().contains(&UiCall::Hidden));
}

#[tokio::test(start_paused = true)]
async fn test_stop_during_linear_wait_reports_no_target() {
    let ada = RecordingCharacter::new("Ada", Duration::from_secs(60));
    let harness = Harness::new(ScriptedInput::silent(), SingleUiFactory::empty())
        .with_character(ada.clone());
    let clip = Clip::from(LinearClip::new(
        ClipHeader::new("monologue").with_performance(PerformanceData::new("Ada")),
        1,
    ));

    let stop = StopSignal::new();
    let context = harness.context(0);
    let run_stop = stop.clone();
    let task = tokio::spawn(async move { run_clip(&clip, &context, &run_stop).await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    stop.stop();

    assert_eq!(task.await.unwrap().unwrap(), ClipOutcome::Stopped);
    assert_eq!(ada.audio_stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_during_slow_analysis_discards_result() {
    let input = ScriptedInput::always("red");
    let analyzer = ScriptedAnalyzer::new(
        "scripted",
        vec![Verdict::Stall(Duration::from_secs(3600), 0)],
        Verdict::Match(0),
    );
    let ui = Arc::new(RecordingUi::default());
    let harness = Harness::new(input.clone(), SingleUiFactory::new(ui.clone()))
        .with_analyzer(analyzer.clone());
    let clip = Clip::from(choice("doors", vec![4, 9]));

    let stop = StopSignal::new();
    let context = harness.context(0);
    let run_stop = stop.clone();
    let task = tokio::spawn(async move { run_clip(&clip, &context, &run_stop).await });

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(analyzer.calls(), 1);
    stop.stop();

    assert_eq!(task.await.unwrap().unwrap(), ClipOutcome::Stopped);
    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(analyzer.calls(), 1);
    assert_eq!(input.requests(), 1);
    assert!(ui.errors().is_empty());
    assert!(!ui.calls().contains(&UiCall::Hidden));
}
