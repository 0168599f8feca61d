use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use markeasy_core::PlaybackSettings;
use services::{SpeechEngine, SpeechError};

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_settings, setup_view_harness_with_speech,
};

#[tokio::test(flavor = "current_thread")]
async fn reader_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Reader);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No answers yet"), "missing empty state in {html}");
    assert!(html.contains("Start Reading"), "missing start button in {html}");
    assert!(html.contains("Add"), "missing add button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reader_view_smoke_renders_entries_in_order() {
    let mut harness = setup_view_harness(ViewKind::Reader);
    harness.reader.add_text("1.A, 2.B, 12.D");
    harness.reader.set_repeat_count(3);

    harness.rebuild();
    let html = harness.render();
    let first = html.find("Q1: A").expect("first entry");
    let second = html.find("Q2: B").expect("second entry");
    let third = html.find("Q12: D").expect("third entry");
    assert!(first < second && second < third, "entries out of order in {html}");
    assert!(!html.contains("No answers yet"), "stale empty state in {html}");
    assert!(html.contains(">3<"), "missing repeat count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_smoke_renders_current_values() {
    let settings = PlaybackSettings::default()
        .with_pass_gap(Duration::from_millis(5_000))
        .expect("valid gap");
    let mut harness = setup_view_harness_with_settings(ViewKind::Settings, settings);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3000"), "missing step delay in {html}");
    assert!(html.contains("5000"), "missing pass gap in {html}");
    assert!(html.contains("Save"), "missing save button in {html}");
}

#[derive(Default)]
struct CountingSpeech {
    spoken: Mutex<Vec<String>>,
}

impl CountingSpeech {
    fn count(&self) -> usize {
        self.spoken.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechEngine for CountingSpeech {
    async fn speak(&self, utterance: &str) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(utterance.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[tokio::test(flavor = "current_thread")]
async fn reader_run_continues_after_leaving_the_view() {
    let speech = Arc::new(CountingSpeech::default());
    let settings = PlaybackSettings::default()
        .with_step_delay(Duration::from_millis(20))
        .expect("valid delay");
    let mut harness =
        setup_view_harness_with_speech(ViewKind::Reader, settings, speech.clone());
    harness.reader.add_text("1.A, 2.B, 3.C");
    harness.rebuild();

    harness.reader_handles.start().call(());
    for _ in 0..20 {
        if speech.count() > 0 {
            break;
        }
        harness.drive_async().await;
    }
    assert!(harness.reader.is_running(), "run should be in progress");

    harness.switch.show(ViewKind::Settings);
    harness.drive();
    let html = harness.render();
    assert!(html.contains("Save"), "settings view not mounted in {html}");

    for _ in 0..40 {
        if !harness.reader.is_running() {
            break;
        }
        harness.drive_async().await;
    }
    assert!(!harness.reader.is_running(), "run never finished");
    assert_eq!(speech.count(), 3);

    harness.switch.show(ViewKind::Reader);
    harness.drive();
    let html = harness.render();
    assert!(html.contains("Start Reading"), "start button not restored in {html}");
}
