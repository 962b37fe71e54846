//! Integration tests: journaling editor timing next to a canvas session.
//!
//! The editor's generation indicator and the canvas store are independent:
//! a refused submission must leave nodes and links alone, and the pending →
//! success → idle flow is driven purely by the host clock.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use euclid_core::config::CanvasConfig;
use euclid_core::id::SuffixGenerator;
use euclid_core::store::NodeStore;
use euclid_editor::drafts::Platform;
use euclid_editor::journal::{GenerationStatus, JournalConfig, JournalEditor, SaveStatus, SubmitError};
use euclid_editor::session::CanvasSession;
use euclid_editor::shortcuts::{ShortcutAction, ShortcutMap};

fn t(ms: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap() + TimeDelta::milliseconds(ms)
}

fn state(editor: &JournalEditor) -> &'static str {
    match editor.generation() {
        GenerationStatus::Idle => "idle",
        GenerationStatus::Pending { .. } => "pending",
        GenerationStatus::Success { .. } => "success",
        GenerationStatus::Error { .. } => "error",
    }
}

#[test]
fn empty_submission_leaves_canvas_untouched() {
    let session = CanvasSession::new(NodeStore::sample().unwrap(), CanvasConfig::default(), SuffixGenerator::seeded(1));
    let (nodes, links) = (session.store.len(), session.store.links().len());

    let mut editor = JournalEditor::new(JournalConfig::default());
    editor.set_entry("   ", t(0));
    assert_eq!(editor.submit(t(10)), Err(SubmitError::EmptyEntry));
    assert_eq!(state(&editor), "error");

    editor.tick(t(60_000));
    assert_eq!(state(&editor), "error");
    assert_eq!(session.store.len(), nodes);
    assert_eq!(session.store.links().len(), links);
}

#[test]
fn shortcut_queues_generation_through_full_cycle() {
    let mut editor = JournalEditor::new(JournalConfig::default()).with_initial_content("Notes from the offsite");
    editor.set_platform(Platform::X);

    let action = ShortcutMap::resolve("Enter", false, false, false, true);
    assert_eq!(action, Some(ShortcutAction::QueueGeneration));
    editor.submit(t(0)).unwrap();

    let mut timeline = Vec::new();
    for ms in (0..=5000).step_by(100) {
        editor.tick(t(ms));
        let label = state(&editor);
        if timeline.last().map(|(_, l)| *l) != Some(label) {
            timeline.push((ms, label));
        }
    }
    assert_eq!(timeline, vec![(0, "pending"), (1200, "success"), (4400, "idle")]);
}

#[test]
fn host_waking_only_at_deadlines_sees_every_transition() {
    let mut editor = JournalEditor::new(JournalConfig::default());
    editor.set_entry("hello", t(0));
    editor.tick(t(1000));
    editor.submit(t(2000)).unwrap();

    let mut timeline = vec![(2000, state(&editor))];
    let mut wakeups = 0;
    while let Some(at) = editor.next_deadline() {
        wakeups += 1;
        assert!(wakeups < 10, "deadlines never drained");
        editor.tick(at);
        timeline.push(((at - t(0)).num_milliseconds(), state(&editor)));
    }

    assert_eq!(timeline, vec![(2000, "pending"), (3200, "success"), (6400, "idle")]);
    assert_eq!(editor.save_status(), SaveStatus::Saved);
}

#[test]
fn custom_delays_are_honoured() {
    let config = JournalConfig {
        save_debounce: TimeDelta::milliseconds(250),
        generation_delay: TimeDelta::milliseconds(50),
        success_reset: TimeDelta::milliseconds(75),
    };
    let mut editor = JournalEditor::new(config);
    editor.set_entry("quick", t(0));
    editor.submit(t(0)).unwrap();

    editor.tick(t(50));
    assert_eq!(state(&editor), "success");
    editor.tick(t(125));
    assert_eq!(state(&editor), "idle");
    assert_eq!(editor.save_status(), SaveStatus::Saving);
    editor.tick(t(250));
    assert_eq!(editor.save_status(), SaveStatus::Saved);
}

#[test]
fn typing_keeps_postponing_the_save() {
    let mut editor = JournalEditor::new(JournalConfig::default());
    let mut text = String::new();
    for (i, ch) in "steady".chars().enumerate() {
        text.push(ch);
        let now = t(i as i64 * 400);
        editor.set_entry(text.clone(), now);
        editor.tick(now);
        assert_eq!(editor.save_status(), SaveStatus::Saving);
    }
    // Last keystroke at 2000ms.
    editor.tick(t(2999));
    assert_eq!(editor.save_status(), SaveStatus::Saving);
    editor.tick(t(3000));
    assert_eq!(editor.save_status(), SaveStatus::Saved);
    assert_eq!(editor.save_label(t(3000)), "Saved now");
    assert_eq!(editor.save_label(t(3000 + 2 * 60 * 60 * 1000)), "Saved 2 hours ago");
}

#[test]
fn dropped_editor_cancels_work() {
    let mut editor = JournalEditor::new(JournalConfig::default()).with_initial_content("bye");
    editor.submit(t(0)).unwrap();
    editor.dispose();
    assert!(editor.is_disposed());
    assert!(!editor.tick(t(10_000)));
    drop(editor);
}
