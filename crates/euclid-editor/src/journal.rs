//! Journaling editor state.
//!
//! Two independent machines run off the host clock: a save indicator that
//! debounces every text change, and a generation indicator that drives a
//! `DraftService` request through pending → success → idle. Nothing here
//! touches the canvas store.

use crate::drafts::{DraftRequest, DraftResponse, DraftService, DraftTicket, Platform, SimulatedDraftService};
use crate::formatting::{self, FormattingOption};
use crate::timer::TimerSlot;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub const EMPTY_ENTRY_MESSAGE: &str = "Write something in your journal before generating a draft.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JournalConfig {
    /// Quiet period after the last edit before the draft counts as saved.
    pub save_debounce: TimeDelta,
    pub generation_delay: TimeDelta,
    /// How long a success stays visible.
    pub success_reset: TimeDelta,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            save_debounce: TimeDelta::milliseconds(1000),
            generation_delay: TimeDelta::milliseconds(1200),
            success_reset: TimeDelta::milliseconds(3200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GenerationStatus {
    Idle,
    Pending {
        ticket: DraftTicket,
        platform: Platform,
    },
    Success {
        at: DateTime<Utc>,
        platform: Platform,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    EmptyEntry,
    Disposed,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::EmptyEntry => f.write_str(EMPTY_ENTRY_MESSAGE),
            SubmitError::Disposed => f.write_str("journal editor was disposed"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Everything the panel shows, resolved at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    pub entry: String,
    pub word_count: usize,
    pub save_status: SaveStatus,
    pub save_label: String,
    pub platform: Platform,
    pub generation: GenerationStatus,
}

pub struct JournalEditor<S: DraftService = SimulatedDraftService> {
    config: JournalConfig,
    entry: String,
    platform: Platform,

    save_status: SaveStatus,
    saved_at: Option<DateTime<Utc>>,
    save_timer: TimerSlot,

    generation: GenerationStatus,
    service: S,
    next_ticket: u64,
    reset_timer: TimerSlot,

    disposed: bool,
}

impl JournalEditor {
    pub fn new(config: JournalConfig) -> Self {
        let service = SimulatedDraftService::new(config.generation_delay);
        Self::with_service(config, service)
    }
}

impl Default for JournalEditor {
    fn default() -> Self {
        Self::new(JournalConfig::default())
    }
}

impl<S: DraftService> JournalEditor<S> {
    pub fn with_service(config: JournalConfig, service: S) -> Self {
        Self {
            config,
            entry: String::new(),
            platform: Platform::default(),
            save_status: SaveStatus::Idle,
            saved_at: None,
            save_timer: TimerSlot::new(),
            generation: GenerationStatus::Idle,
            service,
            next_ticket: 0,
            reset_timer: TimerSlot::new(),
            disposed: false,
        }
    }

    /// Seed the entry without counting it as an edit.
    pub fn with_initial_content(mut self, text: impl Into<String>) -> Self {
        self.entry = text.into();
        self
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    pub fn generation(&self) -> &GenerationStatus {
        &self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn word_count(&self) -> usize {
        formatting::word_count(&self.entry)
    }

    pub fn save_label(&self, now: DateTime<Utc>) -> String {
        if self.save_status == SaveStatus::Saving {
            return "Saving draft…".to_string();
        }
        match self.saved_at {
            Some(at) => format!("Saved {}", formatting::relative_time(at, now)),
            None => "Ready to write".to_string(),
        }
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> JournalSnapshot {
        JournalSnapshot {
            entry: self.entry.clone(),
            word_count: self.word_count(),
            save_status: self.save_status,
            save_label: self.save_label(now),
            platform: self.platform,
            generation: self.generation.clone(),
        }
    }

    /// Replace the entry text, as typing does.
    pub fn set_entry(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        if self.disposed {
            return;
        }
        self.entry = text.into();
        self.edited(now);
    }

    /// Apply a toolbar option to `selection` (byte offsets). Returns the
    /// range to select afterwards.
    pub fn apply_formatting(
        &mut self,
        option: &FormattingOption,
        selection: Range<usize>,
        now: DateTime<Utc>,
    ) -> Range<usize> {
        if self.disposed {
            return selection;
        }
        let (next, selected) = formatting::apply_formatting(&self.entry, option, selection);
        self.entry = next;
        self.edited(now);
        selected
    }

    pub fn insert_timestamp(&mut self, now: DateTime<Utc>) {
        if self.disposed {
            return;
        }
        let stamp = formatting::format_stamp(now);
        self.entry = formatting::append_timestamp(&self.entry, &stamp);
        self.edited(now);
    }

    fn edited(&mut self, now: DateTime<Utc>) {
        self.save_status = SaveStatus::Saving;
        self.save_timer.arm(now, self.config.save_debounce);
        if matches!(self.generation, GenerationStatus::Error { .. }) {
            log::debug!("journal: edit clears generation error");
            self.generation = GenerationStatus::Idle;
        }
    }

    /// Queue draft generation for the current entry. A blank entry moves the
    /// indicator to the error state instead. Any earlier request is
    /// superseded.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<DraftTicket, SubmitError> {
        if self.disposed {
            return Err(SubmitError::Disposed);
        }

        self.service.cancel();
        self.reset_timer.cancel();

        if self.entry.trim().is_empty() {
            log::debug!("journal: refusing to generate from an empty entry");
            self.generation = GenerationStatus::Error {
                message: EMPTY_ENTRY_MESSAGE.to_string(),
            };
            return Err(SubmitError::EmptyEntry);
        }

        self.next_ticket += 1;
        let ticket = DraftTicket(self.next_ticket);
        self.service.submit(
            DraftRequest {
                ticket,
                entry: self.entry.clone(),
                platform: self.platform,
            },
            now,
        );
        self.generation = GenerationStatus::Pending {
            ticket,
            platform: self.platform,
        };
        log::debug!("journal: generation {ticket:?} pending for {}", self.platform.label());
        Ok(ticket)
    }

    /// Advance both machines to `now`. Returns whether anything visible
    /// changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.disposed {
            return false;
        }
        let mut changed = false;

        if let Some(fired) = self.save_timer.fire(now) {
            self.save_status = SaveStatus::Saved;
            self.saved_at = Some(fired.at);
            changed = true;
        }

        while let Some(response) = self.service.poll(now) {
            changed |= self.settle(response);
        }

        if self.reset_timer.fire(now).is_some() && matches!(self.generation, GenerationStatus::Success { .. }) {
            log::debug!("journal: generation indicator back to idle");
            self.generation = GenerationStatus::Idle;
            changed = true;
        }

        changed
    }

    fn settle(&mut self, response: DraftResponse) -> bool {
        let GenerationStatus::Pending { ticket, .. } = self.generation else {
            log::debug!("journal: dropping response for {:?}, nothing pending", response.ticket());
            return false;
        };
        if response.ticket() != ticket {
            log::debug!("journal: dropping stale response for {:?}", response.ticket());
            return false;
        }

        match response {
            DraftResponse::Completed { platform, at, .. } => {
                log::debug!("journal: generation {ticket:?} succeeded");
                self.generation = GenerationStatus::Success { at, platform };
                self.reset_timer.arm(at, self.config.success_reset);
            }
            DraftResponse::Failed { message, .. } => {
                log::debug!("journal: generation {ticket:?} failed: {message}");
                self.generation = GenerationStatus::Error { message };
            }
        }
        true
    }

    /// Earliest pending deadline, for hosts that schedule their own wakeups.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        [self.save_timer.due_at(), self.service.next_deadline(), self.reset_timer.due_at()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Cancel every timer and the in-flight request. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.save_timer.cancel();
        self.reset_timer.cancel();
        self.service.cancel();
        self.disposed = true;
    }
}

impl<S: DraftService> Drop for JournalEditor<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn ms(n: i64) -> DateTime<Utc> {
        t0() + TimeDelta::milliseconds(n)
    }

    fn editor() -> JournalEditor {
        JournalEditor::default()
    }

    /// Fails every request immediately.
    #[derive(Default)]
    struct FailingService {
        pending: Option<(DraftTicket, DateTime<Utc>)>,
    }

    impl DraftService for FailingService {
        fn submit(&mut self, request: DraftRequest, now: DateTime<Utc>) {
            self.pending = Some((request.ticket, now));
        }

        fn poll(&mut self, _now: DateTime<Utc>) -> Option<DraftResponse> {
            self.pending.take().map(|(ticket, _)| DraftResponse::Failed {
                ticket,
                message: "quota exceeded".into(),
            })
        }

        fn cancel(&mut self) {
            self.pending = None;
        }

        fn in_flight(&self) -> bool {
            self.pending.is_some()
        }

        fn next_deadline(&self) -> Option<DateTime<Utc>> {
            self.pending.map(|(_, at)| at)
        }
    }

    #[test]
    fn save_debounces_edits() {
        let mut editor = editor();
        assert_eq!(editor.save_label(t0()), "Ready to write");

        editor.set_entry("a", t0());
        editor.set_entry("ab", ms(600));
        assert_eq!(editor.save_label(ms(700)), "Saving draft…");
        assert!(!editor.tick(ms(1200)));
        assert_eq!(editor.save_status(), SaveStatus::Saving);

        assert!(editor.tick(ms(1600)));
        assert_eq!(editor.save_status(), SaveStatus::Saved);
        assert_eq!(editor.saved_at(), Some(ms(1600)));
        assert_eq!(editor.save_label(ms(1600)), "Saved now");
        assert_eq!(editor.save_label(ms(13_600)), "Saved 12 seconds ago");
    }

    #[test]
    fn formatting_and_timestamp_count_as_edits() {
        let mut editor = editor().with_initial_content("hello world");
        assert_eq!(editor.save_status(), SaveStatus::Idle);
        assert_eq!(editor.word_count(), 2);

        let bold = formatting::formatting_option("bold").unwrap();
        let sel = editor.apply_formatting(bold, 6..11, t0());
        assert_eq!(editor.entry(), "hello **world**");
        assert_eq!(sel, 8..13);
        assert_eq!(editor.save_status(), SaveStatus::Saving);

        editor.tick(ms(1000));
        editor.insert_timestamp(ms(2000));
        assert_eq!(editor.save_status(), SaveStatus::Saving);
        assert!(editor.entry().starts_with("hello **world**\n\n> "));
        assert!(editor.entry().ends_with('\n'));
    }

    #[test]
    fn generation_runs_pending_success_idle() {
        let mut editor = editor().with_initial_content("shipped the release");
        editor.set_platform(Platform::Instagram);
        let ticket = editor.submit(t0()).unwrap();
        assert_eq!(
            editor.generation(),
            &GenerationStatus::Pending {
                ticket,
                platform: Platform::Instagram
            }
        );

        editor.tick(ms(1199));
        assert!(matches!(editor.generation(), GenerationStatus::Pending { .. }));

        assert!(editor.tick(ms(1200)));
        assert_eq!(
            editor.generation(),
            &GenerationStatus::Success {
                at: ms(1200),
                platform: Platform::Instagram
            }
        );

        editor.tick(ms(4399));
        assert!(matches!(editor.generation(), GenerationStatus::Success { .. }));
        assert!(editor.tick(ms(4400)));
        assert_eq!(editor.generation(), &GenerationStatus::Idle);
    }

    #[test]
    fn late_tick_settles_both_steps_from_deadlines() {
        let mut editor = editor().with_initial_content("x");
        editor.submit(t0()).unwrap();
        assert!(editor.tick(ms(10_000)));
        assert_eq!(editor.generation(), &GenerationStatus::Idle);
    }

    #[test]
    fn blank_entry_errors_until_edited() {
        let mut editor = editor().with_initial_content("  \n\t");
        assert_eq!(editor.submit(t0()), Err(SubmitError::EmptyEntry));
        assert_eq!(
            editor.generation(),
            &GenerationStatus::Error {
                message: EMPTY_ENTRY_MESSAGE.into()
            }
        );

        editor.set_entry("now with words", ms(100));
        assert_eq!(editor.generation(), &GenerationStatus::Idle);
    }

    #[test]
    fn resubmit_supersedes_pending_request() {
        let mut editor = editor().with_initial_content("draft");
        let first = editor.submit(t0()).unwrap();
        let second = editor.submit(ms(1000)).unwrap();
        assert_ne!(first, second);

        editor.tick(ms(1300));
        assert!(matches!(editor.generation(), GenerationStatus::Pending { ticket, .. } if *ticket == second));
        editor.tick(ms(2200));
        assert!(matches!(editor.generation(), GenerationStatus::Success { at, .. } if *at == ms(2200)));
    }

    #[test]
    fn failed_request_surfaces_error() {
        let mut editor =
            JournalEditor::with_service(JournalConfig::default(), FailingService::default()).with_initial_content("x");
        editor.submit(t0()).unwrap();
        assert!(editor.tick(t0()));
        assert_eq!(
            editor.generation(),
            &GenerationStatus::Error {
                message: "quota exceeded".into()
            }
        );
    }

    #[test]
    fn dispose_silences_everything() {
        let mut editor = editor();
        editor.set_entry("text", t0());
        editor.submit(t0()).unwrap();
        editor.dispose();

        assert!(!editor.tick(ms(60_000)));
        assert_eq!(editor.save_status(), SaveStatus::Saving);
        assert!(matches!(editor.generation(), GenerationStatus::Pending { .. }));
        assert_eq!(editor.submit(ms(60_000)), Err(SubmitError::Disposed));
        assert_eq!(editor.next_deadline(), None);
    }

    #[test]
    fn next_deadline_is_earliest() {
        let mut editor = editor();
        assert_eq!(editor.next_deadline(), None);
        editor.set_entry("x", t0());
        assert_eq!(editor.next_deadline(), Some(ms(1000)));
    }

    #[test]
    fn next_deadline_covers_in_flight_generation() {
        let mut editor = editor();
        editor.set_entry("hello", t0());
        editor.tick(ms(1000));
        assert_eq!(editor.save_status(), SaveStatus::Saved);

        editor.submit(ms(2000)).unwrap();
        assert_eq!(editor.next_deadline(), Some(ms(3200)));

        assert!(editor.tick(ms(3200)));
        assert!(matches!(editor.generation(), GenerationStatus::Success { .. }));
        assert_eq!(editor.next_deadline(), Some(ms(6400)));

        assert!(editor.tick(ms(6400)));
        assert_eq!(*editor.generation(), GenerationStatus::Idle);
        assert_eq!(editor.next_deadline(), None);
    }

    #[test]
    fn next_deadline_clears_on_dispose() {
        let mut editor = editor();
        editor.set_entry("hello", t0());
        editor.submit(t0()).unwrap();
        editor.dispose();
        assert_eq!(editor.next_deadline(), None);
    }
}
