//! Browser-facing journaling panel.
//!
//! Wraps `JournalEditor` with the host clock and converts textarea
//! selections between UTF-16 and byte offsets. The JS side calls `tick`
//! from a `setTimeout` scheduled for `next_deadline_ms`.

use crate::text::{byte_to_utf16, utf16_to_byte};
use chrono::{DateTime, Utc};
use euclid_editor::drafts::Platform;
use euclid_editor::formatting::formatting_option;
use euclid_editor::journal::{JournalConfig, JournalEditor};
use wasm_bindgen::prelude::*;

/// Current host time.
pub(crate) fn now() -> DateTime<Utc> {
    #[cfg(target_arch = "wasm32")]
    {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Utc::now()
    }
}

#[wasm_bindgen]
pub struct JournalPanel {
    editor: JournalEditor,
}

impl Default for JournalPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JournalPanel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        crate::console_error_panic_hook_setup();
        Self {
            editor: JournalEditor::new(JournalConfig::default()),
        }
    }

    pub fn entry(&self) -> String {
        self.editor.entry().to_string()
    }

    /// Textarea `input` event.
    pub fn set_entry(&mut self, text: &str) {
        self.editor.set_entry(text, now());
    }

    /// Apply a toolbar option (`"bold"`, `"quote"`, …) to the textarea
    /// selection. Returns `{"start":n,"end":n}` in UTF-16 units, or an empty
    /// string for unknown options.
    pub fn apply_formatting(&mut self, option_id: &str, sel_start: usize, sel_end: usize) -> String {
        let Some(option) = formatting_option(option_id) else {
            log::debug!("journal panel: unknown formatting option {option_id}");
            return String::new();
        };
        let text = self.editor.entry();
        let selection = utf16_to_byte(text, sel_start)..utf16_to_byte(text, sel_end);
        let range = self.editor.apply_formatting(option, selection, now());

        let text = self.editor.entry();
        format!(
            r#"{{"start":{},"end":{}}}"#,
            byte_to_utf16(text, range.start),
            byte_to_utf16(text, range.end)
        )
    }

    pub fn insert_timestamp(&mut self) {
        self.editor.insert_timestamp(now());
    }

    /// Returns false for unknown platform names.
    pub fn set_platform(&mut self, name: &str) -> bool {
        match Platform::from_name(name) {
            Some(platform) => {
                self.editor.set_platform(platform);
                true
            }
            None => false,
        }
    }

    /// Queue generation (button or ⌘/Ctrl+Enter). Returns the error message,
    /// or an empty string when the request was queued.
    pub fn submit(&mut self) -> String {
        match self.editor.submit(now()) {
            Ok(_) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// Fire whatever came due. Returns true if the panel should re-render.
    pub fn tick(&mut self) -> bool {
        self.editor.tick(now())
    }

    /// Milliseconds until the next timer, or -1 when nothing is pending.
    pub fn next_deadline_ms(&self) -> f64 {
        match self.editor.next_deadline() {
            Some(at) => (at - now()).num_milliseconds().max(0) as f64,
            None => -1.0,
        }
    }

    pub fn word_count(&self) -> usize {
        self.editor.word_count()
    }

    /// Full panel state as JSON.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.editor.snapshot(now())).unwrap_or_else(|_| "{}".to_string())
    }

    /// Component teardown: cancels every pending timer and request.
    pub fn dispose(&mut self) {
        self.editor.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_reports_utf16_selection() {
        let mut panel = JournalPanel::new();
        panel.set_entry("🙂 mood");
        // "mood" starts at UTF-16 offset 3.
        let sel = panel.apply_formatting("bold", 3, 7);
        assert_eq!(panel.entry(), "🙂 **mood**");
        assert_eq!(sel, r#"{"start":5,"end":9}"#);
        assert_eq!(panel.apply_formatting("strike", 0, 0), "");
    }

    #[test]
    fn submit_reports_errors_as_text() {
        let mut panel = JournalPanel::new();
        assert!(!panel.submit().is_empty());
        panel.set_entry("something");
        assert_eq!(panel.submit(), "");
        assert!(panel.snapshot_json().contains(r#""state":"pending""#));
    }

    #[test]
    fn platform_names() {
        let mut panel = JournalPanel::new();
        assert!(panel.set_platform("instagram"));
        assert!(!panel.set_platform("myspace"));
        assert!(panel.snapshot_json().contains(r#""platform":"instagram""#));
    }
}
