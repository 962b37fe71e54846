//! Text helpers for the journaling editor: formatting toolbar, word count,
//! timestamp blocks and relative "saved" labels.

use chrono::{DateTime, Local, Utc};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingKind {
    /// Surround the selection with `token`.
    Wrap { token: &'static str },
    /// Start a new line with `prefix`.
    Prefix { prefix: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOption {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FormattingKind,
    /// Inserted when the selection is empty.
    pub placeholder: &'static str,
}

pub const FORMATTING_OPTIONS: [FormattingOption; 5] = [
    FormattingOption {
        id: "bold",
        label: "Bold",
        kind: FormattingKind::Wrap { token: "**" },
        placeholder: "bold thought",
    },
    FormattingOption {
        id: "italic",
        label: "Italic",
        kind: FormattingKind::Wrap { token: "_" },
        placeholder: "emphasized idea",
    },
    FormattingOption {
        id: "code",
        label: "Code",
        kind: FormattingKind::Wrap { token: "`" },
        placeholder: "snippet",
    },
    FormattingOption {
        id: "quote",
        label: "Quote",
        kind: FormattingKind::Prefix { prefix: "> " },
        placeholder: "Insight worth quoting",
    },
    FormattingOption {
        id: "bullet",
        label: "List",
        kind: FormattingKind::Prefix { prefix: "- " },
        placeholder: "List item",
    },
];

pub fn formatting_option(id: &str) -> Option<&'static FormattingOption> {
    FORMATTING_OPTIONS.iter().find(|o| o.id == id)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Apply `option` to `selection` (byte offsets) of `text`.
///
/// Returns the new text and the byte range that should be selected
/// afterwards (the formatted words, without the markup).
pub fn apply_formatting(text: &str, option: &FormattingOption, selection: Range<usize>) -> (String, Range<usize>) {
    let mut start = floor_char_boundary(text, selection.start);
    let mut end = floor_char_boundary(text, selection.end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let selected = &text[start..end];
    let placeholder = if selected.is_empty() { option.placeholder } else { selected };

    let (addition, sel_start) = match option.kind {
        FormattingKind::Wrap { token } => (format!("{token}{placeholder}{token}"), start + token.len()),
        FormattingKind::Prefix { prefix } => {
            let newline = if start > 0 && !text[..start].ends_with('\n') { "\n" } else { "" };
            (
                format!("{newline}{prefix}{placeholder}"),
                start + newline.len() + prefix.len(),
            )
        }
    };

    let next = format!("{}{addition}{}", &text[..start], &text[end..]);
    (next, sel_start..sel_start + placeholder.len())
}

/// Append a quoted timestamp line, separated from existing content by a
/// blank line.
pub fn append_timestamp(text: &str, stamp: &str) -> String {
    let separator = if text.trim().is_empty() { "" } else { "\n\n" };
    format!("{text}{separator}> {stamp}\n")
}

/// Local date-time in the `M/D/YYYY, h:mm:ss AM` shape.
pub fn format_stamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
}

impl Unit {
    fn name(self) -> &'static str {
        match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
        }
    }
}

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Round half toward +∞, like JavaScript's `Math.round`.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// English relative label for `at` as seen from `now`: "now",
/// "12 seconds ago", "1 minute ago", "yesterday", "in 2 hours".
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (at - now).num_milliseconds();
    let abs = diff.abs();
    let (value, unit) = if abs < MINUTE_MS {
        (round_half_up(diff as f64 / 1000.0), Unit::Second)
    } else if abs < HOUR_MS {
        (round_half_up(diff as f64 / MINUTE_MS as f64), Unit::Minute)
    } else if abs < DAY_MS {
        (round_half_up(diff as f64 / HOUR_MS as f64), Unit::Hour)
    } else {
        (round_half_up(diff as f64 / DAY_MS as f64), Unit::Day)
    };

    match (unit, value) {
        (Unit::Second, 0) => return "now".to_string(),
        (Unit::Minute, 0) => return "this minute".to_string(),
        (Unit::Hour, 0) => return "this hour".to_string(),
        (Unit::Day, 0) => return "today".to_string(),
        (Unit::Day, -1) => return "yesterday".to_string(),
        (Unit::Day, 1) => return "tomorrow".to_string(),
        _ => {}
    }

    let n = value.unsigned_abs();
    let plural = if n == 1 { "" } else { "s" };
    if value < 0 {
        format!("{n} {}{plural} ago", unit.name())
    } else {
        format!("in {n} {}{plural}", unit.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use pretty_assertions::assert_eq;

    fn opt(id: &str) -> &'static FormattingOption {
        formatting_option(id).unwrap()
    }

    #[test]
    fn wrap_selection() {
        let (text, sel) = apply_formatting("make this bold", opt("bold"), 10..14);
        assert_eq!(text, "make this **bold**");
        assert_eq!(&text[sel], "bold");
    }

    #[test]
    fn wrap_empty_selection_uses_placeholder() {
        let (text, sel) = apply_formatting("", opt("code"), 0..0);
        assert_eq!(text, "`snippet`");
        assert_eq!(sel, 1..8);
    }

    #[test]
    fn prefix_starts_new_line_when_needed() {
        let (text, sel) = apply_formatting("first line", opt("bullet"), 10..10);
        assert_eq!(text, "first line\n- List item");
        assert_eq!(&text[sel], "List item");

        let (text, _) = apply_formatting("first\n", opt("quote"), 6..6);
        assert_eq!(text, "first\n> Insight worth quoting");
    }

    #[test]
    fn selection_is_clamped_and_ordered() {
        let (text, sel) = apply_formatting("héllo", opt("italic"), 99..2);
        // 2 is inside 'é' → floors to 1; 99 clamps to the end.
        assert_eq!(text, "h_éllo_");
        assert_eq!(&text[sel], "éllo");
    }

    #[test]
    fn timestamp_block_spacing() {
        assert_eq!(append_timestamp("", "T"), "> T\n");
        assert_eq!(append_timestamp("   ", "T"), "   > T\n");
        assert_eq!(append_timestamp("notes", "T"), "notes\n\n> T\n");
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(" one  two\nthree\t"), 3);
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let ago = |ms: i64| relative_time(now - TimeDelta::milliseconds(ms), now);
        assert_eq!(ago(0), "now");
        assert_eq!(ago(400), "now");
        assert_eq!(ago(1500), "1 second ago");
        assert_eq!(ago(12_000), "12 seconds ago");
        assert_eq!(ago(60_000), "1 minute ago");
        assert_eq!(ago(3 * HOUR_MS), "3 hours ago");
        assert_eq!(ago(DAY_MS), "yesterday");
        assert_eq!(ago(5 * DAY_MS), "5 days ago");
        assert_eq!(relative_time(now + TimeDelta::seconds(30), now), "in 30 seconds");
    }
}
