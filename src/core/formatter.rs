//! Sorting, filtering and display formatting for entries in noice.
//!
//! [Filter] is a compiled, case-insensitive regex over entry names.
//! [SortOrder] selects the comparator used by [sort_entries].
//! The remaining helpers format sizes and times for the listing.

use crate::core::error::BrowseError;
use crate::core::fm::Entry;

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use regex::bytes::{Regex, RegexBuilder};
use unicode_width::UnicodeWidthChar;

use std::ffi::OsStr;
use std::time::SystemTime;

/// Filter that hides dotfiles, used for unprivileged sessions.
pub const HIDE_DOTFILES: &str = "^[^.]";
/// Filter that accepts every name.
pub const SHOW_ALL: &str = ".";

/// A successfully compiled filter pattern together with its source text.
///
/// A `Filter` can only be built from a pattern that compiles, so holding one
/// is proof the pattern is valid.
#[derive(Debug, Clone)]
pub struct Filter {
    source: String,
    regex: Regex,
}

impl Filter {
    /// Compiles `source` as a case-insensitive extended regex.
    pub fn new(source: &str) -> Result<Self, BrowseError> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Filter {
            source: source.to_string(),
            regex,
        })
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn is_match(&self, name: &OsStr) -> bool {
        self.regex.is_match(name.as_encoded_bytes())
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Filter {}

/// Comparator used to order the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Byte-wise, case-sensitive name order.
    #[default]
    Name,
    /// Most recently modified first.
    Time,
}

impl SortOrder {
    pub fn from_mtime_flag(mtime: bool) -> Self {
        if mtime { SortOrder::Time } else { SortOrder::Name }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Name => SortOrder::Time,
            SortOrder::Time => SortOrder::Name,
        }
    }
}

/// Sorts the entries in place. Time order is stable for equal timestamps.
pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    match order {
        SortOrder::Name => entries.sort_by(|a, b| {
            a.name()
                .as_encoded_bytes()
                .cmp(b.name().as_encoded_bytes())
        }),
        SortOrder::Time => entries.sort_by(|a, b| b.modified().cmp(&a.modified())),
    }
}

/// Formats a byte count in binary units, e.g. `1.50 KiB`.
pub fn format_file_size(size: u64) -> String {
    format_size(size, BINARY)
}

/// Formats a modification time in local time.
pub fn format_file_time(modified: SystemTime) -> String {
    let dt: DateTime<Local> = DateTime::from(modified);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncates `text` so its display width does not exceed `max_width`.
/// Control characters are dropped.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_width));
    let mut width = 0;
    for c in text.chars() {
        if c.is_control() {
            continue;
        }
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fm::EntryKind;

    use rand::rng;
    use rand::seq::SliceRandom;
    use std::ffi::OsString;
    use std::time::Duration;

    fn entry(name: &str, secs: u64) -> Entry {
        Entry::new(
            OsString::from(name),
            EntryKind::Regular,
            SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
            0,
        )
    }

    #[test]
    fn filter_rejects_invalid_pattern() {
        let result = Filter::new("(unclosed");
        assert!(matches!(result, Err(BrowseError::InvalidPattern(_))));
    }

    #[test]
    fn default_filters() -> Result<(), Box<dyn std::error::Error>> {
        let hide = Filter::new(HIDE_DOTFILES)?;
        assert!(hide.is_match(OsStr::new("a.txt")));
        assert!(!hide.is_match(OsStr::new(".hidden")));

        let all = Filter::new(SHOW_ALL)?;
        assert!(all.is_match(OsStr::new(".hidden")));
        assert!(all.is_match(OsStr::new("a.txt")));
        Ok(())
    }

    #[test]
    fn filter_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let f = Filter::new(r"\.log$")?;
        assert!(f.is_match(OsStr::new("b.log")));
        assert!(f.is_match(OsStr::new("B.LOG")));
        assert!(!f.is_match(OsStr::new("a.txt")));
        assert_eq!(f.source(), r"\.log$");
        Ok(())
    }

    #[test]
    fn name_order_is_bytewise() {
        let mut entries = vec![
            entry("b.log", 0),
            entry("a.txt", 0),
            entry(".hidden", 0),
            entry("B", 0),
            entry("_x", 0),
        ];
        entries.shuffle(&mut rng());
        sort_entries(&mut entries, SortOrder::Name);
        let names: Vec<_> = entries.iter().map(|e| e.name_str().into_owned()).collect();
        assert_eq!(names, vec![".hidden", "B", "_x", "a.txt", "b.log"]);

        for pair in entries.windows(2) {
            assert!(pair[0].name().as_encoded_bytes() < pair[1].name().as_encoded_bytes());
        }
    }

    #[test]
    fn time_order_is_newest_first() {
        let mut entries: Vec<Entry> = (0..20)
            .map(|i| entry(&format!("file_{i}"), 1_000 + i * 10))
            .collect();
        entries.shuffle(&mut rng());
        sort_entries(&mut entries, SortOrder::Time);

        for pair in entries.windows(2) {
            assert!(pair[0].modified() > pair[1].modified());
        }
        assert_eq!(entries[0].name_str(), "file_19");
    }

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::Name.toggled(), SortOrder::Time);
        assert_eq!(SortOrder::Time.toggled(), SortOrder::Name);
        assert_eq!(SortOrder::from_mtime_flag(true), SortOrder::Time);
        assert_eq!(SortOrder::default(), SortOrder::Name);
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("very_long_filename.txt", 9), "very_long");
        assert_eq!(truncate_to_width("🦀crab", 3), "🦀c");
        assert_eq!(truncate_to_width("tab\there", 10), "tabhere");
    }

    #[test]
    fn sizes_use_binary_units() {
        assert!(format_file_size(10).ends_with(" B"));
        assert!(format_file_size(1536).ends_with("KiB"));
        assert!(format_file_size(3 * 1024 * 1024).ends_with("MiB"));
    }
}
