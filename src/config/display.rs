//! Display configuration options for noice
//!
//! This module defines the display configuration options which are read from the noice.toml
//! configuration file.

use serde::Deserialize;

/// Display configuration options
///
/// Labels and markers used by the renderer. Every option has a default so a
/// partial `[display]` table is enough.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Display {
    cwd_label: String,
    cursor: String,
    show_mtime: bool,
}

impl Display {
    #[inline]
    pub fn cwd_label(&self) -> &str {
        &self.cwd_label
    }

    #[inline]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Blank prefix of the same width as the cursor, used for unselected rows.
    pub fn cursor_blank(&self) -> String {
        " ".repeat(unicode_width::UnicodeWidthStr::width(self.cursor.as_str()))
    }

    /// Show a modification time column while the listing is in time order.
    #[inline]
    pub fn show_mtime(&self) -> bool {
        self.show_mtime
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            cwd_label: "cwd: ".into(),
            cursor: " > ".into(),
            show_mtime: true,
        }
    }
}
