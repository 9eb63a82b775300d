//! UI renderer implementation.
//!
//! Draws a [View] snapshot: the header with the current directory and the total
//! size, the scrolling listing and the status line. This module stays pure
//! rendering; it never touches browse state.

use crate::config::Display;
use crate::core::fm::Entry;
use crate::core::formatter::{SortOrder, format_file_size, format_file_time, truncate_to_width};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::ops::Range;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Lines taken by everything except the listing: header, blank, blank, status.
pub const CHROME_ROWS: u16 = 4;

/// What the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status<'a> {
    #[default]
    Empty,
    /// A warning or error message.
    Message(&'a str),
    /// An open prompt with its label and the text typed so far.
    Prompt { label: &'a str, input: &'a str },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub cwd: &'a Path,
    pub entries: &'a [Entry],
    pub cursor: usize,
    pub total_size: u64,
    pub order: SortOrder,
    pub display: &'a Display,
    pub status: Status<'a>,
}

impl<'a> View<'a> {
    /// Same view with a different status line.
    pub fn with_status(self, status: Status<'a>) -> Self {
        View { status, ..self }
    }
}

/// Number of listing rows available in a terminal of `height` lines.
#[inline]
pub fn listing_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

/// Returns the range of entries shown in `rows` lines with the cursor at `cur`.
///
/// The window keeps the cursor centred once it is half a page away from either end.
pub fn visible_window(n: usize, cur: usize, rows: usize) -> Range<usize> {
    let lines = rows.min(n);
    if lines == 0 {
        return 0..0;
    }
    let half = lines / 2;
    let start = if cur < half {
        0
    } else if cur >= n - half {
        n - lines
    } else {
        cur - half
    };
    start..start + lines
}

/// Render function which draws the whole browser on each frame.
pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, view, chunks[0]);
    render_listing(frame, view, chunks[2]);
    render_status(frame, view, chunks[4]);
}

fn render_header(frame: &mut Frame, view: &View, area: Rect) {
    let width = area.width as usize;
    let size = format_file_size(view.total_size);
    let size_w = size.width();

    let left = format!("{}{}", view.display.cwd_label(), view.cwd.display());
    let left = truncate_to_width(&left, width.saturating_sub(size_w + 1));
    let pad = width.saturating_sub(left.width() + size_w);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::raw(size),
        ])),
        area,
    );
}

fn render_listing(frame: &mut Frame, view: &View, area: Rect) {
    let window = visible_window(view.entries.len(), view.cursor, area.height as usize);
    let width = area.width as usize;

    let lines: Vec<Line> = view.entries[window.clone()]
        .iter()
        .zip(window)
        .map(|(entry, idx)| {
            let selected = idx == view.cursor;
            let text = format_row(entry, selected, view.display, view.order, width);
            if selected {
                Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::raw(text)
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, view: &View, area: Rect) {
    let width = area.width as usize;
    let line = match view.status {
        Status::Empty => Line::default(),
        Status::Message(msg) => Line::raw(truncate_to_width(msg, width)),
        Status::Prompt { label, input } => {
            // Keep the end of long input visible.
            let room = width.saturating_sub(label.width());
            let mut shown = input;
            while shown.width() > room {
                let mut chars = shown.chars();
                chars.next();
                shown = chars.as_str();
            }
            Line::from(vec![Span::raw(label.to_string()), Span::raw(shown.to_string())])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Formats one listing row to at most `width` columns.
///
/// Layout: cursor marker, name, kind indicator, then right aligned the modification
/// time (time order only) and the size (regular, executable and other kinds).
pub fn format_row(
    entry: &Entry,
    selected: bool,
    display: &Display,
    order: SortOrder,
    width: usize,
) -> String {
    let marker = if selected {
        display.cursor().to_string()
    } else {
        display.cursor_blank()
    };

    let mut right = String::new();
    if order == SortOrder::Time && display.show_mtime() {
        right.push_str(&format_file_time(entry.modified()));
    }
    if entry.kind().shows_size() {
        if !right.is_empty() {
            right.push_str("  ");
        }
        right.push_str(&format_file_size(entry.size()));
    }

    let indicator = entry.kind().indicator().map(String::from).unwrap_or_default();
    let right_w = if right.is_empty() { 0 } else { right.width() + 1 };
    let name_room = width.saturating_sub(marker.width() + indicator.width() + right_w);
    let name = truncate_to_width(&entry.name_str(), name_room);

    let left = format!("{marker}{name}{indicator}");
    if right.is_empty() || left.width() + right_w > width {
        return truncate_to_width(&left, width);
    }
    let pad = width - left.width() - right.width();
    format!("{left}{}{right}", " ".repeat(pad))
}
