//! UI-related tests for noice
//!
//! These tests render [View] snapshots into ratatui's in-memory backend and check
//! the header, the listing window and the status line.
//!
//! Directory based tests create temporary directories which are cleaned up afterwards.

use noice_tui::app::AppState;
use noice_tui::config::{Config, Display};
use noice_tui::core::fm::{Entry, EntryKind};
use noice_tui::core::formatter::{Filter, SHOW_ALL, SortOrder, truncate_to_width};
use noice_tui::core::path;
use noice_tui::ui::{Status, View, render};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use std::error;
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;
use tempfile::tempdir;

fn lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn draw(width: u16, height: u16, view: &View) -> Result<Vec<String>, Box<dyn error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| render(f, view))?;
    Ok(lines(terminal.backend().buffer()))
}

fn entries(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| {
            Entry::new(
                OsString::from(format!("f{i:02}")),
                EntryKind::Regular,
                SystemTime::UNIX_EPOCH,
                0,
            )
        })
        .collect()
}

#[test]
fn test_ui_sanitization_and_width() {
    let cases = vec![
        ("short.txt", 10),
        ("very_long_filename.txt", 10),
        ("🦀_crab.rs", 10),
        ("\t_tab", 10),
    ];

    for (input, width) in cases {
        let result = truncate_to_width(input, width);
        let actual = unicode_width::UnicodeWidthStr::width(result.as_str());
        assert!(actual <= width, "'{}' -> '{}' ({})", input, result, actual);
        assert!(!result.chars().any(|c| c.is_control()));
    }
}

#[test]
fn test_header_listing_and_status() -> Result<(), Box<dyn error::Error>> {
    let display = Display::default();
    let list = entries(3);
    let view = View {
        cwd: Path::new("/srv"),
        entries: &list,
        cursor: 1,
        total_size: 2048,
        order: SortOrder::Name,
        display: &display,
        status: Status::Message("No association"),
    };

    let screen = draw(40, 8, &view)?;
    assert!(screen[0].starts_with("cwd: /srv"));
    assert!(screen[0].ends_with("2 KiB"));
    assert_eq!(screen[1], "");
    assert!(screen[2].starts_with("   f00"));
    assert!(screen[3].starts_with(" > f01"));
    assert!(screen[4].starts_with("   f02"));
    assert_eq!(screen[7], "No association");
    Ok(())
}

#[test]
fn test_listing_scrolls_with_cursor() -> Result<(), Box<dyn error::Error>> {
    let display = Display::default();
    let list = entries(50);
    let view = View {
        cwd: Path::new("/"),
        entries: &list,
        cursor: 30,
        total_size: 0,
        order: SortOrder::Name,
        display: &display,
        status: Status::Prompt {
            label: "filter: ",
            input: "f3",
        },
    };

    // 10 lines leave 6 listing rows, centred on the cursor
    let screen = draw(30, 10, &view)?;
    assert!(screen[2].starts_with("   f27"));
    assert!(screen[5].starts_with(" > f30"));
    assert!(screen[7].starts_with("   f32"));
    assert_eq!(screen[9], "filter: f3");
    Ok(())
}

#[test]
fn test_app_view_renders_directory() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let root = path::normalize(dir.path());
    let mut f = File::create(root.join("data.bin"))?;
    f.write_all(&[0u8; 1024])?;
    File::create(root.join(".rc"))?;

    let config = Config::default();
    let app = AppState::new(&config, root.clone(), Filter::new(SHOW_ALL)?)?;

    let screen = draw(60, 6, &app.view())?;
    assert!(screen[0].contains(&root.display().to_string()));
    assert!(screen[0].ends_with("1 KiB"));
    assert!(screen[2].starts_with(" > .rc"));
    assert!(screen[3].starts_with("   data.bin"));
    assert!(screen[3].ends_with("1 KiB"));
    Ok(())
}
