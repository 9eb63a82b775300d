//! Prompts shown on the status line.
//!
//! Both prompts are built on [Frontend::render] and [Frontend::read_key] so every
//! frontend shares the same editing rules.

use crate::core::error::BrowseError;
use crate::core::terminal::Frontend;
use crate::ui::{Status, View};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One step of incremental filter typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKey {
    Append(char),
    Backspace,
    Submit,
}

/// A plain character without Ctrl or Alt.
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Reads a whole line after `label`.
///
/// Returns `None` when the prompt is cancelled or submitted empty.
pub fn prompt_line(
    frontend: &mut dyn Frontend,
    view: View,
    label: &str,
) -> Result<Option<String>, BrowseError> {
    let mut input = String::new();
    loop {
        frontend.render(&view.with_status(Status::Prompt {
            label,
            input: &input,
        }))?;
        let key = frontend.read_key()?;

        if is_cancel(&key) {
            return Ok(None);
        }
        match key.code {
            KeyCode::Enter if input.is_empty() => return Ok(None),
            KeyCode::Enter => return Ok(Some(input)),
            KeyCode::Backspace => {
                input.pop();
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    input.push(c);
                }
            }
        }
    }
}

/// Shows `partial` after `label` and reads one editing key.
///
/// Enter and Esc both submit. Keys that do not edit are skipped.
pub fn prompt_incremental(
    frontend: &mut dyn Frontend,
    view: View,
    label: &str,
    partial: &str,
) -> Result<TypeKey, BrowseError> {
    frontend.render(&view.with_status(Status::Prompt {
        label,
        input: partial,
    }))?;
    loop {
        let key = frontend.read_key()?;
        match key.code {
            KeyCode::Enter | KeyCode::Esc => return Ok(TypeKey::Submit),
            KeyCode::Backspace => return Ok(TypeKey::Backspace),
            _ => {
                if let Some(c) = typed_char(&key) {
                    return Ok(TypeKey::Append(c));
                }
            }
        }
    }
}
