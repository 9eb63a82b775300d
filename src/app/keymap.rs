//! Key mapping and action dispatch system for noice
//!
//! Parses the configured binding table into an ordered [Keymap] and defines
//! the [Action] set the navigation state machine understands.

use crate::config::BindingSpec;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use tracing::warn;

/// Every operation a key can be bound to.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Action {
    Quit,
    Ascend,
    Descend,
    Filter,
    TypeFilter,
    Next,
    Prev,
    PageDown,
    PageUp,
    First,
    Last,
    ChangeDir,
    GoHome,
    ToggleSort,
    Redraw,
    Run,
    RunWithArg,
    ToggleDotfiles,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Quit,
        Action::Ascend,
        Action::Descend,
        Action::Filter,
        Action::TypeFilter,
        Action::Next,
        Action::Prev,
        Action::PageDown,
        Action::PageUp,
        Action::First,
        Action::Last,
        Action::ChangeDir,
        Action::GoHome,
        Action::ToggleSort,
        Action::Redraw,
        Action::Run,
        Action::RunWithArg,
        Action::ToggleDotfiles,
    ];

    /// The name used for this action in config files and `--keybinds`.
    pub fn name(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::Ascend => "ascend",
            Action::Descend => "descend",
            Action::Filter => "filter",
            Action::TypeFilter => "type_filter",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::First => "first",
            Action::Last => "last",
            Action::ChangeDir => "change_dir",
            Action::GoHome => "go_home",
            Action::ToggleSort => "toggle_sort",
            Action::Redraw => "redraw",
            Action::Run => "run",
            Action::RunWithArg => "run_with_arg",
            Action::ToggleDotfiles => "toggle_dotfiles",
        }
    }
}

impl TryFrom<String> for Action {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == name)
            .ok_or_else(|| format!("unknown action `{name}`"))
    }
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyEvent> for Key {
    fn from(ev: KeyEvent) -> Self {
        Key {
            code: ev.code,
            modifiers: ev.modifiers,
        }
    }
}

/// A parsed binding: the key, its action and the program parameters
/// used by [Action::Run] and [Action::RunWithArg].
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub key: Key,
    pub action: Action,
    pub run: Option<String>,
    pub env: Option<String>,
    pub args: Option<String>,
}

impl Binding {
    /// The program to launch: the `env` variable when set and non-empty, else `run`.
    pub fn program(&self) -> Option<String> {
        self.env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|v| !v.is_empty())
            .or_else(|| self.run.clone())
    }
}

/// Ordered binding table. The first binding whose key matches wins.
#[derive(Debug, Default)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Keymap {
    /// Builds the keymap from the configured binding specs.
    /// Unparseable keys are reported and skipped.
    pub fn from_specs(specs: &[BindingSpec]) -> Self {
        let mut bindings = Vec::with_capacity(specs.len());
        for spec in specs {
            match parse_key(spec.key()) {
                Some(key) => bindings.push(Binding {
                    key,
                    action: spec.action(),
                    run: spec.run().map(Into::into),
                    env: spec.env().map(Into::into),
                    args: spec.args().map(Into::into),
                }),
                None => warn!(key = spec.key(), "unrecognized key, binding skipped"),
            }
        }
        Keymap { bindings }
    }

    /// Looks up the binding for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<&Binding> {
        let k = Key::from(key);

        if let Some(b) = self.find(k) {
            return Some(b);
        }

        // Terminals report shifted symbols like '?' or '$' with SHIFT set.
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.find(k2);
        }
        None
    }

    fn find(&self, key: Key) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.key == key)
    }

    #[inline]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

/// Parses `"j"`, `"ctrl+h"`, `"<c-h>"`, `"pagedown"` and friends into a [Key].
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // Single characters are taken literally so "+", "-", "<" can be bound.
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}
