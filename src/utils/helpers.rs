//! Helper functions for noice.
//!
//! Home directory lookup, the privilege dependent default filter and
//! resolution of the starting directory.

use crate::core::formatter::{HIDE_DOTFILES, SHOW_ALL};
use crate::core::path::normalize;

use crossterm::tty::IsTty;
use std::path::PathBuf;

/// The user's home directory.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Initial filter: root sees everything, everybody else starts with dotfiles hidden.
pub fn default_filter() -> &'static str {
    // SAFETY: getuid has no preconditions and cannot fail.
    let uid = unsafe { libc::getuid() };
    filter_for_uid(uid)
}

fn filter_for_uid(uid: libc::uid_t) -> &'static str {
    if uid == 0 { SHOW_ALL } else { HIDE_DOTFILES }
}

/// Starting directory: the argument if given, else the working directory, else `/`.
///
/// Relative paths are resolved against the working directory and the result is
/// lexically normalized.
pub fn resolve_initial_dir(arg: Option<&str>) -> PathBuf {
    let cwd = std::env::current_dir().ok();
    let path = match (arg, cwd) {
        (Some(arg), Some(cwd)) => cwd.join(arg),
        (Some(arg), None) => PathBuf::from(arg),
        (None, Some(cwd)) => cwd,
        (None, None) => PathBuf::from("/"),
    };
    normalize(&path)
}

/// Both stdin and stdout are terminals.
pub fn is_interactive() -> bool {
    std::io::stdin().is_tty() && std::io::stdout().is_tty()
}
