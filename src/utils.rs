//! Miscellaneous utility functions for noice.
//!
//! - [cli]: argument handling.
//! - [helpers]: home directory, default filter, starting directory.
//! - [logging]: the optional tracing file subscriber.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{default_filter, get_home, is_interactive, resolve_initial_dir};
