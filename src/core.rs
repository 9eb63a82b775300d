//! Core runtime logic for noice.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and the [Entry] record.
//! - [formatter]: filter compilation, sorting and display helpers for sizes and times.
//! - [path]: joining, normalizing and matching paths.
//! - [proc]: launching external programs and the file association table.
//! - [terminal]: the [Frontend] seam, terminal setup/teardown and the loop driver.
//! - [error]: the [BrowseError] taxonomy.

pub mod error;
pub mod fm;
pub mod formatter;
pub mod path;
pub mod proc;
pub mod terminal;

pub use error::BrowseError;
pub use fm::{Entry, EntryKind, Listing, list_dir};
pub use formatter::{Filter, SortOrder, format_file_size, format_file_time, sort_entries};
pub use proc::{Associations, CommandSpawner, Spawner};
pub use terminal::{Frontend, TerminalFrontend, run_suspended};
