//! Directory listing logic for noice.
//!
//! Provides the [Entry] record shown in the listing and [list_dir], which reads a
//! directory, keeps the names accepted by a filter predicate and stats every kept
//! entry without following symlinks.

use crate::core::error::BrowseError;
use crate::core::path;

use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Owner execute permission bit.
const EXEC_USER: u32 = 0o100;

/// The kind of a directory entry as seen by a non-following stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    Socket,
    Fifo,
    Executable,
    Other,
}

impl EntryKind {
    pub fn from_metadata(md: &Metadata) -> Self {
        use std::os::unix::fs::{FileTypeExt, PermissionsExt};

        let ft = md.file_type();
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_socket() {
            EntryKind::Socket
        } else if ft.is_fifo() {
            EntryKind::Fifo
        } else if md.permissions().mode() & EXEC_USER != 0 {
            EntryKind::Executable
        } else if ft.is_file() {
            EntryKind::Regular
        } else {
            EntryKind::Other
        }
    }

    /// Character appended to the name in the listing, if any.
    pub fn indicator(self) -> Option<char> {
        match self {
            EntryKind::Directory => Some('/'),
            EntryKind::Symlink => Some('@'),
            EntryKind::Socket => Some('='),
            EntryKind::Fifo => Some('|'),
            EntryKind::Executable => Some('*'),
            EntryKind::Regular | EntryKind::Other => None,
        }
    }

    /// Whether the entry size is added to the directory total.
    #[inline]
    pub fn counts_toward_total(self) -> bool {
        matches!(self, EntryKind::Regular | EntryKind::Executable)
    }

    /// Whether the listing shows a size column for this kind.
    #[inline]
    pub fn shows_size(self) -> bool {
        matches!(
            self,
            EntryKind::Regular | EntryKind::Executable | EntryKind::Other
        )
    }
}

/// A single entry of a directory listing.
/// Immutable once created; the listing is rebuilt as a whole on every repopulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Box<OsStr>,
    kind: EntryKind,
    modified: SystemTime,
    size: u64,
}

impl Entry {
    pub fn new(name: OsString, kind: EntryKind, modified: SystemTime, size: u64) -> Self {
        Entry {
            name: name.into_boxed_os_str(),
            kind,
            modified,
            size,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of [list_dir]: the unordered entries and the summed size of the
/// regular and executable ones.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub total_size: u64,
}

/// Reads `dir` and returns every entry whose name is accepted by `keep`.
///
/// The self and parent pseudo entries are never part of the result.
///
/// # Errors
/// [BrowseError::DirectoryUnreadable] if the directory cannot be opened.
/// [BrowseError::Stat] if a listed entry cannot be stat'ed, which callers treat as fatal.
pub fn list_dir<F>(dir: &Path, keep: F) -> Result<Listing, BrowseError>
where
    F: Fn(&OsStr) -> bool,
{
    let read = fs::read_dir(dir).map_err(|e| BrowseError::unreadable(dir, e))?;
    let mut listing = Listing {
        entries: Vec::with_capacity(64),
        total_size: 0,
    };

    for dent in read {
        let dent = readable(dir, dent)?;

        let name = dent.file_name();
        if !keep(&name) {
            continue;
        }

        let full = path::join(dir, &name);
        let md = fs::symlink_metadata(&full).map_err(|source| BrowseError::Stat {
            path: full.clone(),
            source,
        })?;
        let modified = md.modified().map_err(|source| BrowseError::Stat {
            path: full.clone(),
            source,
        })?;

        let kind = EntryKind::from_metadata(&md);
        if kind.counts_toward_total() {
            listing.total_size += md.len();
        }
        listing
            .entries
            .push(Entry::new(name, kind, modified, md.len()));
    }

    Ok(listing)
}

/// A failed directory read mid-listing makes the whole directory unreadable.
fn readable<T>(dir: &Path, dent: io::Result<T>) -> Result<T, BrowseError> {
    dent.map_err(|e| BrowseError::unreadable(dir, e))
}

/// Checks that `dir` can still be opened for listing.
pub fn can_open_dir(dir: &Path) -> io::Result<()> {
    fs::read_dir(dir).map(|_| ())
}
