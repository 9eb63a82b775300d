//! Error taxonomy for noice.
//!
//! Every failure the browser can run into is one [BrowseError] variant.
//! Most of them are recoverable: the navigation loop shows them on the status line
//! and keeps its previous state. Only [BrowseError::is_fatal] errors leave the loop.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    /// The directory could not be opened, e.g. permissions changed while browsing.
    #[error("{path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry that was just enumerated could not be stat'ed.
    #[error("lstat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("No association")]
    NoAssociation,

    #[error("Unsupported file")]
    Unsupported,

    #[error("HOME is not set")]
    NoHome,

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Drawing or reading from the terminal failed.
    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}

impl BrowseError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BrowseError::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Fatal errors end the session; everything else is reported and browsing continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BrowseError::Stat { .. } | BrowseError::Terminal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stat_and_terminal_errors_are_fatal() {
        let stat = BrowseError::Stat {
            path: PathBuf::from("/tmp/x"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(stat.is_fatal());
        assert!(BrowseError::Terminal(io::Error::other("gone")).is_fatal());

        let unreadable =
            BrowseError::unreadable("/root", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!unreadable.is_fatal());
        assert!(!BrowseError::NoAssociation.is_fatal());
        assert!(!BrowseError::Unsupported.is_fatal());
        assert!(!BrowseError::NoHome.is_fatal());
    }

    #[test]
    fn unreadable_message_names_the_path() {
        let err =
            BrowseError::unreadable("/secret", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.to_string().starts_with("/secret: "));
    }
}
