//! Path building and matching for noice.
//!
//! Paths are kept as plain absolute strings without trailing separators
//! (except the root itself) so that an entry's full path can be compared
//! byte for byte when restoring the cursor after a repopulation.

use crate::core::fm::Entry;

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Joins `name` onto `dir`.
///
/// An absolute `name` replaces `dir` entirely. The root directory does not get a
/// duplicate separator. The result is lexically normalized.
pub fn join(dir: &Path, name: impl AsRef<OsStr>) -> PathBuf {
    normalize(&dir.join(Path::new(name.as_ref())))
}

/// Lexically normalizes a path: drops `.` components, resolves `..` against the
/// preceding component and strips trailing separators.
///
/// `..` at the root stays at the root. Relative paths keep leading `..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Returns the logical parent of `path`.
///
/// There is nothing to ascend to at the root, at `.` or in a path without any
/// separator; `None` is returned for those.
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    let raw = path.as_os_str().as_encoded_bytes();
    if raw == b"/" || raw == b"." || !raw.contains(&b'/') {
        return None;
    }
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(p) => Some(p.to_path_buf()),
        None => None,
    }
}

/// Finds the position of the entry whose joined path equals `target`.
///
/// A miss, or no target at all, yields `0` so the cursor lands at the top.
pub fn index_of(entries: &[Entry], dir: &Path, target: Option<&Path>) -> usize {
    let Some(target) = target else {
        return 0;
    };
    entries
        .iter()
        .position(|e| join(dir, e.name()) == target)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fm::EntryKind;
    use std::ffi::OsString;
    use std::time::SystemTime;

    fn entry(name: &str) -> Entry {
        Entry::new(
            OsString::from(name),
            EntryKind::Regular,
            SystemTime::UNIX_EPOCH,
            0,
        )
    }

    #[test]
    fn join_handles_root_and_absolute_names() {
        assert_eq!(join(Path::new("/"), "etc"), PathBuf::from("/etc"));
        assert_eq!(join(Path::new("/usr"), "lib"), PathBuf::from("/usr/lib"));
        assert_eq!(join(Path::new("/usr"), "/opt"), PathBuf::from("/opt"));
        assert_eq!(
            join(Path::new("/usr"), "/opt/").as_os_str(),
            OsStr::new("/opt")
        );
    }

    #[test]
    fn join_normalizes_relative_input() {
        assert_eq!(join(Path::new("/usr/lib"), ".."), PathBuf::from("/usr"));
        assert_eq!(join(Path::new("/usr"), "./share/"), PathBuf::from("/usr/share"));
        assert_eq!(join(Path::new("/"), "../.."), PathBuf::from("/"));
    }

    #[test]
    fn join_keeps_unusual_names_intact() {
        assert_eq!(
            join(Path::new("/tmp"), "with space"),
            PathBuf::from("/tmp/with space")
        );
        assert_eq!(join(Path::new("/tmp"), "...").as_os_str(), "/tmp/...");
    }

    #[test]
    fn parent_of_terminal_conditions() {
        assert_eq!(parent_of(Path::new("/")), None);
        assert_eq!(parent_of(Path::new(".")), None);
        assert_eq!(parent_of(Path::new("relative")), None);
    }

    #[test]
    fn parent_of_regular_paths() {
        assert_eq!(parent_of(Path::new("/usr")), Some(PathBuf::from("/")));
        assert_eq!(
            parent_of(Path::new("/usr/share/doc")),
            Some(PathBuf::from("/usr/share"))
        );
        assert_eq!(parent_of(Path::new("a/b")), Some(PathBuf::from("a")));
    }

    #[test]
    fn index_of_finds_joined_path() {
        let entries = vec![entry("a.txt"), entry("b.log"), entry("c")];
        let dir = Path::new("/tmp");
        assert_eq!(index_of(&entries, dir, Some(Path::new("/tmp/b.log"))), 1);
        assert_eq!(index_of(&entries, dir, Some(Path::new("/tmp/c"))), 2);
    }

    #[test]
    fn index_of_misses_reset_to_top() {
        let entries = vec![entry("a.txt"), entry("b.log")];
        let dir = Path::new("/tmp");
        assert_eq!(index_of(&entries, dir, None), 0);
        assert_eq!(index_of(&entries, dir, Some(Path::new("/tmp/zzz"))), 0);
        assert_eq!(index_of(&entries, dir, Some(Path::new("/var/b.log"))), 0);
        assert_eq!(index_of(&[], dir, Some(Path::new("/tmp/a.txt"))), 0);
    }
}
