//! Browse state and the repopulation pipeline for noice.
//!
//! [NavState] owns the current directory, the entry list, the cursor, the active
//! filter, the sort order and the single-slot history. The list is rebuilt as a
//! whole by [NavState::populate]; cursor movement never touches the filesystem.

use crate::core::error::BrowseError;
use crate::core::fm::{Entry, list_dir};
use crate::core::formatter::{Filter, SortOrder, sort_entries};
use crate::core::path;

use std::path::{Path, PathBuf};
use tracing::debug;

/// Holds the navigation, selection and file list state of the browser.
#[derive(Debug)]
pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<Entry>,
    cursor: usize,
    filter: Filter,
    order: SortOrder,
    history: Option<PathBuf>,
    total_size: u64,
}

impl NavState {
    /// Creates an empty state. Nothing is listed until the first [NavState::populate].
    pub fn new(dir: PathBuf, filter: Filter, order: SortOrder) -> Self {
        Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
            filter,
            order,
            history: None,
            total_size: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    #[inline]
    pub fn history(&self) -> Option<&Path> {
        self.history.as_deref()
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Full path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected()
            .map(|e| path::join(&self.current_dir, e.name()))
    }

    // History

    /// Stores `path` in the history slot, replacing whatever was there.
    pub fn set_history(&mut self, path: PathBuf) {
        self.history = Some(path);
    }

    /// Stores the selected entry's path so the next repopulation lands on it again.
    pub fn remember_selection(&mut self) {
        self.history = self.selected_path();
    }

    // Repopulation

    /// Lists `dir` through `filter`, sorts by `order` and commits the result.
    ///
    /// The history slot is consumed by every call: on success the cursor moves to
    /// the entry whose path equals the stored history, or to the top on a miss.
    /// On failure nothing but the history slot changes.
    pub fn populate(
        &mut self,
        dir: PathBuf,
        filter: Filter,
        order: SortOrder,
    ) -> Result<(), BrowseError> {
        let history = self.history.take();

        let mut listing = list_dir(&dir, |name| filter.is_match(name))?;
        sort_entries(&mut listing.entries, order);
        let cursor = path::index_of(&listing.entries, &dir, history.as_deref());

        debug!(
            dir = %dir.display(),
            filter = filter.source(),
            count = listing.entries.len(),
            cursor,
            "populated"
        );

        self.current_dir = dir;
        self.entries = listing.entries;
        self.total_size = listing.total_size;
        self.filter = filter;
        self.order = order;
        self.cursor = cursor;
        Ok(())
    }

    /// Repopulates the current directory with the current filter and order.
    pub fn refresh(&mut self) -> Result<(), BrowseError> {
        self.populate(self.current_dir.clone(), self.filter.clone(), self.order)
    }

    // Cursor movement

    pub fn next(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn page_down(&mut self, step: usize) {
        self.cursor = (self.cursor + step).min(self.last_index());
    }

    pub fn page_up(&mut self, step: usize) {
        self.cursor = self.cursor.saturating_sub(step);
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.last_index();
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::{HIDE_DOTFILES, SHOW_ALL};
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(nav: &NavState) -> Vec<String> {
        nav.entries().iter().map(|e| e.name_str().into_owned()).collect()
    }

    fn sandbox() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["a.txt", "b.log", ".hidden"] {
            File::create(dir.path().join(name))?;
        }
        fs::create_dir(dir.path().join("sub"))?;
        Ok(dir)
    }

    #[test]
    fn populate_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sandbox()?;
        let root = path::normalize(dir.path());
        let mut nav = NavState::new(root.clone(), Filter::new(HIDE_DOTFILES)?, SortOrder::Name);
        nav.refresh()?;
        assert_eq!(names(&nav), ["a.txt", "b.log", "sub"]);

        nav.populate(root, Filter::new(SHOW_ALL)?, SortOrder::Name)?;
        assert_eq!(names(&nav), [".hidden", "a.txt", "b.log", "sub"]);
        assert_eq!(nav.cursor(), 0);
        Ok(())
    }

    #[test]
    fn history_restores_cursor_once() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sandbox()?;
        let root = path::normalize(dir.path());
        let mut nav = NavState::new(root.clone(), Filter::new(HIDE_DOTFILES)?, SortOrder::Name);
        nav.set_history(root.join("b.log"));
        nav.refresh()?;
        assert_eq!(nav.cursor(), 1);
        assert!(nav.history().is_none());

        nav.refresh()?;
        assert_eq!(nav.cursor(), 0);
        Ok(())
    }

    #[test]
    fn failed_populate_keeps_state() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sandbox()?;
        let root = path::normalize(dir.path());
        let mut nav = NavState::new(root.clone(), Filter::new(HIDE_DOTFILES)?, SortOrder::Name);
        nav.refresh()?;
        nav.last();

        let result = nav.populate(root.join("missing"), Filter::new(SHOW_ALL)?, SortOrder::Time);
        assert!(matches!(result, Err(BrowseError::DirectoryUnreadable { .. })));
        assert_eq!(nav.current_dir(), root);
        assert_eq!(nav.filter().source(), HIDE_DOTFILES);
        assert_eq!(nav.order(), SortOrder::Name);
        assert_eq!(nav.cursor(), 2);
        Ok(())
    }

    #[test]
    fn cursor_moves_are_clamped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sandbox()?;
        let mut nav = NavState::new(
            path::normalize(dir.path()),
            Filter::new(SHOW_ALL)?,
            SortOrder::Name,
        );
        nav.refresh()?;

        nav.prev();
        assert_eq!(nav.cursor(), 0);
        nav.page_down(10);
        assert_eq!(nav.cursor(), 3);
        nav.next();
        assert_eq!(nav.cursor(), 3);
        nav.page_up(2);
        assert_eq!(nav.cursor(), 1);
        nav.first();
        assert_eq!(nav.cursor(), 0);
        nav.last();
        assert_eq!(nav.selected().map(|e| e.name_str().into_owned()).as_deref(), Some("sub"));
        Ok(())
    }

    #[test]
    fn empty_listing_keeps_cursor_at_zero() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut nav = NavState::new(
            path::normalize(dir.path()),
            Filter::new(SHOW_ALL)?,
            SortOrder::Name,
        );
        nav.refresh()?;
        nav.next();
        nav.last();
        nav.page_down(5);
        assert_eq!(nav.cursor(), 0);
        assert!(nav.selected_path().is_none());
        Ok(())
    }
}
