//! Input action handler methods for noice.
//!
//! This module implements the [AppState] methods behind every [Action]. Each
//! transition builds its candidate directory and filter first and only commits
//! through [NavState::populate](crate::app::NavState::populate), so a failure
//! leaves the previous state in place.

use crate::app::keymap::{Action, Binding};
use crate::app::prompt::prompt_line;
use crate::app::state::{AppState, KeypressResult};
use crate::core::error::BrowseError;
use crate::core::fm::can_open_dir;
use crate::core::formatter::{Filter, SHOW_ALL};
use crate::core::path;
use crate::core::proc::Spawner;
use crate::core::terminal::{Frontend, run_suspended};

use std::fs::{Metadata, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What a fresh stat of the selected entry says it is.
enum Target {
    Directory,
    Regular,
    Other,
}

/// Opens `path` without blocking and stats the open descriptor.
///
/// The listing's cached kind may be stale and symlinks need their target kind.
fn classify(path: &Path) -> Result<Target, BrowseError> {
    let file = OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
        .map_err(|e| BrowseError::unreadable(path, e))?;
    let md: Metadata = file.metadata().map_err(|e| BrowseError::unreadable(path, e))?;

    let ft = md.file_type();
    Ok(if ft.is_dir() {
        Target::Directory
    } else if ft.is_file() {
        Target::Regular
    } else {
        Target::Other
    })
}

fn check_dir(dir: &Path) -> Result<(), BrowseError> {
    can_open_dir(dir).map_err(|e| BrowseError::unreadable(dir, e))
}

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Handles one bound action.
    pub(super) fn handle_action(
        &mut self,
        binding: &Binding,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<KeypressResult, BrowseError> {
        debug!(action = ?binding.action, "key");
        let page = (frontend.viewport_rows() / 2).max(1);

        match binding.action {
            Action::Quit => return Ok(KeypressResult::Quit),
            Action::Ascend => self.ascend()?,
            Action::Descend => self.descend(frontend, spawner)?,
            Action::Filter => self.set_filter(frontend)?,
            Action::TypeFilter => self.typing = Some(String::new()),
            Action::Next => self.nav.next(),
            Action::Prev => self.nav.prev(),
            Action::PageDown => self.nav.page_down(page),
            Action::PageUp => self.nav.page_up(page),
            Action::First => self.nav.first(),
            Action::Last => self.nav.last(),
            Action::ChangeDir => self.change_dir(frontend)?,
            Action::GoHome => self.go_home()?,
            Action::ToggleSort => self.toggle_sort()?,
            Action::Redraw => self.redraw()?,
            Action::Run => self.run_program(binding, false, frontend, spawner)?,
            Action::RunWithArg => self.run_program(binding, true, frontend, spawner)?,
            Action::ToggleDotfiles => self.toggle_dotfiles()?,
        }
        Ok(KeypressResult::Continue)
    }

    /// Moves into `dir` with the initial filter, keeping the sort order.
    fn enter_dir(&mut self, dir: PathBuf) -> Result<(), BrowseError> {
        let order = self.nav.order();
        self.nav.populate(dir, self.initial_filter.clone(), order)
    }

    /// Relists the current directory with `filter`, landing on the current selection.
    fn refilter(&mut self, filter: Filter) -> Result<(), BrowseError> {
        self.nav.remember_selection();
        let dir = self.nav.current_dir().to_path_buf();
        let order = self.nav.order();
        self.nav.populate(dir, filter, order)
    }

    /// Goes to the parent directory; the directory left behind becomes the history.
    pub(super) fn ascend(&mut self) -> Result<(), BrowseError> {
        let Some(parent) = path::parent_of(self.nav.current_dir()) else {
            return Ok(());
        };
        check_dir(&parent)?;
        let from = self.nav.current_dir().to_path_buf();
        self.nav.set_history(from);
        self.enter_dir(parent)
    }

    /// Descends into the selected directory or opens the selected file.
    pub(super) fn descend(
        &mut self,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<(), BrowseError> {
        let Some(target) = self.nav.selected_path() else {
            return Ok(());
        };

        match classify(&target)? {
            Target::Directory => {
                check_dir(&target)?;
                self.enter_dir(target)
            }
            Target::Regular => {
                let name = self
                    .nav
                    .selected()
                    .map(|e| e.name().to_os_string())
                    .unwrap_or_default();
                let program = self
                    .config
                    .associations()
                    .open_with(&name)
                    .ok_or(BrowseError::NoAssociation)?;
                run_suspended(frontend, || {
                    spawner.spawn(program, Some(target.as_os_str()), None, None)
                })
            }
            Target::Other => Err(BrowseError::Unsupported),
        }
    }

    /// Replaces the filter with a prompted pattern; an empty answer restores the initial filter.
    pub(super) fn set_filter(&mut self, frontend: &mut dyn Frontend) -> Result<(), BrowseError> {
        let filter = match prompt_line(frontend, self.view(), "filter: ")? {
            Some(source) => Filter::new(&source)?,
            None => self.initial_filter.clone(),
        };
        self.refilter(filter)
    }

    /// Jumps to a prompted directory, relative to the current one. No history.
    pub(super) fn change_dir(&mut self, frontend: &mut dyn Frontend) -> Result<(), BrowseError> {
        let Some(input) = prompt_line(frontend, self.view(), "chdir: ")? else {
            return Ok(());
        };
        let dir = path::join(self.nav.current_dir(), input);
        check_dir(&dir)?;
        self.enter_dir(dir)
    }

    /// Jumps to `$HOME`; the directory left behind becomes the history.
    pub(super) fn go_home(&mut self) -> Result<(), BrowseError> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or(BrowseError::NoHome)?;
        let dir = path::join(self.nav.current_dir(), home);
        check_dir(&dir)?;
        let from = self.nav.current_dir().to_path_buf();
        self.nav.set_history(from);
        self.enter_dir(dir)
    }

    pub(super) fn toggle_sort(&mut self) -> Result<(), BrowseError> {
        self.nav.remember_selection();
        let dir = self.nav.current_dir().to_path_buf();
        let filter = self.nav.filter().clone();
        let order = self.nav.order().toggled();
        self.nav.populate(dir, filter, order)
    }

    /// Relists the current directory, keeping the selection.
    pub(super) fn redraw(&mut self) -> Result<(), BrowseError> {
        self.nav.remember_selection();
        self.nav.refresh()
    }

    /// Switches between the initial filter and showing everything. The cursor goes to the top.
    pub(super) fn toggle_dotfiles(&mut self) -> Result<(), BrowseError> {
        let filter = if *self.nav.filter() != self.initial_filter {
            self.initial_filter.clone()
        } else {
            Filter::new(SHOW_ALL)?
        };
        let dir = self.nav.current_dir().to_path_buf();
        let order = self.nav.order();
        self.nav.populate(dir, filter, order)
    }

    /// Runs the binding's program in the current directory, optionally on the selected name.
    fn run_program(
        &mut self,
        binding: &Binding,
        with_arg: bool,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<(), BrowseError> {
        let Some(program) = binding.program() else {
            return Ok(());
        };
        let arg = if with_arg {
            match self.nav.selected() {
                Some(entry) => Some(entry.name().to_os_string()),
                None => return Ok(()),
            }
        } else {
            None
        };

        let dir = self.nav.current_dir();
        let extra = binding.args.as_deref();
        run_suspended(frontend, || {
            spawner.spawn(&program, arg.as_deref(), Some(dir), extra)
        })
    }
}
