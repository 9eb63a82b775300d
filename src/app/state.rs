//! Application State and main controller module for noice.
//!
//! This module defines the overall [AppState] struct, which holds
//! - the configuration and the parsed keymap,
//! - the browse state ([NavState]),
//! - the initial filter every directory change falls back to,
//! - the incremental filter text while typing mode is active,
//! - the idle tick counter and the status line message.
//!
//! [AppState::run] is the blocking navigation loop: render, wait for one key or
//! a timeout tick, dispatch, repeat. Recoverable errors end up on the status line;
//! fatal ones leave the loop.

use crate::app::NavState;
use crate::app::keymap::Keymap;
use crate::app::prompt::{TypeKey, prompt_incremental};
use crate::config::Config;
use crate::core::error::BrowseError;
use crate::core::formatter::{Filter, SortOrder};
use crate::core::proc::Spawner;
use crate::core::terminal::{Frontend, run_suspended};
use crate::ui::{Status, View};

use std::path::PathBuf;
use tracing::{error, warn};

/// Result of processing one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Quit,
}

/// Main struct which holds the central Application state of noice
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) nav: NavState,
    pub(super) initial_filter: Filter,
    pub(super) typing: Option<String>,
    pub(super) idle: u32,
    pub(super) message: Option<String>,
}

impl<'a> AppState<'a> {
    /// Builds the state and lists `dir` for the first time.
    ///
    /// # Errors
    /// Any listing error: at startup there is no previous state to fall back to.
    pub fn new(config: &'a Config, dir: PathBuf, initial_filter: Filter) -> Result<Self, BrowseError> {
        let order = SortOrder::from_mtime_flag(config.general().mtime_order());
        let mut nav = NavState::new(dir, initial_filter.clone(), order);
        nav.refresh()?;

        Ok(Self {
            config,
            keymap: Keymap::from_specs(config.bindings()),
            nav,
            initial_filter,
            typing: None,
            idle: 0,
            message: None,
        })
    }

    // Getters/ accessors

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Text typed so far while incremental filter mode is active.
    #[inline]
    pub fn typing(&self) -> Option<&str> {
        self.typing.as_deref()
    }

    /// Snapshot of everything the frontend draws.
    pub fn view(&self) -> View<'_> {
        View {
            cwd: self.nav.current_dir(),
            entries: self.nav.entries(),
            cursor: self.nav.cursor(),
            total_size: self.nav.total_size(),
            order: self.nav.order(),
            display: self.config.display(),
            status: self.message.as_deref().map_or(Status::Empty, Status::Message),
        }
    }

    /// Runs the navigation loop until quit or a fatal error.
    pub fn run(
        &mut self,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<(), BrowseError> {
        while self.process(frontend, spawner)? == KeypressResult::Continue {}
        Ok(())
    }

    /// Handles one input: a key, a timeout tick or one keystroke of filter typing.
    ///
    /// Recoverable errors become the status line message and the loop goes on.
    /// Only fatal errors are returned.
    pub fn process(
        &mut self,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<KeypressResult, BrowseError> {
        let outcome = if self.typing.is_some() {
            self.type_step(frontend).map(|_| KeypressResult::Continue)
        } else {
            self.step(frontend, spawner)
        };

        match outcome {
            Err(e) if e.is_fatal() => {
                error!(error = %e, "fatal");
                Err(e)
            }
            Err(e) => {
                self.report(e);
                Ok(KeypressResult::Continue)
            }
            ok => ok,
        }
    }

    /// Draws, waits for one key or one timeout tick and handles it.
    fn step(
        &mut self,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<KeypressResult, BrowseError> {
        frontend.render(&self.view())?;

        let Some(key) = frontend.poll_key(self.config.general().tick())? else {
            self.idle_tick(frontend, spawner)?;
            return Ok(KeypressResult::Continue);
        };

        self.idle = 0;
        self.message = None;

        let Some(binding) = self.keymap.lookup(key).cloned() else {
            return Ok(KeypressResult::Continue);
        };
        self.handle_action(&binding, frontend, spawner)
    }

    /// One keystroke of incremental filter typing.
    ///
    /// Each accepted keystroke recompiles the typed text and repopulates. An invalid
    /// pattern keeps typing mode open with the previous filter still active; submitting
    /// an invalid pattern leaves typing mode and reports the error.
    fn type_step(&mut self, frontend: &mut dyn Frontend) -> Result<(), BrowseError> {
        let partial = self.typing.clone().unwrap_or_default();
        let key = prompt_incremental(frontend, self.view(), "type: ", &partial)?;

        let mut text = partial;
        let submitted = match key {
            TypeKey::Append(c) => {
                text.push(c);
                false
            }
            TypeKey::Backspace => {
                text.pop();
                false
            }
            TypeKey::Submit => true,
        };
        self.typing = if submitted { None } else { Some(text.clone()) };

        let filter = if text.is_empty() {
            self.initial_filter.clone()
        } else {
            match Filter::new(&text) {
                Ok(filter) => filter,
                Err(_) if !submitted => return Ok(()),
                Err(e) => return Err(e),
            }
        };

        self.nav.remember_selection();
        let dir = self.nav.current_dir().to_path_buf();
        let order = self.nav.order();
        match self.nav.populate(dir, filter, order) {
            Err(e) if !e.is_fatal() && !submitted => {
                warn!(error = %e, "repopulation failed while typing");
                Ok(())
            }
            other => other,
        }
    }

    /// Counts one timeout tick and fires the idle command when the count is reached.
    fn idle_tick(
        &mut self,
        frontend: &mut dyn Frontend,
        spawner: &mut dyn Spawner,
    ) -> Result<(), BrowseError> {
        self.idle = self.idle.saturating_add(1);
        let general = self.config.general();
        if general.idle_timeout() == 0 || self.idle != general.idle_timeout() {
            return Ok(());
        }
        self.idle = 0;
        let cmd = general.idle_cmd();
        run_suspended(frontend, || spawner.spawn(cmd, None, None, None))
    }

    fn report(&mut self, e: BrowseError) {
        warn!(error = %e, "recoverable");
        self.message = Some(e.to_string());
    }
}
