//! Terminal rendering and input for noice.
//!
//! Defines the [Frontend] seam the navigation loop talks to and the
//! crossterm/ratatui backed [TerminalFrontend]. Raw mode and the alternate screen
//! are held for as long as a [TerminalFrontend] lives and are given back around
//! external programs by [run_suspended].

use crate::app::AppState;
use crate::core::error::BrowseError;
use crate::core::proc::Spawner;
use crate::ui::{self, View, render::listing_rows};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::warn;

/// Everything the navigation loop needs from the screen and the keyboard.
pub trait Frontend {
    /// Draws one frame.
    fn render(&mut self, view: &View) -> Result<(), BrowseError>;

    /// Waits up to `timeout` for a key. `None` means the wait timed out.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>, BrowseError>;

    /// Blocks until a key arrives.
    fn read_key(&mut self) -> Result<KeyEvent, BrowseError>;

    /// Number of listing rows currently visible.
    fn viewport_rows(&self) -> usize;

    /// Gives the terminal back to the shell.
    fn suspend(&mut self) -> Result<(), BrowseError>;

    /// Takes the terminal again after [Frontend::suspend].
    fn resume(&mut self) -> Result<(), BrowseError>;
}

/// Runs `f` with the terminal released and takes it back afterwards, also when `f` fails.
pub fn run_suspended<T, F>(frontend: &mut dyn Frontend, f: F) -> Result<T, BrowseError>
where
    F: FnOnce() -> Result<T, BrowseError>,
{
    frontend.suspend()?;
    let result = f();
    frontend.resume()?;
    result
}

/// Key reported for terminal resizes: bound to nothing, so the loop simply redraws.
fn resize_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Null, KeyModifiers::NONE)
}

/// Runs `undo` when a setup step after raw mode has failed.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// [Frontend] drawing with ratatui on a crossterm backend.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    suspended: bool,
}

impl TerminalFrontend {
    /// Initializes the terminal in raw mode and alternate screen.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = undo_on_error(Self::enter_screen(), || {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen, Show);
            let _ = disable_raw_mode();
        })?;
        Ok(TerminalFrontend {
            terminal,
            suspended: false,
        })
    }

    fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    fn release(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if !self.suspended
            && let Err(e) = self.release()
        {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

impl Frontend for TerminalFrontend {
    fn render(&mut self, view: &View) -> Result<(), BrowseError> {
        self.terminal.draw(|f| ui::render(f, view))?;
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>, BrowseError> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !event::poll(left)? {
                return Ok(None);
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                Event::Resize(_, _) => return Ok(Some(resize_key())),
                _ => {}
            }
        }
    }

    fn read_key(&mut self) -> Result<KeyEvent, BrowseError> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => return Ok(resize_key()),
                _ => {}
            }
        }
    }

    fn viewport_rows(&self) -> usize {
        crossterm::terminal::size()
            .map(|(_, h)| listing_rows(h))
            .unwrap_or(0)
    }

    fn suspend(&mut self) -> Result<(), BrowseError> {
        self.release()?;
        self.suspended = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), BrowseError> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        enable_raw_mode()?;
        self.suspended = false;
        self.terminal.clear()?;
        Ok(())
    }
}

/// Takes the terminal, runs the navigation loop and restores the terminal.
///
/// Blocks until quit. Returns the fatal error that ended the loop, if any.
pub fn run_terminal(app: &mut AppState, spawner: &mut dyn Spawner) -> Result<(), BrowseError> {
    let mut frontend = TerminalFrontend::acquire()?;
    let result = app.run(&mut frontend, spawner);
    drop(frontend);
    result
}
