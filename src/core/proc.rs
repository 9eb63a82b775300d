//! The noice processes module.
//!
//! Implements the [Spawner] seam used to hand the terminal over to external
//! programs, the [CommandSpawner] that backs it with [std::process::Command],
//! and the [Associations] table that maps file names to opener programs.
//!
//! Spawning blocks until the child exits. Suspending and resuming the terminal
//! around a spawn is the caller's job (see `core::terminal::run_suspended`).

use crate::core::error::BrowseError;

use regex::bytes::{Regex, RegexBuilder};
use tracing::{debug, warn};

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Command;

/// Launches external programs on behalf of the browser.
pub trait Spawner {
    /// Runs `program` and waits for it to exit.
    ///
    /// `extra` is passed as a single argument before `arg`. The child runs in
    /// `dir` when given, otherwise in the browser's own working directory.
    fn spawn(
        &mut self,
        program: &str,
        arg: Option<&OsStr>,
        dir: Option<&Path>,
        extra: Option<&str>,
    ) -> Result<(), BrowseError>;
}

/// [Spawner] backed by [std::process::Command].
#[derive(Debug, Default)]
pub struct CommandSpawner;

impl Spawner for CommandSpawner {
    fn spawn(
        &mut self,
        program: &str,
        arg: Option<&OsStr>,
        dir: Option<&Path>,
        extra: Option<&str>,
    ) -> Result<(), BrowseError> {
        let spawn_err = |source: io::Error| BrowseError::Spawn {
            program: program.to_string(),
            source,
        };

        if which::which(program).is_err() {
            return Err(spawn_err(io::Error::new(
                io::ErrorKind::NotFound,
                "command not found",
            )));
        }

        let mut cmd = Command::new(program);
        if let Some(extra) = extra {
            cmd.arg(extra);
        }
        if let Some(arg) = arg {
            cmd.arg(arg);
        }
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(spawn_err)?;
        debug!(program, ?arg, ?dir, ?extra, %status, "child exited");
        Ok(())
    }
}

/// One association rule: a file name pattern and the program that opens it.
#[derive(Debug, Clone)]
pub struct Association {
    pattern: Regex,
    program: String,
}

impl Association {
    pub fn new(pattern: &str, program: &str) -> Result<Self, BrowseError> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Association {
            pattern,
            program: program.to_string(),
        })
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Ordered association table, first match wins.
#[derive(Debug, Clone, Default)]
pub struct Associations {
    rules: Vec<Association>,
}

impl Associations {
    /// Compiles `(pattern, program)` pairs, skipping patterns that do not compile.
    pub fn compile<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = pairs
            .into_iter()
            .filter_map(|(pattern, program)| match Association::new(pattern, program) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(pattern, error = %e, "skipping association");
                    None
                }
            })
            .collect();
        Associations { rules }
    }

    /// Returns the program associated with `name`, if any rule matches.
    pub fn open_with(&self, name: &OsStr) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(name.as_encoded_bytes()))
            .map(Association::program)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
