//! The main config loading module for noice.
//!
//! Handles loading and deserializing settings from `noice.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the internal [RawConfig] used for parsing and processing.
//!
//! Also implements default config initialization when `noice.toml` is not present.

use crate::config::assoc::{self, AssocRule, default_assocs};
use crate::config::input::{BindingSpec, default_bindings};
use crate::config::{Display, General, InternalGeneral};
use crate::core::proc::Associations;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    assoc: Vec<AssocRule>,
    bindings: Vec<BindingSpec>,
}

/// Default values for RawConfig
/// These are the same as the internal defaults used by noice.
impl Default for RawConfig {
    fn default() -> Self {
        RawConfig {
            general: General::default(),
            display: Display::default(),
            assoc: default_assocs(),
            bindings: default_bindings(),
        }
    }
}

/// Main configuration struct for noice
/// This struct holds the processed configuration options used by noice.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    associations: Associations,
    bindings: Vec<BindingSpec>,
}

/// Conversion from RawConfig to Config
/// Compiles the association patterns and clamps out of range values.
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            associations: assoc::compile(&raw.assoc),
            bindings: raw.bindings,
        }
    }
}

/// Public methods for loading and accessing the configuration
impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Error parsing config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a configuration from toml text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Into::into)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn associations(&self) -> &Associations {
        &self.associations
    }

    #[inline]
    pub fn bindings(&self) -> &[BindingSpec] {
        &self.bindings
    }

    /// Determine the default configuration file path.
    /// Checks the NOICE_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/noice/noice.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("NOICE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("noice/noice.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/noice/noice.toml");
        }
        PathBuf::from("noice.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &PathBuf) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# noice.toml - default configuration for noice
#
# Commented values are the internal defaults.

[general]
# mtime_order = false      # start sorted by modification time
# idle_timeout = 0         # idle ticks before idle_cmd runs, 0 disables
# idle_cmd = "rain"
# tick_ms = 1000           # input wait per tick

[display]
# cwd_label = "cwd: "
# cursor = " > "
# show_mtime = true        # show times while sorted by modification time

# File associations, first match wins. Patterns are case-insensitive regexes
# matched against the file name. Defining any [[assoc]] replaces the defaults.
#
# [[assoc]]
# pattern = '\.(avi|mp4|mkv|mp3|ogg|flac|mov)$'
# program = "mpv"
#
# [[assoc]]
# pattern = '\.pdf$'
# program = "mupdf"
#
# [[assoc]]
# pattern = "."
# program = "less"

# Key bindings, first match wins. Defining any [[bindings]] replaces the defaults.
# Actions: quit, ascend, descend, filter, type_filter, next, prev, page_down,
# page_up, first, last, change_dir, go_home, toggle_sort, redraw, run,
# run_with_arg, toggle_dotfiles.
#
# [[bindings]]
# key = "e"
# action = "run_with_arg"
# run = "vi"
# env = "EDITOR"
# args = "-R"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::Action;
    use std::ffi::OsStr;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn empty_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse("")?;
        assert_eq!(config.bindings(), default_bindings().as_slice());
        assert_eq!(config.associations().len(), default_assocs().len());
        assert_eq!(config.display().cursor(), " > ");
        Ok(())
    }

    #[test]
    fn tables_replace_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(
            r#"
            [general]
            mtime_order = true
            idle_timeout = 5
            tick_ms = 250

            [[assoc]]
            pattern = '\.md$'
            program = "glow"

            [[bindings]]
            key = "x"
            action = "quit"
            "#,
        )?;
        assert!(config.general().mtime_order());
        assert_eq!(config.general().idle_timeout(), 5);
        assert_eq!(config.general().tick(), Duration::from_millis(250));
        assert_eq!(config.associations().len(), 1);
        assert_eq!(
            config.associations().open_with(OsStr::new("README.md")),
            Some("glow")
        );
        assert_eq!(config.bindings().len(), 1);
        assert_eq!(config.bindings()[0].action(), Action::Quit);
        Ok(())
    }

    #[test]
    fn generated_default_parses() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/noice.toml");
        Config::generate_default(&path)?;
        let content = fs::read_to_string(&path)?;
        let config = Config::parse(&content)?;
        assert_eq!(config.bindings().len(), default_bindings().len());

        assert!(Config::generate_default(&path).is_err());
        Ok(())
    }
}
