//! Command-line argument parsing and help for noice.
//!
//! This module handles the optional directory argument and the informational flags.
//!
//! When invoked with no args/flags (noice), the browser starts in the working directory.

use crate::app::keymap::Action;
use crate::config::Config;
use crate::config::input::default_bindings;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
    /// Bad usage; the caller exits with a failure status.
    Usage,
}

/// Parses the process arguments and runs the informational flags.
pub fn handle_args() -> CliAction {
    parse_args(std::env::args().skip(1))
}

/// Parses arguments (without the program name).
pub fn parse_args<I>(args: I) -> CliAction
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        print_usage();
        return CliAction::Usage;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            print_usage();
            CliAction::Usage
        }
    }
}

fn print_usage() {
    eprintln!("usage: noice [dir]");
}

fn print_version() {
    println!("noice {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"noice - small terminal directory browser

USAGE:
  noice [DIR]

DIR:
  Directory to open (defaults to the current directory)

OPTIONS:
      --init              Generate the default configuration
      --keybinds          Display the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of noice

ENVIRONMENT:
  NOICE_CONFIG            Override the default config path
  NOICE_LOG               Write diagnostics to this file
  NOICE_LOG_LEVEL         Log filter, e.g. "info" (default "debug")
"#
    );
}

/// The default binding table, one action per line with all of its keys.
pub fn keybinds_text() -> String {
    let table = default_bindings();
    let mut out = String::from("Key Bindings\n\n");
    for action in Action::ALL {
        let keys: Vec<String> = table
            .iter()
            .filter(|b| b.action() == *action)
            .map(|b| match b.run() {
                Some(run) => format!("{:?} ({})", b.key(), run),
                None => format!("{:?}", b.key()),
            })
            .collect();
        out.push_str(&format!("  {:<18}{}\n", action.name(), keys.join(", ")));
    }
    out
}

fn print_keybinds() {
    println!("{}", keybinds_text());
}
