//! main.rs
//! Entry point for noice

use noice_tui::app::AppState;
use noice_tui::config::Config;
use noice_tui::core::fm::can_open_dir;
use noice_tui::core::formatter::Filter;
use noice_tui::core::proc::CommandSpawner;
use noice_tui::core::terminal;
use noice_tui::utils::cli::{CliAction, handle_args};
use noice_tui::utils::{default_filter, is_interactive, logging, resolve_initial_dir};

use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[noice] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let arg = match handle_args() {
        CliAction::Exit => return ExitCode::SUCCESS,
        CliAction::Usage => return ExitCode::FAILURE,
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path) => Some(path),
    };

    logging::init();

    if !is_interactive() {
        eprintln!("stdin or stdout is not a tty");
        return ExitCode::FAILURE;
    }

    let initial_dir = resolve_initial_dir(arg.as_deref());
    if let Err(e) = can_open_dir(&initial_dir) {
        let shown = arg.unwrap_or_else(|| initial_dir.display().to_string());
        eprintln!("{}: {}", shown, e);
        return ExitCode::FAILURE;
    }

    let config = Config::load();

    let result = Filter::new(default_filter())
        .and_then(|filter| AppState::new(&config, initial_dir, filter))
        .and_then(|mut app| terminal::run_terminal(&mut app, &mut CommandSpawner));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("noice: {}", e);
            ExitCode::FAILURE
        }
    }
}
