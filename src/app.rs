//! Application module root for noice.
//!
//! Re-exports the main app state and navigation types.
//!
//! Modules:
//! - [handlers]: the method behind every action.
//! - [keymap]: the ordered key binding table.
//! - [nav]: browse state and repopulation.
//! - [prompt]: line and incremental prompts.
//! - [state]: [AppState] and the navigation loop.

pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod prompt;
pub mod state;

pub use keymap::{Action, Keymap};
pub use nav::NavState;
pub use state::{AppState, KeypressResult};
