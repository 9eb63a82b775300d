//! Configuration for noice.
//!
//! - [load]: the [Config] entry point, file lookup and default generation.
//! - [general]: idle command, input tick and initial sort order.
//! - [display]: labels and cursor marker.
//! - [input]: the ordered key binding table.
//! - [assoc]: the ordered file association table.

pub mod assoc;
pub mod display;
pub mod general;
pub mod input;
pub mod load;

pub use display::Display;
pub use general::{General, InternalGeneral};
pub use input::BindingSpec;
pub use load::{Config, RawConfig};
