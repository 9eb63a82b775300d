//! Drawing of the browser screen.
//!
//! - [render]: header, listing and status line of a [View] snapshot.

pub mod render;

pub use render::{Status, View, render};
