//! audiotray - tray menus for audio devices and streams
//!
//! Keeps the menu state of a system-tray audio controller in sync with the
//! audio server's devices and streams, and turns clicks into server commands.

pub mod audio;
pub mod config;
pub mod error;
pub mod menu;
#[cfg(feature = "tray")]
pub mod tray;

pub use error::{AudioTrayError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
