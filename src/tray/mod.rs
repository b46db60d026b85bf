//! Native tray shell backed by muda menus and a tray-icon
//!
//! Renders the menu registry into a native context menu. Click events arrive
//! on the toolkit's thread and are forwarded into the menu controller's
//! channel.

mod icon;
mod shell;

pub use icon::{default_theme_dir, glyph, IconState, TrayIcons, ICON_SIZE};
pub use shell::{MudaHandle, MudaShell};
