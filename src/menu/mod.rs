//! Menu state: category collections, cross-linked stream submenus, and the
//! interface to the tray shell that renders them

mod category;
mod collection;
mod controller;
mod entry;
mod headless;
mod registry;
mod shell;

pub use category::{Category, CategoryBehavior, MirrorClick, PrimaryClick, Visual};
pub use collection::{MenuCollection, SelectionGroup};
pub use controller::{ControllerEvent, MenuController};
pub use entry::{EntryInfo, MenuEntry};
pub use headless::{HeadlessShell, ShellCall, VisualId};
pub use registry::MenuRegistry;
pub use shell::{ClickBinding, Placement, TrayShell};
