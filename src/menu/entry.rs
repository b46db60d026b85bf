//! A single menu entry

use crate::menu::{Category, MenuCollection};

/// Descriptive data reported by the audio service for a device or stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryInfo {
    /// Stable machine identifier
    pub name: String,
    /// Display label
    pub description: String,
    pub tooltip: Option<String>,
    /// Icon name, only rendered for stream entries
    pub icon: Option<String>,
}

impl EntryInfo {
    /// Create info with a name and label and no tooltip or icon
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tooltip: None,
            icon: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One entry of a [`MenuCollection`]
///
/// Stream entries (Input/Output) own a submenu of mirror entries. A mirror is
/// its own entry, keyed by the index of the device it routes to; its owning
/// stream is found through [`MenuCollection::parent`].
#[derive(Debug)]
pub struct MenuEntry<H> {
    pub(crate) category: Category,
    pub(crate) index: u32,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) icon: Option<String>,
    pub(crate) handle: H,
    pub(crate) submenu: Option<MenuCollection<H>>,
}

impl<H> MenuEntry<H> {
    pub(crate) fn new(
        category: Category,
        index: u32,
        info: &EntryInfo,
        handle: H,
        submenu: Option<MenuCollection<H>>,
    ) -> Self {
        Self {
            category,
            index,
            name: info.name.clone(),
            description: info.description.clone(),
            icon: info.icon.clone(),
            handle,
            submenu,
        }
    }

    pub(crate) fn mirror(
        category: Category,
        index: u32,
        name: &str,
        description: &str,
        handle: H,
    ) -> Self {
        Self {
            category,
            index,
            name: name.to_string(),
            description: description.to_string(),
            icon: None,
            handle,
            submenu: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Visual handle owned by the tray shell
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Submenu of mirror entries (Input/Output entries only)
    pub fn submenu(&self) -> Option<&MenuCollection<H>> {
        self.submenu.as_ref()
    }
}
