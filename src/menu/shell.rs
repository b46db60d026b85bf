//! Interface to the presentation layer

use crate::error::Result;
use crate::menu::Category;

/// Where a radio item is rendered
#[derive(Debug)]
pub enum Placement<'a, H> {
    /// The top-level section of a category
    TopLevel(Category),
    /// Inside the submenu container of a stream entry
    Submenu {
        stream: Category,
        stream_index: u32,
        container: &'a H,
    },
}

/// Click subscription attached to a rendered item
///
/// The shell hands this back to [`MenuRegistry::handle_click`] when the item
/// is activated.
///
/// [`MenuRegistry::handle_click`]: crate::menu::MenuRegistry::handle_click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickBinding {
    /// A top-level device or server entry
    Primary { category: Category, index: u32 },
    /// A mirror of device `index` inside the submenu of stream `stream`
    Mirror {
        category: Category,
        stream: u32,
        index: u32,
    },
}

/// Renders menu entries and owns their visual handles
pub trait TrayShell {
    /// Opaque handle to a rendered item
    type Handle;

    /// Render a radio-style item joined to the selection group of its placement
    fn create_radio_item(
        &mut self,
        placement: Placement<'_, Self::Handle>,
        label: &str,
        tooltip: Option<&str>,
        click: ClickBinding,
    ) -> Result<Self::Handle>;

    /// Render a submenu container in the top-level section of `category`
    fn create_submenu_item(
        &mut self,
        category: Category,
        label: &str,
        tooltip: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Self::Handle>;

    fn remove_radio_item(
        &mut self,
        placement: Placement<'_, Self::Handle>,
        handle: Self::Handle,
    ) -> Result<()>;

    fn remove_submenu_item(&mut self, category: Category, handle: Self::Handle) -> Result<()>;

    /// Reflect the active member of a selection group
    fn set_selected(&mut self, handle: &Self::Handle, selected: bool) {
        let _ = (handle, selected);
    }
}
