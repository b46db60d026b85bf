//! Tray shell rendering menu entries with muda

use crate::error::{AudioTrayError, Result};
use crate::menu::{Category, ClickBinding, ControllerEvent, Placement, TrayShell};
use crossbeam_channel::Sender;
use muda::{CheckMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem, Submenu};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Visual handle of a rendered entry
#[derive(Clone)]
pub enum MudaHandle {
    /// Radio-style device or mirror item
    Item(CheckMenuItem),
    /// Stream entry holding its mirrors
    Submenu(Submenu),
}

/// Tray shell with one top-level submenu section per category
pub struct MudaShell {
    root: Menu,
    sections: HashMap<Category, Submenu>,
    bindings: Arc<Mutex<HashMap<MenuId, ClickBinding>>>,
    quit: MenuItem,
    tray_icon: Option<TrayIcon>,
}

impl MudaShell {
    /// Build the root menu with an empty section per category
    pub fn new() -> Result<Self> {
        let root = Menu::new();
        let mut sections = HashMap::new();

        for category in Category::ALL {
            let section = Submenu::new(category.section_label(), true);
            root.append(&section).map_err(AudioTrayError::shell)?;
            sections.insert(category, section);
        }

        let quit = MenuItem::new("Quit", true, None);
        root.append(&PredefinedMenuItem::separator())
            .map_err(AudioTrayError::shell)?;
        root.append(&quit).map_err(AudioTrayError::shell)?;

        Ok(Self {
            root,
            sections,
            bindings: Arc::new(Mutex::new(HashMap::new())),
            quit,
            tray_icon: None,
        })
    }

    pub fn root(&self) -> &Menu {
        &self.root
    }

    /// Click binding of a rendered item
    pub fn binding(&self, id: &MenuId) -> Option<ClickBinding> {
        self.bindings.lock().get(id).copied()
    }

    /// Forward every click on a rendered item into the controller channel
    ///
    /// The quit item turns into [`ControllerEvent::Shutdown`].
    pub fn forward_clicks(&self, events: Sender<ControllerEvent>) {
        let bindings = Arc::clone(&self.bindings);
        let quit = self.quit.id().clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            let forwarded = if event.id() == &quit {
                Some(ControllerEvent::Shutdown)
            } else {
                bindings.lock().get(event.id()).copied().map(ControllerEvent::Click)
            };
            match forwarded {
                Some(forwarded) => {
                    if events.send(forwarded).is_err() {
                        warn!("Failed to forward click - controller stopped");
                    }
                }
                None => debug!("Ignoring click on unbound menu item {:?}", event.id()),
            }
        }));
    }

    /// Show the root menu from a tray icon
    pub fn attach_tray_icon(&mut self, tooltip: &str, icon: Icon) -> anyhow::Result<()> {
        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(self.root.clone()))
            .with_tooltip(tooltip)
            .with_icon(icon)
            .build()?;

        self.tray_icon = Some(tray_icon);
        info!("Tray icon created");
        Ok(())
    }

    /// Swap the tray icon image
    pub fn set_icon(&self, icon: Icon) -> Result<()> {
        match &self.tray_icon {
            Some(tray_icon) => tray_icon.set_icon(Some(icon)).map_err(AudioTrayError::shell),
            None => Err(AudioTrayError::shell("tray icon not attached")),
        }
    }

    fn container<'a>(&'a self, placement: Placement<'a, MudaHandle>) -> Result<&'a Submenu> {
        match placement {
            Placement::TopLevel(category) => self
                .sections
                .get(&category)
                .ok_or_else(|| AudioTrayError::Shell(format!("no section for {}", category))),
            Placement::Submenu {
                container: MudaHandle::Submenu(submenu),
                ..
            } => Ok(submenu),
            Placement::Submenu {
                stream,
                stream_index,
                ..
            } => Err(AudioTrayError::Shell(format!(
                "{} {} is not rendered as a submenu",
                stream, stream_index
            ))),
        }
    }
}

/// Native menu items carry no tooltips, and stream icons are themed icon
/// names muda cannot resolve, so both are only logged.
impl TrayShell for MudaShell {
    type Handle = MudaHandle;

    fn create_radio_item(
        &mut self,
        placement: Placement<'_, MudaHandle>,
        label: &str,
        tooltip: Option<&str>,
        click: ClickBinding,
    ) -> Result<MudaHandle> {
        trace!("radio item {:?} (tooltip {:?})", label, tooltip);
        let item = CheckMenuItem::new(label, true, false, None);
        self.container(placement)?
            .append(&item)
            .map_err(AudioTrayError::shell)?;
        self.bindings.lock().insert(item.id().clone(), click);
        Ok(MudaHandle::Item(item))
    }

    fn create_submenu_item(
        &mut self,
        category: Category,
        label: &str,
        tooltip: Option<&str>,
        icon: Option<&str>,
    ) -> Result<MudaHandle> {
        trace!("submenu {:?} (tooltip {:?}, icon {:?})", label, tooltip, icon);
        let submenu = Submenu::new(label, true);
        self.container(Placement::TopLevel(category))?
            .append(&submenu)
            .map_err(AudioTrayError::shell)?;
        Ok(MudaHandle::Submenu(submenu))
    }

    fn remove_radio_item(
        &mut self,
        placement: Placement<'_, MudaHandle>,
        handle: MudaHandle,
    ) -> Result<()> {
        let MudaHandle::Item(item) = handle else {
            return Err(AudioTrayError::shell("radio removal of a submenu"));
        };
        self.bindings.lock().remove(item.id());
        self.container(placement)?
            .remove(&item)
            .map_err(AudioTrayError::shell)
    }

    fn remove_submenu_item(&mut self, category: Category, handle: MudaHandle) -> Result<()> {
        let MudaHandle::Submenu(submenu) = handle else {
            return Err(AudioTrayError::shell("submenu removal of a radio item"));
        };
        self.container(Placement::TopLevel(category))?
            .remove(&submenu)
            .map_err(AudioTrayError::shell)
    }

    fn set_selected(&mut self, handle: &MudaHandle, selected: bool) {
        if let MudaHandle::Item(item) = handle {
            item.set_checked(selected);
        }
    }
}
