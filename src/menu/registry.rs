//! Menu registry: the five category collections and their cross-links

use crate::audio::{AudioEvent, AudioService};
use crate::error::{AudioTrayError, Result};
use crate::menu::{
    Category, ClickBinding, EntryInfo, MenuCollection, MenuEntry, Placement, TrayShell, Visual,
};
use tracing::{debug, info, trace, warn};

/// Menu state for every category, kept in sync with the audio service
///
/// Every Input entry's submenu mirrors the Sink collection and every Output
/// entry's submenu mirrors the Source collection. Both sides are updated on
/// each add and remove.
pub struct MenuRegistry<S: TrayShell> {
    shell: S,
    collections: [MenuCollection<S::Handle>; Category::COUNT],
}

impl<S: TrayShell> MenuRegistry<S> {
    /// Create a registry with one empty collection per category
    pub fn new(shell: S) -> Self {
        Self {
            shell,
            collections: Category::ALL.map(MenuCollection::new),
        }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    pub fn collection(&self, category: Category) -> &MenuCollection<S::Handle> {
        &self.collections[category.slot()]
    }

    /// Whether every collection is empty
    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(MenuCollection::is_empty)
    }

    /// Release every entry and visual, keeping the registry itself
    pub fn clear(&mut self) {
        for category in Category::ALL {
            let entries = self.collections[category.slot()].drain();
            if !entries.is_empty() {
                debug!("clearing {} {} entries", entries.len(), category);
            }
            for entry in entries {
                match category.behavior().visual {
                    Visual::Radio { .. } => {
                        release_radio(&mut self.shell, Placement::TopLevel(category), entry)
                    }
                    Visual::Submenu { .. } => release_stream(&mut self.shell, entry),
                }
            }
        }
    }

    /// Tear down the registry and hand back the shell
    pub fn destroy(self) -> S {
        if !self.is_empty() {
            warn!("Destroying menu registry that still holds entries");
        }
        info!("Menu registry destroyed");
        self.shell
    }

    pub fn get_entry(&self, category: Category, index: u32) -> Option<&MenuEntry<S::Handle>> {
        self.collections[category.slot()].get(index)
    }

    /// Add and render a new entry
    ///
    /// Device entries are mirrored into every existing stream submenu; stream
    /// entries get a submenu mirroring every existing device.
    pub fn add_entry(&mut self, category: Category, index: u32, info: EntryInfo) -> Result<()> {
        if self.collections[category.slot()].contains(index) {
            return Err(AudioTrayError::DuplicateIndex { category, index });
        }

        debug!("adding {} {} ({})", category, index, info.name);

        let entry = match category.behavior().visual {
            Visual::Radio { mirrored_into } => {
                let handle = self.shell.create_radio_item(
                    Placement::TopLevel(category),
                    &info.description,
                    info.tooltip.as_deref(),
                    ClickBinding::Primary { category, index },
                )?;

                if let Some(stream_category) = mirrored_into {
                    let streams = &mut self.collections[stream_category.slot()];
                    for stream in streams.entries_mut() {
                        add_mirror(&mut self.shell, stream, index, &info.name, &info.description);
                    }
                }

                MenuEntry::new(category, index, &info, handle, None)
            }
            Visual::Submenu { mirrors } => {
                let submenu = MenuCollection::submenu(mirrors, index);
                let handle = self.shell.create_submenu_item(
                    category,
                    &info.description,
                    info.tooltip.as_deref(),
                    info.icon.as_deref(),
                )?;
                let mut entry = MenuEntry::new(category, index, &info, handle, Some(submenu));

                for device in self.collections[mirrors.slot()].iter() {
                    add_mirror(
                        &mut self.shell,
                        &mut entry,
                        device.index,
                        &device.name,
                        &device.description,
                    );
                }

                entry
            }
        };

        self.collections[category.slot()].insert(entry);
        Ok(())
    }

    /// Remove an entry and its visuals
    ///
    /// Returns false when no entry exists at `index`; late or duplicate remove
    /// notifications are expected.
    pub fn remove_entry(&mut self, category: Category, index: u32) -> bool {
        let Some(entry) = self.collections[category.slot()].take(index) else {
            trace!("ignoring remove of unknown {} {}", category, index);
            return false;
        };

        debug!("removing {} {}", category, index);

        match category.behavior().visual {
            Visual::Radio { mirrored_into } => {
                if let Some(stream_category) = mirrored_into {
                    let streams = &mut self.collections[stream_category.slot()];
                    for stream in streams.entries_mut() {
                        remove_mirror(&mut self.shell, stream, index);
                    }
                }
                release_radio(&mut self.shell, Placement::TopLevel(category), entry);
            }
            Visual::Submenu { .. } => release_stream(&mut self.shell, entry),
        }

        true
    }

    /// Mark the device at `index` as the active member of its group
    ///
    /// Returns false for unknown entries and categories without a group.
    pub fn select(&mut self, category: Category, index: u32) -> bool {
        select_in(&mut self.shell, &mut self.collections[category.slot()], index)
    }

    /// Mark the mirror of `target` as active inside the submenu of `stream`
    pub fn route(&mut self, stream_category: Category, stream: u32, target: u32) -> bool {
        let Some(entry) = self.collections[stream_category.slot()].get_mut(stream) else {
            return false;
        };
        match entry.submenu.as_mut() {
            Some(submenu) => select_in(&mut self.shell, submenu, target),
            None => false,
        }
    }

    /// Handle a click on a top-level entry
    pub fn handle_primary_click<A>(&self, category: Category, index: u32, audio: &mut A)
    where
        A: AudioService + ?Sized,
    {
        let Some(entry) = self.get_entry(category, index) else {
            trace!("ignoring click on unknown {} {}", category, index);
            return;
        };

        debug!("clicked {} {} ({})", category, entry.description, entry.name);

        if let Some(command) = category.behavior().primary.command(index) {
            audio.execute(command);
        }
    }

    /// Handle a click on mirror `index` inside the submenu of `stream`
    ///
    /// # Panics
    ///
    /// Panics if `category` is not a mirrored device category, which means the
    /// shell and the registry disagree about what was rendered.
    pub fn handle_mirror_click<A>(&self, category: Category, stream: u32, index: u32, audio: &mut A)
    where
        A: AudioService + ?Sized,
    {
        let behavior = category.behavior();
        let (stream_category, mirror_click) = match (behavior.visual, behavior.mirror) {
            (
                Visual::Radio {
                    mirrored_into: Some(stream_category),
                },
                Some(mirror_click),
            ) => (stream_category, mirror_click),
            _ => panic!("mirror click delivered for {category} entry {index}, which is never mirrored"),
        };

        let Some(parent) = self.get_entry(stream_category, stream) else {
            trace!("ignoring click in submenu of unknown {} {}", stream_category, stream);
            return;
        };
        let Some(mirror) = parent.submenu().and_then(|submenu| submenu.get(index)) else {
            trace!("ignoring click on unknown {} mirror {}", category, index);
            return;
        };

        debug!(
            "move {} {} to {} {}",
            stream_category, parent.description, category, mirror.description
        );

        audio.execute(mirror_click.command(stream, index));
    }

    /// Route a click binding recorded by the shell to its handler
    pub fn handle_click<A>(&self, click: ClickBinding, audio: &mut A)
    where
        A: AudioService + ?Sized,
    {
        match click {
            ClickBinding::Primary { category, index } => {
                self.handle_primary_click(category, index, audio)
            }
            ClickBinding::Mirror {
                category,
                stream,
                index,
            } => self.handle_mirror_click(category, stream, index, audio),
        }
    }

    /// Apply a notification from the audio service
    pub fn apply(&mut self, event: AudioEvent) -> Result<()> {
        match event {
            AudioEvent::Added {
                category,
                index,
                info,
            } => self.add_entry(category, index, info)?,
            AudioEvent::Removed { category, index } => {
                self.remove_entry(category, index);
            }
            AudioEvent::DefaultChanged { category, index } => {
                self.select(category, index);
            }
            AudioEvent::StreamMoved {
                category,
                stream,
                target,
            } => {
                self.route(category, stream, target);
            }
            AudioEvent::Reset => {
                info!("Audio service reset, clearing menus");
                self.clear();
            }
        }
        Ok(())
    }
}

/// Mirror device `index` into the submenu of `stream`
///
/// Shell failures are logged; the mirror is then left out.
fn add_mirror<S: TrayShell>(
    shell: &mut S,
    stream: &mut MenuEntry<S::Handle>,
    index: u32,
    name: &str,
    description: &str,
) {
    let MenuEntry {
        category: stream_category,
        index: stream_index,
        handle: container,
        submenu,
        ..
    } = stream;
    let Some(submenu) = submenu.as_mut() else {
        return;
    };
    if submenu.contains(index) {
        return;
    }

    let category = submenu.category();
    let placement = Placement::Submenu {
        stream: *stream_category,
        stream_index: *stream_index,
        container: &*container,
    };
    let click = ClickBinding::Mirror {
        category,
        stream: *stream_index,
        index,
    };

    match shell.create_radio_item(placement, description, None, click) {
        Ok(handle) => submenu.insert(MenuEntry::mirror(category, index, name, description, handle)),
        Err(e) => warn!(
            "Failed to mirror {} {} into {} {}: {}",
            category, index, stream_category, stream_index, e
        ),
    }
}

/// Drop the mirror of device `index` from the submenu of `stream`
fn remove_mirror<S: TrayShell>(shell: &mut S, stream: &mut MenuEntry<S::Handle>, index: u32) {
    let MenuEntry {
        category: stream_category,
        index: stream_index,
        handle: container,
        submenu,
        ..
    } = stream;
    let Some(mirror) = submenu.as_mut().and_then(|submenu| submenu.take(index)) else {
        return;
    };

    let placement = Placement::Submenu {
        stream: *stream_category,
        stream_index: *stream_index,
        container: &*container,
    };
    release_radio(shell, placement, mirror);
}

fn release_radio<S: TrayShell>(
    shell: &mut S,
    placement: Placement<'_, S::Handle>,
    entry: MenuEntry<S::Handle>,
) {
    let (category, index) = (entry.category, entry.index);
    if let Err(e) = shell.remove_radio_item(placement, entry.handle) {
        warn!("Failed to remove {} {}: {}", category, index, e);
    }
}

/// Release a stream entry: its mirrors first, then its submenu container
fn release_stream<S: TrayShell>(shell: &mut S, entry: MenuEntry<S::Handle>) {
    let MenuEntry {
        category,
        index,
        handle,
        submenu,
        ..
    } = entry;

    if let Some(mut submenu) = submenu {
        for mirror in submenu.drain() {
            let placement = Placement::Submenu {
                stream: category,
                stream_index: index,
                container: &handle,
            };
            release_radio(shell, placement, mirror);
        }
    }

    if let Err(e) = shell.remove_submenu_item(category, handle) {
        warn!("Failed to remove {} {}: {}", category, index, e);
    }
}

fn select_in<S: TrayShell>(
    shell: &mut S,
    collection: &mut MenuCollection<S::Handle>,
    index: u32,
) -> bool {
    if !collection.contains(index) {
        return false;
    }
    let Some(group) = collection.group_mut() else {
        return false;
    };

    let previous = group.activate(index);
    if previous == Some(index) {
        return true;
    }
    if let Some(old) = previous.and_then(|old| collection.get(old)) {
        shell.set_selected(&old.handle, false);
    }
    if let Some(entry) = collection.get(index) {
        shell.set_selected(&entry.handle, true);
    }
    true
}
