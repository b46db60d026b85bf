//! Indexed set of entries of one category

use crate::menu::{Category, MenuEntry};
use std::collections::HashMap;

/// Radio selection state among sibling entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionGroup {
    /// Member indices in insertion order
    members: Vec<u32>,
    active: Option<u32>,
}

impl SelectionGroup {
    pub fn members(&self) -> &[u32] {
        &self.members
    }

    pub fn active(&self) -> Option<u32> {
        self.active
    }

    fn join(&mut self, index: u32) {
        self.members.push(index);
    }

    fn leave(&mut self, index: u32) {
        self.members.retain(|&member| member != index);
        if self.active == Some(index) {
            self.active = None;
        }
    }

    /// Make `index` the active member, returning the previous one
    pub(crate) fn activate(&mut self, index: u32) -> Option<u32> {
        self.active.replace(index)
    }
}

/// Collection of menu entries keyed by the audio service's index
#[derive(Debug)]
pub struct MenuCollection<H> {
    category: Category,
    entries: HashMap<u32, MenuEntry<H>>,
    /// Present only for radio categories (Server/Sink/Source)
    group: Option<SelectionGroup>,
    /// Index of the owning stream entry when this is a submenu
    parent: Option<u32>,
}

impl<H> MenuCollection<H> {
    /// Create an empty top-level collection
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: HashMap::new(),
            group: category.behavior().is_radio().then(SelectionGroup::default),
            parent: None,
        }
    }

    /// Create an empty submenu of `category` owned by the stream at `parent`
    pub(crate) fn submenu(category: Category, parent: u32) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(category)
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Index of the stream entry owning this submenu
    pub fn parent(&self) -> Option<u32> {
        self.parent
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn get(&self, index: u32) -> Option<&MenuEntry<H>> {
        self.entries.get(&index)
    }

    /// All indices in ascending order
    pub fn indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.entries.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Entries in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry<H>> {
        let mut entries: Vec<&MenuEntry<H>> = self.entries.values().collect();
        entries.sort_unstable_by_key(|entry| entry.index);
        entries.into_iter()
    }

    pub fn selection(&self) -> Option<&SelectionGroup> {
        self.group.as_ref()
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut MenuEntry<H>> {
        self.entries.get_mut(&index)
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut MenuEntry<H>> {
        self.entries.values_mut()
    }

    pub(crate) fn group_mut(&mut self) -> Option<&mut SelectionGroup> {
        self.group.as_mut()
    }

    /// Insert an entry whose index is known to be absent
    pub(crate) fn insert(&mut self, entry: MenuEntry<H>) {
        if let Some(group) = self.group.as_mut() {
            group.join(entry.index);
        }
        self.entries.insert(entry.index, entry);
    }

    /// Detach the entry at `index`
    pub(crate) fn take(&mut self, index: u32) -> Option<MenuEntry<H>> {
        let entry = self.entries.remove(&index)?;
        if let Some(group) = self.group.as_mut() {
            group.leave(index);
        }
        Some(entry)
    }

    /// Detach every entry in ascending index order and reset the selection group
    pub(crate) fn drain(&mut self) -> Vec<MenuEntry<H>> {
        let mut entries: Vec<MenuEntry<H>> = self.entries.drain().map(|(_, entry)| entry).collect();
        entries.sort_unstable_by_key(|entry| entry.index);
        if let Some(group) = self.group.as_mut() {
            *group = SelectionGroup::default();
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::EntryInfo;

    fn entry(category: Category, index: u32) -> MenuEntry<u64> {
        MenuEntry::new(category, index, &EntryInfo::new("n", "d"), index as u64, None)
    }

    #[test]
    fn test_group_only_for_radio_categories() {
        assert!(MenuCollection::<u64>::new(Category::Server).selection().is_some());
        assert!(MenuCollection::<u64>::new(Category::Sink).selection().is_some());
        assert!(MenuCollection::<u64>::new(Category::Input).selection().is_none());
        assert!(MenuCollection::<u64>::new(Category::Output).selection().is_none());

        let submenu = MenuCollection::<u64>::submenu(Category::Sink, 9);
        assert_eq!(submenu.parent(), Some(9));
        assert!(submenu.selection().is_some());
    }

    #[test]
    fn test_take_leaves_group_and_clears_active() {
        let mut sinks = MenuCollection::new(Category::Sink);
        sinks.insert(entry(Category::Sink, 4));
        sinks.insert(entry(Category::Sink, 1));
        sinks.group_mut().unwrap().activate(4);

        assert!(sinks.take(4).is_some());
        assert!(sinks.take(4).is_none());

        let group = sinks.selection().unwrap();
        assert_eq!(group.members(), &[1]);
        assert_eq!(group.active(), None);
    }

    #[test]
    fn test_drain_sorted_and_resets_group() {
        let mut sources = MenuCollection::new(Category::Source);
        for index in [7, 2, 5] {
            sources.insert(entry(Category::Source, index));
        }
        assert_eq!(sources.indices(), vec![2, 5, 7]);

        let drained: Vec<u32> = sources.drain().iter().map(|e| e.index()).collect();
        assert_eq!(drained, vec![2, 5, 7]);
        assert!(sources.is_empty());
        assert_eq!(sources.selection(), Some(&SelectionGroup::default()));
    }
}
