//! In-memory tray shell that records every call

use crate::error::{AudioTrayError, Result};
use crate::menu::{Category, ClickBinding, Placement, TrayShell};
use std::collections::HashMap;
use tracing::trace;

/// Handle type of [`HeadlessShell`]
pub type VisualId = u64;

/// A call made into the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    CreateRadio {
        id: VisualId,
        /// Container visual for items inside a stream submenu
        container: Option<VisualId>,
        category: Category,
        label: String,
    },
    CreateSubmenu {
        id: VisualId,
        category: Category,
        label: String,
        icon: Option<String>,
    },
    RemoveRadio {
        id: VisualId,
    },
    RemoveSubmenu {
        id: VisualId,
        category: Category,
    },
    Select {
        id: VisualId,
        selected: bool,
    },
}

#[derive(Debug)]
struct Visual {
    label: String,
    click: Option<ClickBinding>,
}

/// Shell without a display, used by the replay tool and in tests
#[derive(Debug, Default)]
pub struct HeadlessShell {
    next_id: VisualId,
    live: HashMap<VisualId, Visual>,
    calls: Vec<ShellCall>,
}

impl HeadlessShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far
    pub fn calls(&self) -> &[ShellCall] {
        &self.calls
    }

    /// Take the call log, leaving it empty
    pub fn take_calls(&mut self) -> Vec<ShellCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of visuals created and not yet removed
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn label(&self, id: VisualId) -> Option<&str> {
        self.live.get(&id).map(|visual| visual.label.as_str())
    }

    /// Click binding of a live radio item
    pub fn binding(&self, id: VisualId) -> Option<ClickBinding> {
        self.live.get(&id).and_then(|visual| visual.click)
    }

    fn allocate(&mut self, label: &str, click: Option<ClickBinding>) -> VisualId {
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(
            id,
            Visual {
                label: label.to_string(),
                click,
            },
        );
        id
    }

    fn release(&mut self, id: VisualId) -> Result<()> {
        self.live
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AudioTrayError::Shell(format!("unknown visual {}", id)))
    }
}

impl TrayShell for HeadlessShell {
    type Handle = VisualId;

    fn create_radio_item(
        &mut self,
        placement: Placement<'_, VisualId>,
        label: &str,
        tooltip: Option<&str>,
        click: ClickBinding,
    ) -> Result<VisualId> {
        let (category, container) = match (placement, click) {
            (Placement::TopLevel(category), _) => (category, None),
            (Placement::Submenu { container, .. }, ClickBinding::Mirror { category, .. }) => {
                if !self.live.contains_key(container) {
                    return Err(AudioTrayError::Shell(format!(
                        "unknown container {}",
                        container
                    )));
                }
                (category, Some(*container))
            }
            (Placement::Submenu { .. }, ClickBinding::Primary { .. }) => {
                return Err(AudioTrayError::shell("primary item placed in a submenu"));
            }
        };

        let id = self.allocate(label, Some(click));
        trace!("radio item {} {:?} (tooltip {:?})", id, label, tooltip);
        self.calls.push(ShellCall::CreateRadio {
            id,
            container,
            category,
            label: label.to_string(),
        });
        Ok(id)
    }

    fn create_submenu_item(
        &mut self,
        category: Category,
        label: &str,
        tooltip: Option<&str>,
        icon: Option<&str>,
    ) -> Result<VisualId> {
        let id = self.allocate(label, None);
        trace!("submenu item {} {:?} (tooltip {:?})", id, label, tooltip);
        self.calls.push(ShellCall::CreateSubmenu {
            id,
            category,
            label: label.to_string(),
            icon: icon.map(str::to_string),
        });
        Ok(id)
    }

    fn remove_radio_item(&mut self, _placement: Placement<'_, VisualId>, id: VisualId) -> Result<()> {
        self.release(id)?;
        self.calls.push(ShellCall::RemoveRadio { id });
        Ok(())
    }

    fn remove_submenu_item(&mut self, category: Category, id: VisualId) -> Result<()> {
        self.release(id)?;
        self.calls.push(ShellCall::RemoveSubmenu { id, category });
        Ok(())
    }

    fn set_selected(&mut self, id: &VisualId, selected: bool) {
        self.calls.push(ShellCall::Select { id: *id, selected });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_releases() {
        let mut shell = HeadlessShell::new();
        let container = shell
            .create_submenu_item(Category::Input, "Browser", None, Some("firefox"))
            .unwrap();
        let mirror = shell
            .create_radio_item(
                Placement::Submenu {
                    stream: Category::Input,
                    stream_index: 5,
                    container: &container,
                },
                "Speakers",
                None,
                ClickBinding::Mirror {
                    category: Category::Sink,
                    stream: 5,
                    index: 1,
                },
            )
            .unwrap();

        assert_eq!(shell.live_count(), 2);
        assert_eq!(shell.label(mirror), Some("Speakers"));
        assert_eq!(shell.binding(container), None);

        shell
            .remove_radio_item(
                Placement::Submenu {
                    stream: Category::Input,
                    stream_index: 5,
                    container: &container,
                },
                mirror,
            )
            .unwrap();
        shell.remove_submenu_item(Category::Input, container).unwrap();
        assert_eq!(shell.live_count(), 0);
        assert_eq!(shell.calls().len(), 4);
        assert_eq!(
            shell.calls()[1],
            ShellCall::CreateRadio {
                id: mirror,
                container: Some(container),
                category: Category::Sink,
                label: "Speakers".to_string(),
            }
        );
    }

    #[test]
    fn test_double_release_fails() {
        let mut shell = HeadlessShell::new();
        let id = shell
            .create_radio_item(
                Placement::TopLevel(Category::Sink),
                "Speakers",
                Some("alsa_output"),
                ClickBinding::Primary {
                    category: Category::Sink,
                    index: 1,
                },
            )
            .unwrap();
        shell
            .remove_radio_item(Placement::TopLevel(Category::Sink), id)
            .unwrap();
        assert!(shell
            .remove_radio_item(Placement::TopLevel(Category::Sink), id)
            .is_err());
    }
}
