//! Event loop that serializes audio notifications and clicks onto the registry

use crate::audio::{AudioEvent, AudioService, DeviceFilter};
use crate::menu::{ClickBinding, MenuRegistry, TrayShell};
use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{error, info, trace, warn};

/// Events consumed by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Notification from the audio server
    Audio(AudioEvent),
    /// User activated a rendered item
    Click(ClickBinding),
    /// Stop the controller
    Shutdown,
}

/// Owns the registry and applies events to it in arrival order
pub struct MenuController<S: TrayShell> {
    registry: MenuRegistry<S>,
    filter: DeviceFilter,
}

impl<S: TrayShell> MenuController<S> {
    pub fn new(registry: MenuRegistry<S>, filter: DeviceFilter) -> Self {
        Self { registry, filter }
    }

    pub fn registry(&self) -> &MenuRegistry<S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MenuRegistry<S> {
        &mut self.registry
    }

    /// Clear the menus and hand back the registry
    pub fn into_registry(mut self) -> MenuRegistry<S> {
        self.registry.clear();
        self.registry
    }

    /// Block on `events` until shutdown or until every sender is gone
    pub fn run<A>(&mut self, events: &Receiver<ControllerEvent>, audio: &mut A)
    where
        A: AudioService + ?Sized,
    {
        info!("Menu controller started");
        for event in events.iter() {
            if !self.handle_event(event, audio) {
                info!("Menu controller shutting down");
                return;
            }
        }
        info!("Event channel disconnected");
    }

    /// Apply every pending event without blocking
    ///
    /// Returns false once the controller should stop.
    pub fn pump<A>(&mut self, events: &Receiver<ControllerEvent>, audio: &mut A) -> bool
    where
        A: AudioService + ?Sized,
    {
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if !self.handle_event(event, audio) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    info!("Event channel disconnected");
                    return false;
                }
            }
        }
    }

    /// Apply one event; returns false on shutdown
    pub fn handle_event<A>(&mut self, event: ControllerEvent, audio: &mut A) -> bool
    where
        A: AudioService + ?Sized,
    {
        match event {
            ControllerEvent::Audio(AudioEvent::Added {
                category,
                index,
                ref info,
            }) if !self.filter.admits(category, &info.name) => {
                trace!("filtered {} {} ({})", category, index, info.name);
            }
            ControllerEvent::Audio(event) => {
                if let Err(e) = self.registry.apply(event) {
                    if e.is_benign() {
                        warn!("Rejected audio event: {}", e);
                    } else {
                        error!("Failed to apply audio event: {}", e);
                    }
                }
            }
            ControllerEvent::Click(click) => self.registry.handle_click(click, audio),
            ControllerEvent::Shutdown => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCommand;
    use crate::menu::{Category, EntryInfo, HeadlessShell};
    use crossbeam_channel::unbounded;

    fn added(category: Category, index: u32, name: &str) -> ControllerEvent {
        ControllerEvent::Audio(AudioEvent::Added {
            category,
            index,
            info: EntryInfo::new(name, name),
        })
    }

    fn controller(filter: DeviceFilter) -> MenuController<HeadlessShell> {
        MenuController::new(MenuRegistry::new(HeadlessShell::new()), filter)
    }

    #[test]
    fn test_run_applies_in_order_until_shutdown() {
        let (tx, rx) = unbounded();
        tx.send(added(Category::Sink, 1, "speakers")).unwrap();
        tx.send(added(Category::Input, 5, "browser")).unwrap();
        tx.send(ControllerEvent::Click(ClickBinding::Mirror {
            category: Category::Sink,
            stream: 5,
            index: 1,
        }))
        .unwrap();
        tx.send(ControllerEvent::Shutdown).unwrap();
        tx.send(added(Category::Sink, 2, "headphones")).unwrap();

        let mut controller = controller(DeviceFilter::default());
        let mut commands: Vec<AudioCommand> = Vec::new();
        controller.run(&rx, &mut commands);

        assert_eq!(
            commands,
            vec![AudioCommand::MoveInputStream { stream: 5, sink: 1 }]
        );
        assert!(controller.registry().get_entry(Category::Sink, 2).is_none());
    }

    #[test]
    fn test_filter_hides_monitors_and_late_remove_is_noop() {
        let (tx, rx) = unbounded();
        tx.send(added(Category::Source, 3, "speakers.monitor")).unwrap();
        tx.send(added(Category::Source, 4, "usb-mic")).unwrap();
        tx.send(ControllerEvent::Audio(AudioEvent::Removed {
            category: Category::Source,
            index: 3,
        }))
        .unwrap();
        drop(tx);

        let mut controller = controller(DeviceFilter::default());
        let mut commands: Vec<AudioCommand> = Vec::new();
        controller.run(&rx, &mut commands);

        assert_eq!(
            controller.registry().collection(Category::Source).indices(),
            vec![4]
        );
    }

    #[test]
    fn test_duplicate_add_keeps_running() {
        let (tx, rx) = unbounded();
        tx.send(added(Category::Sink, 1, "speakers")).unwrap();
        tx.send(added(Category::Sink, 1, "speakers")).unwrap();
        tx.send(ControllerEvent::Click(ClickBinding::Primary {
            category: Category::Sink,
            index: 1,
        }))
        .unwrap();

        let mut controller = controller(DeviceFilter::default());
        let mut commands: Vec<AudioCommand> = Vec::new();
        assert!(controller.pump(&rx, &mut commands));
        assert_eq!(commands, vec![AudioCommand::SetDefaultSink { index: 1 }]);
        assert_eq!(controller.registry().collection(Category::Sink).len(), 1);

        drop(tx);
        assert!(!controller.pump(&rx, &mut commands));
    }

    #[test]
    fn test_into_registry_clears() {
        let mut controller = controller(DeviceFilter::default());
        let mut commands: Vec<AudioCommand> = Vec::new();
        controller.handle_event(added(Category::Sink, 1, "speakers"), &mut commands);
        controller.handle_event(added(Category::Input, 5, "browser"), &mut commands);

        let registry = controller.into_registry();
        assert!(registry.is_empty());
        assert_eq!(registry.shell().live_count(), 0);
    }
}
