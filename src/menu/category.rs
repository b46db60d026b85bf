//! Menu categories and their per-category behavior table

use crate::audio::AudioCommand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of menu collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Audio server
    Server,
    /// Playback device
    Sink,
    /// Capture device
    Source,
    /// Application playback stream (routed to a sink)
    Input,
    /// Application capture stream (routed from a source)
    Output,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 5;

    /// All categories in menu order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Server,
        Category::Sink,
        Category::Source,
        Category::Input,
        Category::Output,
    ];

    /// Short machine name used in logs and scripts
    pub fn name(self) -> &'static str {
        match self {
            Category::Server => "server",
            Category::Sink => "sink",
            Category::Source => "source",
            Category::Input => "input",
            Category::Output => "output",
        }
    }

    /// Title of the top-level menu section holding this category
    pub fn section_label(self) -> &'static str {
        match self {
            Category::Server => "Server",
            Category::Sink => "Default Sink",
            Category::Source => "Default Source",
            Category::Input => "Playback Streams",
            Category::Output => "Recording Streams",
        }
    }

    /// Behavior of entries in this category
    pub fn behavior(self) -> &'static CategoryBehavior {
        match self {
            Category::Server => &SERVER,
            Category::Sink => &SINK,
            Category::Source => &SOURCE,
            Category::Input => &INPUT,
            Category::Output => &OUTPUT,
        }
    }

    /// Position of this category's collection inside the registry
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How entries of a category are rendered and linked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// Radio item in a selection group; optionally mirrored into every
    /// entry of a stream category
    Radio { mirrored_into: Option<Category> },
    /// Submenu container whose submenu mirrors a device category
    Submenu { mirrors: Category },
}

/// Command issued when a top-level entry is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryClick {
    /// No click behavior
    Ignore,
    /// Connect to a different server (not supported, clicks are dropped)
    Reconnect,
    SetDefaultSink,
    SetDefaultSource,
}

impl PrimaryClick {
    /// Command for a click on the entry at `index`
    pub fn command(self, index: u32) -> Option<AudioCommand> {
        match self {
            PrimaryClick::Ignore | PrimaryClick::Reconnect => None,
            PrimaryClick::SetDefaultSink => Some(AudioCommand::SetDefaultSink { index }),
            PrimaryClick::SetDefaultSource => Some(AudioCommand::SetDefaultSource { index }),
        }
    }
}

/// Command issued when a mirror inside a stream submenu is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorClick {
    MoveInputStream,
    MoveOutputStream,
}

impl MirrorClick {
    /// Command routing `stream` to the device at `target`
    pub fn command(self, stream: u32, target: u32) -> AudioCommand {
        match self {
            MirrorClick::MoveInputStream => AudioCommand::MoveInputStream { stream, sink: target },
            MirrorClick::MoveOutputStream => AudioCommand::MoveOutputStream {
                stream,
                source: target,
            },
        }
    }
}

/// Everything that differs between categories, in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBehavior {
    pub visual: Visual,
    pub primary: PrimaryClick,
    /// Set only for categories that appear as mirrors in stream submenus
    pub mirror: Option<MirrorClick>,
}

impl CategoryBehavior {
    /// Whether entries join a radio selection group
    pub fn is_radio(&self) -> bool {
        matches!(self.visual, Visual::Radio { .. })
    }
}

static SERVER: CategoryBehavior = CategoryBehavior {
    visual: Visual::Radio { mirrored_into: None },
    primary: PrimaryClick::Reconnect,
    mirror: None,
};

static SINK: CategoryBehavior = CategoryBehavior {
    visual: Visual::Radio {
        mirrored_into: Some(Category::Input),
    },
    primary: PrimaryClick::SetDefaultSink,
    mirror: Some(MirrorClick::MoveInputStream),
};

static SOURCE: CategoryBehavior = CategoryBehavior {
    visual: Visual::Radio {
        mirrored_into: Some(Category::Output),
    },
    primary: PrimaryClick::SetDefaultSource,
    mirror: Some(MirrorClick::MoveOutputStream),
};

static INPUT: CategoryBehavior = CategoryBehavior {
    visual: Visual::Submenu {
        mirrors: Category::Sink,
    },
    primary: PrimaryClick::Ignore,
    mirror: None,
};

static OUTPUT: CategoryBehavior = CategoryBehavior {
    visual: Visual::Submenu {
        mirrors: Category::Source,
    },
    primary: PrimaryClick::Ignore,
    mirror: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_relationships_are_symmetric() {
        for category in Category::ALL {
            if let Visual::Submenu { mirrors } = category.behavior().visual {
                assert_eq!(
                    mirrors.behavior().visual,
                    Visual::Radio {
                        mirrored_into: Some(category)
                    }
                );
                assert!(mirrors.behavior().mirror.is_some());
            }
        }
    }

    #[test]
    fn test_slots_follow_menu_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.slot(), i);
        }
    }

    #[test]
    fn test_click_commands() {
        assert_eq!(Category::Server.behavior().primary.command(0), None);
        assert_eq!(
            Category::Sink.behavior().primary.command(3),
            Some(AudioCommand::SetDefaultSink { index: 3 })
        );
        assert_eq!(
            MirrorClick::MoveOutputStream.command(7, 2),
            AudioCommand::MoveOutputStream {
                stream: 7,
                source: 2
            }
        );
    }

    #[test]
    fn test_category_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            category: Category,
        }
        let w: Wrapper = toml::from_str("category = \"output\"").unwrap();
        assert_eq!(w.category, Category::Output);
    }
}
