//! Boundary with the audio server: events in, commands out

mod filter;
mod script;
mod service;

pub use filter::DeviceFilter;
pub use script::{ReplayScript, ScriptStep};
pub use service::AudioService;

use crate::menu::{Category, EntryInfo};

/// Control command issued to the audio server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    SetDefaultSink { index: u32 },
    SetDefaultSource { index: u32 },
    /// Move playback stream `stream` to sink `sink`
    MoveInputStream { stream: u32, sink: u32 },
    /// Move recording stream `stream` to source `source`
    MoveOutputStream { stream: u32, source: u32 },
}

impl std::fmt::Display for AudioCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioCommand::SetDefaultSink { index } => write!(f, "set default sink {}", index),
            AudioCommand::SetDefaultSource { index } => write!(f, "set default source {}", index),
            AudioCommand::MoveInputStream { stream, sink } => {
                write!(f, "move input {} to sink {}", stream, sink)
            }
            AudioCommand::MoveOutputStream { stream, source } => {
                write!(f, "move output {} to source {}", stream, source)
            }
        }
    }
}

/// Notification from the audio server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// A device or stream appeared
    Added {
        category: Category,
        index: u32,
        info: EntryInfo,
    },
    /// A device or stream went away
    Removed { category: Category, index: u32 },
    /// The default server, sink or source changed
    DefaultChanged { category: Category, index: u32 },
    /// A stream now plays to (or records from) `target`
    StreamMoved {
        category: Category,
        stream: u32,
        target: u32,
    },
    /// Connection was lost or re-established; everything will be re-announced
    Reset,
}
