//! Commands issued to the audio server

use crate::audio::AudioCommand;
use crossbeam_channel::Sender;
use tracing::warn;

/// Control surface of the audio server
pub trait AudioService {
    fn set_default_sink(&mut self, index: u32);

    fn set_default_source(&mut self, index: u32);

    fn move_input_stream(&mut self, stream: u32, sink: u32);

    fn move_output_stream(&mut self, stream: u32, source: u32);

    /// Issue a command value
    fn execute(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::SetDefaultSink { index } => self.set_default_sink(index),
            AudioCommand::SetDefaultSource { index } => self.set_default_source(index),
            AudioCommand::MoveInputStream { stream, sink } => self.move_input_stream(stream, sink),
            AudioCommand::MoveOutputStream { stream, source } => {
                self.move_output_stream(stream, source)
            }
        }
    }
}

/// Collects commands, used by the replay tool and tests
impl AudioService for Vec<AudioCommand> {
    fn set_default_sink(&mut self, index: u32) {
        self.push(AudioCommand::SetDefaultSink { index });
    }

    fn set_default_source(&mut self, index: u32) {
        self.push(AudioCommand::SetDefaultSource { index });
    }

    fn move_input_stream(&mut self, stream: u32, sink: u32) {
        self.push(AudioCommand::MoveInputStream { stream, sink });
    }

    fn move_output_stream(&mut self, stream: u32, source: u32) {
        self.push(AudioCommand::MoveOutputStream { stream, source });
    }
}

/// Forwards commands to a backend thread
impl AudioService for Sender<AudioCommand> {
    fn set_default_sink(&mut self, index: u32) {
        self.execute(AudioCommand::SetDefaultSink { index });
    }

    fn set_default_source(&mut self, index: u32) {
        self.execute(AudioCommand::SetDefaultSource { index });
    }

    fn move_input_stream(&mut self, stream: u32, sink: u32) {
        self.execute(AudioCommand::MoveInputStream { stream, sink });
    }

    fn move_output_stream(&mut self, stream: u32, source: u32) {
        self.execute(AudioCommand::MoveOutputStream { stream, source });
    }

    fn execute(&mut self, command: AudioCommand) {
        if self.send(command).is_err() {
            warn!("Failed to send {} - audio backend dropped", command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_execute_routes_to_methods() {
        let mut commands: Vec<AudioCommand> = Vec::new();
        commands.execute(AudioCommand::MoveOutputStream {
            stream: 4,
            source: 9,
        });
        commands.set_default_sink(2);
        assert_eq!(
            commands,
            vec![
                AudioCommand::MoveOutputStream {
                    stream: 4,
                    source: 9
                },
                AudioCommand::SetDefaultSink { index: 2 },
            ]
        );
    }

    #[test]
    fn test_sender_forwards() {
        let (mut tx, rx) = unbounded::<AudioCommand>();
        tx.move_input_stream(5, 2);
        assert_eq!(
            rx.try_recv().unwrap(),
            AudioCommand::MoveInputStream { stream: 5, sink: 2 }
        );

        drop(rx);
        tx.set_default_source(1);
    }
}
