//! Recorded audio-server sessions replayed through the menu controller

use crate::audio::AudioEvent;
use crate::error::{AudioTrayError, Result};
use crate::menu::{Category, ClickBinding, ControllerEvent, EntryInfo};
use serde::de::Error as _;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One step of a replay script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Add {
        category: Category,
        index: u32,
        name: String,
        description: String,
        #[serde(default)]
        tooltip: Option<String>,
        #[serde(default)]
        icon: Option<String>,
    },
    Remove {
        category: Category,
        index: u32,
    },
    Default {
        category: Category,
        index: u32,
    },
    Move {
        category: Category,
        stream: u32,
        target: u32,
    },
    Reset,
    /// Click a top-level entry, or the mirror of `index` inside `stream`
    Click {
        category: Category,
        index: u32,
        #[serde(default)]
        stream: Option<u32>,
    },
}

impl ScriptStep {
    /// Reject steps no rendered menu could produce
    pub fn check(&self) -> std::result::Result<(), String> {
        match self {
            ScriptStep::Click {
                category,
                index,
                stream: Some(stream),
            } if category.behavior().mirror.is_none() => Err(format!(
                "click on {} {} inside stream {}: {} entries never appear in stream submenus",
                category, index, stream, category
            )),
            _ => Ok(()),
        }
    }
}

impl TryFrom<ScriptStep> for ControllerEvent {
    type Error = String;

    fn try_from(step: ScriptStep) -> std::result::Result<Self, String> {
        step.check()?;
        let event = match step {
            ScriptStep::Add {
                category,
                index,
                name,
                description,
                tooltip,
                icon,
            } => ControllerEvent::Audio(AudioEvent::Added {
                category,
                index,
                info: EntryInfo {
                    name,
                    description,
                    tooltip,
                    icon,
                },
            }),
            ScriptStep::Remove { category, index } => {
                ControllerEvent::Audio(AudioEvent::Removed { category, index })
            }
            ScriptStep::Default { category, index } => {
                ControllerEvent::Audio(AudioEvent::DefaultChanged { category, index })
            }
            ScriptStep::Move {
                category,
                stream,
                target,
            } => ControllerEvent::Audio(AudioEvent::StreamMoved {
                category,
                stream,
                target,
            }),
            ScriptStep::Reset => ControllerEvent::Audio(AudioEvent::Reset),
            ScriptStep::Click {
                category,
                index,
                stream: None,
            } => ControllerEvent::Click(ClickBinding::Primary { category, index }),
            ScriptStep::Click {
                category,
                index,
                stream: Some(stream),
            } => ControllerEvent::Click(ClickBinding::Mirror {
                category,
                stream,
                index,
            }),
        };
        Ok(event)
    }
}

/// Ordered list of steps loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl ReplayScript {
    /// Parse a script from TOML text
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        let parse_error = |source: toml::de::Error| AudioTrayError::Parse {
            path: origin.to_string(),
            source,
        };

        let script: Self = toml::from_str(content).map_err(parse_error)?;
        for (number, step) in script.steps.iter().enumerate() {
            step.check().map_err(|reason| {
                parse_error(toml::de::Error::custom(format!("step {}: {}", number + 1, reason)))
            })?;
        }
        Ok(script)
    }

    /// Load a script from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let origin = path.as_ref().to_string_lossy().to_string();
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| AudioTrayError::Io {
            path: origin.clone(),
            source: e,
        })?;

        let script = Self::parse(&content, &origin)?;
        info!("Loaded {} replay steps from {}", script.steps.len(), origin);
        Ok(script)
    }

    /// Controller events for every step, in order
    pub fn into_events(self) -> impl Iterator<Item = ControllerEvent> {
        self.steps
            .into_iter()
            .filter_map(|step| match ControllerEvent::try_from(step) {
                Ok(event) => Some(event),
                Err(reason) => {
                    warn!("Skipping replay step: {}", reason);
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[[step]]
action = "add"
category = "sink"
index = 1
name = "alsa_output.analog-stereo"
description = "Speakers"

[[step]]
action = "add"
category = "input"
index = 5
name = "firefox"
description = "Browser"
icon = "firefox"

[[step]]
action = "click"
category = "sink"
index = 1
stream = 5

[[step]]
action = "reset"
"#;

    #[test]
    fn test_parse_steps() {
        let script = ReplayScript::parse(SCRIPT, "inline").unwrap();
        assert_eq!(script.steps.len(), 4);
        assert_eq!(
            script.steps[1],
            ScriptStep::Add {
                category: Category::Input,
                index: 5,
                name: "firefox".to_string(),
                description: "Browser".to_string(),
                tooltip: None,
                icon: Some("firefox".to_string()),
            }
        );

        let events: Vec<ControllerEvent> = script.into_events().collect();
        assert_eq!(
            events[2],
            ControllerEvent::Click(ClickBinding::Mirror {
                category: Category::Sink,
                stream: 5,
                index: 1
            })
        );
        assert_eq!(events[3], ControllerEvent::Audio(AudioEvent::Reset));
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let err = ReplayScript::parse(
            "[[step]]\naction = \"remove\"\ncategory = \"speaker\"\nindex = 1\n",
            "bad.toml",
        )
        .unwrap_err();
        assert!(matches!(err, AudioTrayError::Parse { ref path, .. } if path == "bad.toml"));
    }

    #[test]
    fn test_mirror_click_on_unmirrored_category_is_parse_error() {
        let script = "[[step]]\naction = \"click\"\ncategory = \"server\"\nindex = 1\nstream = 5\n";
        let err = ReplayScript::parse(script, "server.toml").unwrap_err();
        match err {
            AudioTrayError::Parse { ref path, ref source } => {
                assert_eq!(path, "server.toml");
                assert!(source.to_string().contains("step 1"));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }

        let script = "[[step]]\naction = \"click\"\ncategory = \"input\"\nindex = 5\nstream = 5\n";
        assert!(ReplayScript::parse(script, "input.toml").is_err());

        // the same categories are fine as top-level clicks
        let script = "[[step]]\naction = \"click\"\ncategory = \"server\"\nindex = 1\n";
        assert_eq!(ReplayScript::parse(script, "ok.toml").unwrap().steps.len(), 1);
    }

    #[test]
    fn test_invalid_steps_never_reach_the_controller() {
        let script = ReplayScript {
            steps: vec![
                ScriptStep::Click {
                    category: Category::Server,
                    index: 1,
                    stream: Some(5),
                },
                ScriptStep::Reset,
            ],
        };
        let events: Vec<ControllerEvent> = script.into_events().collect();
        assert_eq!(events, vec![ControllerEvent::Audio(AudioEvent::Reset)]);
    }

    #[test]
    fn test_empty_script() {
        assert!(ReplayScript::parse("", "empty").unwrap().steps.is_empty());
    }
}
