//! Settings file support

use crate::audio::DeviceFilter;
use crate::error::{AudioTrayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show monitor sources in the source menus
    pub include_monitors: bool,

    /// Device names never shown in the menus
    #[serde(default)]
    pub hidden_devices: Vec<String>,

    /// Tray icon tooltip
    pub tooltip: String,

    /// Directory with `ready.png` / `no-output.png` tray icons
    /// (empty = `<config dir>/audiotray/icons`)
    #[serde(default)]
    pub icon_theme: String,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log file path (empty = no file logging)
    #[serde(default)]
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_monitors: false,
            hidden_devices: Vec::new(),
            tooltip: "audiotray".to_string(),
            icon_theme: String::new(),
            log_level: "info".to_string(),
            log_file: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| AudioTrayError::Io {
            path: path.as_ref().to_string_lossy().to_string(),
            source: e,
        })?;

        let settings = toml::from_str(&content).map_err(|e| AudioTrayError::Parse {
            path: path.as_ref().to_string_lossy().to_string(),
            source: e,
        })?;
        info!("Loaded settings from {:?}", path.as_ref());
        Ok(settings)
    }

    /// Load settings from the default location, or defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("Settings file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/audiotray/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("audiotray").join("config.toml"))
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // Create parent directories if needed
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| AudioTrayError::Io {
                path: parent.to_string_lossy().to_string(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| AudioTrayError::Io {
            path: path.as_ref().to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Filter deciding which devices get menu entries
    pub fn device_filter(&self) -> DeviceFilter {
        DeviceFilter {
            include_monitors: self.include_monitors,
            hidden: self.hidden_devices.clone(),
        }
    }

    /// Configured icon theme directory, if any
    pub fn icon_theme_dir(&self) -> Option<PathBuf> {
        (!self.icon_theme.is_empty()).then(|| PathBuf::from(&self.icon_theme))
    }

    /// Generate a sample settings file content
    pub fn sample_config() -> String {
        r#"# audiotray settings

# Show sink monitor sources in the source menus (default: false)
include_monitors = false

# Device names that never get a menu entry
# Example: hidden_devices = ["alsa_output.pci-0000_01_00.1.hdmi-stereo"]
hidden_devices = []

# Tray icon tooltip
tooltip = "audiotray"

# Directory holding ready.png and no-output.png tray icons
# (empty = <config dir>/audiotray/icons, built-in icons if missing)
icon_theme = ""

# Log level: trace, debug, info, warn, error (default: info)
log_level = "info"

# Log file path (empty = log to stderr)
log_file = ""
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_matches_defaults() {
        let sample: Settings = toml::from_str(&Settings::sample_config()).unwrap();
        assert_eq!(sample, Settings::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            toml::from_str("include_monitors = true\nhidden_devices = [\"hdmi\"]\n").unwrap();
        assert!(settings.include_monitors);
        assert_eq!(settings.log_level, "info");

        let filter = settings.device_filter();
        assert!(filter.include_monitors);
        assert_eq!(filter.hidden, vec!["hdmi".to_string()]);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("audiotray-test-{}", std::process::id()))
            .join("config.toml");
        let settings = Settings {
            tooltip: "Volume".to_string(),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_icon_theme_dir() {
        assert_eq!(Settings::default().icon_theme_dir(), None);
        let settings: Settings = toml::from_str("icon_theme = \"/usr/share/audiotray\"\n").unwrap();
        assert_eq!(
            settings.icon_theme_dir(),
            Some(PathBuf::from("/usr/share/audiotray"))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/audiotray/config.toml").unwrap_err();
        assert!(matches!(err, AudioTrayError::Io { .. }));
    }
}
