//! Device filtering logic

use crate::menu::Category;

/// Name suffix the audio server gives to the monitor source of every sink
const MONITOR_SUFFIX: &str = ".monitor";

/// Decides which announced devices get a menu entry
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    /// Show monitor sources
    pub include_monitors: bool,
    /// Device names never shown
    pub hidden: Vec<String>,
}

impl DeviceFilter {
    /// Check if a source name indicates a sink monitor
    pub fn is_monitor(name: &str) -> bool {
        name.to_lowercase().ends_with(MONITOR_SUFFIX)
    }

    /// Check if an entry with this name should be added to the menu
    pub fn admits(&self, category: Category, name: &str) -> bool {
        if category == Category::Source && !self.include_monitors && Self::is_monitor(name) {
            return false;
        }
        !self.hidden.iter().any(|hidden| hidden == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_detection() {
        assert!(DeviceFilter::is_monitor(
            "alsa_output.pci-0000_00_1f.3.analog-stereo.monitor"
        ));
        assert!(DeviceFilter::is_monitor("bluez_sink.XX.Monitor"));
        assert!(!DeviceFilter::is_monitor("alsa_input.usb-mic"));
        assert!(!DeviceFilter::is_monitor("monitor.speakers"));
    }

    #[test]
    fn test_admits() {
        let filter = DeviceFilter {
            include_monitors: false,
            hidden: vec!["alsa_output.hdmi".to_string()],
        };
        assert!(!filter.admits(Category::Source, "speakers.monitor"));
        assert!(filter.admits(Category::Sink, "speakers.monitor"));
        assert!(!filter.admits(Category::Sink, "alsa_output.hdmi"));
        assert!(filter.admits(Category::Sink, "alsa_output.analog"));

        let all = DeviceFilter {
            include_monitors: true,
            hidden: Vec::new(),
        };
        assert!(all.admits(Category::Source, "speakers.monitor"));
    }
}
