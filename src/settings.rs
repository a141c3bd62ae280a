//! User settings stored as settings.json in the app data directory

use crate::constants::{CONTENT_URL, DEFAULT_FLIP_BACK_DELAY_MS, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Board
    pub large_cards: bool,
    pub flip_back_delay_ms: u64,

    // Content
    pub content_url: String,
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            large_cards: true,
            flip_back_delay_ms: DEFAULT_FLIP_BACK_DELAY_MS,
            content_url: CONTENT_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }

    /// Page size clamped to something the board can lay out
    pub fn page_size_clamped(&self) -> u32 {
        self.page_size.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.flip_back_delay(), Duration::from_millis(1000));
        assert_eq!(settings.page_size, 20);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            window_w: Some(1200.0),
            large_cards: false,
            flip_back_delay_ms: 450,
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn test_partial_and_broken_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"page_size": 6}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.page_size, 6);
        assert_eq!(settings.content_url, CONTENT_URL);

        std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_page_size_clamped() {
        let mut settings = Settings::default();
        settings.page_size = 0;
        assert_eq!(settings.page_size_clamped(), 1);
        settings.page_size = 500;
        assert_eq!(settings.page_size_clamped(), 100);
    }
}
