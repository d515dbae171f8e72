// Settings store: data types, global state, and load/save.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::api::DEFAULT_BASE_URL;
use crate::localization::SupportedLang;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// CMS host the listings are fetched from. A change takes effect on the
    /// next activation (section switch or restart).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    // UI language (None = auto/system). Stored as "en"/"ru" or null.
    #[serde(default)]
    pub language: Option<SupportedLang>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: None,
        }
    }
}

lazy_static! {
    pub static ref APP_SETTINGS: RwLock<AppSettings> = RwLock::new(AppSettings::default());
}

fn settings_file_path() -> PathBuf {
    // Allow override for tests via env var
    if let Ok(p) = std::env::var("SHELF_SETTINGS_PATH") {
        return PathBuf::from(p);
    }
    PathBuf::from("settings.json")
}

impl AppSettings {
    pub fn load_from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let s: AppSettings = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(s)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}

pub fn load_settings_from_disk() {
    let path = settings_file_path();
    match AppSettings::load_from_file(&path) {
        Ok(s) => {
            *APP_SETTINGS.write().unwrap() = s;
            log::info!("Loaded settings from {}", path.to_string_lossy());
        }
        Err(e) => {
            // Keep defaults if missing/unreadable
            log::info!(
                "Using default settings; cannot load {}: {}",
                path.to_string_lossy(),
                e
            );
        }
    }
}

pub fn save_settings_to_disk() {
    let path = settings_file_path();
    let s = APP_SETTINGS.read().unwrap().clone();
    if let Err(e) = s.save_to_file(&path) {
        log::error!(
            "Failed to save settings to {}: {}",
            path.to_string_lossy(),
            e
        );
    } else {
        log::info!("Saved settings to {}", path.to_string_lossy());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // PID-suffixed temp file so parallel test runs don't clobber each other
    fn temp_settings_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("{}_{}.json", name, std::process::id()));
        p
    }

    #[test]
    fn settings_round_trip() {
        let path = temp_settings_path("shelf_settings_rt");
        let s = AppSettings {
            base_url: "https://cms.example".to_string(),
            language: Some(SupportedLang::Ru),
        };
        s.save_to_file(&path).unwrap();
        let loaded = AppSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, s);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert!(s.language.is_none());
    }

    #[test]
    fn language_codes_round_trip_as_short_strings() {
        let s = AppSettings {
            base_url: default_base_url(),
            language: Some(SupportedLang::En),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""language":"en""#), "{json}");
    }
}
