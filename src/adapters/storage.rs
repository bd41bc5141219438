use crate::core::{Settings, SettingsStore};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 以 JSON 檔保存上次使用的選擇
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No settings at {}: {}", self.path.display(), e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => Settings::from_json_value(&value),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring unreadable settings file {}: {}", self.path.display(), e);
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
