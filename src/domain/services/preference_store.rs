#[cfg(test)]
#[path = "preference_store_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Preferences;

/// Editor files, theme and font size saved between sessions as a single YAML
/// document. Every save replaces the whole file.
pub struct PreferenceStore {
    pub file_path: path::PathBuf,
}

impl Default for PreferenceStore {
    fn default() -> PreferenceStore {
        return PreferenceStore::new(path::PathBuf::from(Config::get(
            ConfigKey::PreferencesFile,
        )));
    }
}

impl PreferenceStore {
    pub fn new(file_path: path::PathBuf) -> PreferenceStore {
        return PreferenceStore { file_path };
    }

    pub async fn load(&self) -> Result<Preferences> {
        if !self.file_path.exists() {
            return Ok(Preferences::default());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        let preferences: Preferences = serde_yaml::from_str(&payload)?;

        return Ok(preferences);
    }

    pub async fn save(&self, preferences: &Preferences) -> Result<()> {
        let payload = serde_yaml::to_string(preferences)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = ?self.file_path, "Saved preferences");

        return Ok(());
    }
}
