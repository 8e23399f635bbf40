use crate::constants::THEME_KEY;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Persists the theme flag, the only client-side state that survives a
/// restart. Stored as a one-entry YAML map under [`THEME_KEY`].
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PreferenceStore { path: path.into() }
    }

    /// Store under the default config directory
    pub fn in_config_dir() -> Self {
        Self::new(crate::config::config_dir().join("preferences.yaml"))
    }

    /// Saved dark mode flag; false when nothing was saved yet
    pub fn load_dark_mode(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences from {}", self.path.display()))?;
        let map: BTreeMap<String, bool> = serde_yaml::from_str(&content)
            .with_context(|| "Failed to parse preferences file")?;
        Ok(map.get(THEME_KEY).copied().unwrap_or(false))
    }

    pub fn save_dark_mode(&self, dark: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut map = BTreeMap::new();
        map.insert(THEME_KEY.to_string(), dark);
        let content = serde_yaml::to_string(&map)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_light() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.yaml"));
        assert!(!store.load_dark_mode().unwrap());
    }

    #[test]
    fn test_roundtrip_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.yaml");
        let store = PreferenceStore::new(&path);

        store.save_dark_mode(true).unwrap();
        assert!(store.load_dark_mode().unwrap());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("dark_mode: true"));

        store.save_dark_mode(false).unwrap();
        assert!(!store.load_dark_mode().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.yaml");
        fs::write(&path, "dark_mode: maybe").unwrap();
        assert!(PreferenceStore::new(&path).load_dark_mode().is_err());
    }
}
