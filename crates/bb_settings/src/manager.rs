use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::Settings;

/// Cached settings bound to one settings file.
pub struct ConfigManager {
    path: PathBuf,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigManager {
    /// Load settings from the default location once and cache them.
    pub fn new() -> Self {
        Self::with_path(Settings::settings_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Settings::load_or_init(&path);
        Self {
            path,
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot copy of current settings.
    pub fn get(&self) -> Settings {
        match self.settings.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn get_shared(&self) -> Arc<RwLock<Settings>> {
        Arc::clone(&self.settings)
    }

    /// Apply `f` to the cached settings and persist the result.
    ///
    /// On a failed save the in-memory change is kept and the error returned.
    pub fn update<F>(&self, f: F) -> anyhow::Result<Settings>
    where
        F: FnOnce(&mut Settings) -> anyhow::Result<()>,
    {
        let snapshot = {
            let mut guard = match self.settings.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let mut next = guard.clone();
            f(&mut next)?;
            *guard = next.clone();
            next
        };
        snapshot.save_to(&self.path)?;
        Ok(snapshot)
    }

    /// Reload settings from disk.
    pub fn reload(&self) {
        let new_settings = Settings::load_or_init(&self.path);
        match self.settings.write() {
            Ok(mut guard) => *guard = new_settings,
            Err(poisoned) => *poisoned.into_inner() = new_settings,
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_hanzi::ToneStyle;

    #[test]
    fn update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let manager = ConfigManager::with_path(&path);
        assert!(path.exists());

        manager
            .update(|s| {
                s.tone_style = ToneStyle::None;
                Ok(())
            })
            .unwrap();
        assert_eq!(manager.get().tone_style, ToneStyle::None);
        assert_eq!(Settings::load_from(&path).unwrap().tone_style, ToneStyle::None);
    }

    #[test]
    fn failed_update_leaves_settings_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("settings.json"));
        let before = manager.get();
        let result = manager.update(|s| s.set("show_pinyin", "perhaps"));
        assert!(result.is_err());
        assert_eq!(manager.get(), before);
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let manager = ConfigManager::with_path(&path);

        let mut edited = manager.get();
        edited.debounce_ms = 250;
        edited.save_to(&path).unwrap();

        assert_eq!(manager.get().debounce_ms, 800);
        manager.reload();
        assert_eq!(manager.get().debounce_ms, 250);
        assert_eq!(manager.get_shared().read().unwrap().debounce_ms, 250);
    }
}
