use crate::app_config::DEFAULT_SETTINGS_PATH;
use crate::common::file_utils;
use crate::core::console::{self, Console};
use crate::errors::AppError;
use crate::settings::document::SettingsDocument;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Expands the default location, lets the operator confirm or replace it and
/// returns the chosen absolute path.
pub fn resolve_path(console: &mut dyn Console, default_location: Option<&str>) -> Result<PathBuf, AppError> {
    let default_path = file_utils::expand_user_path(default_location.unwrap_or(DEFAULT_SETTINGS_PATH))?;
    console.say("");
    let default_display = default_path.display().to_string();
    let answer = console::prompt(console, "Enter filepath location for settings?", Some(&default_display))?;
    let chosen = file_utils::expand_user_path(&answer)?;
    debug!("📍 Settings location resolved to '{}'", chosen.display());
    Ok(chosen)
}

/// Reads and writes one settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or unreadable file is an empty document.
    pub fn load(&self) -> SettingsDocument {
        match self.try_load() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                debug!("No settings file at '{}', starting empty", self.path.display());
                SettingsDocument::default()
            }
            Err(e) => {
                warn!("⚠️ Treating settings at '{}' as empty: {}", self.path.display(), e);
                SettingsDocument::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<SettingsDocument>, AppError> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let start_time = Instant::now();
        let raw = fs::read_to_string(&self.path)?;
        let doc = serde_json::from_str::<SettingsDocument>(&raw)
            .map_err(|e| AppError::Parse(format!("{}", e)))?;
        info!(
            "📄 Loaded settings from '{}' ({} binding(s)) in {:?}",
            self.path.display(),
            doc.bindings.len(),
            start_time.elapsed()
        );
        Ok(Some(doc))
    }

    /// Writes `doc` as indented JSON. Returns [`AppError::Persist`] with a
    /// readable explanation on failure; the previous file is left intact.
    pub fn save(&self, doc: &SettingsDocument) -> Result<(), AppError> {
        let start_time = Instant::now();
        let mut payload = serde_json::to_string_pretty(doc)
            .map_err(|e| AppError::Persist(format!("failed to serialise settings: {}", e)))?;
        payload.push('\n');

        if fs::read_to_string(&self.path).map(|current| current == payload).unwrap_or(false) {
            debug!("Settings at '{}' already up to date, skipping write", self.path.display());
            return Ok(());
        }

        file_utils::ensure_parent_directory(&self.path)
            .and_then(|_| file_utils::write_atomically(&self.path, &payload))
            .map_err(|e| AppError::Persist(format!("could not write '{}': {}", self.path.display(), e)))?;
        info!("💾 Saved settings to '{}' in {:?}", self.path.display(), start_time.elapsed());
        Ok(())
    }
}
