/*
 * Persists the four text inputs of a search (min delay, max delay, TID list,
 * SID list) between sessions. Values are stored exactly as typed, so a
 * half-edited or invalid entry comes back unchanged; parsing happens later in
 * `SearchParameters::from_text`.
 */
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "minDelay")]
    pub min_delay: String,
    #[serde(rename = "maxDelay")]
    pub max_delay: String,
    pub tid: String,
    pub sid: String,
}

impl Settings {
    /*
     * Resolves `<local config dir>/settings.json` for `app_name`, creating the
     * directory if needed.
     */
    pub fn default_path(app_name: &str) -> Result<PathBuf, SearchError> {
        let dirs = ProjectDirs::from("", "", app_name).ok_or(SearchError::NoConfigDirectory)?;
        let dir = dirs.config_local_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| SearchError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            log::debug!("Settings: created config directory {dir:?}");
        }
        Ok(dir.join(SETTINGS_FILENAME))
    }

    /*
     * Loads settings from `path`. A missing file yields defaults, like a first
     * launch; keys missing from the file are left empty.
     */
    pub fn load_from(path: &Path) -> Result<Self, SearchError> {
        if !path.exists() {
            log::debug!("Settings: {path:?} does not exist, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&text)?;
        log::trace!("Settings: loaded {path:?}");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SearchError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::trace!("Settings: saved {path:?}");
        Ok(())
    }
}
