//! Remembers per-content viewer preferences between runs.
//!
//! Files live under `.cache/` in a directory named by a hash of the content
//! path. Each holds a tiny TOML file with the chosen theme.

use crate::config::ThemeMode;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub theme: ThemeMode,
}

pub fn load_preference(content_path: &Path) -> Option<Preference> {
    load_preference_in(Path::new(CACHE_DIR), content_path)
}

/// Persist the preference. Errors are ignored to keep the UI responsive.
pub fn save_preference(content_path: &Path, preference: Preference) {
    save_preference_in(Path::new(CACHE_DIR), content_path, preference);
}

pub fn hash_dir(root: &Path, content_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(content_path.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    root.join(hash)
}

fn preference_path(root: &Path, content_path: &Path) -> PathBuf {
    hash_dir(root, content_path).join("preference.toml")
}

fn load_preference_in(root: &Path, content_path: &Path) -> Option<Preference> {
    let data = fs::read_to_string(preference_path(root, content_path)).ok()?;
    toml::from_str(&data).ok()
}

fn save_preference_in(root: &Path, content_path: &Path, preference: Preference) {
    let path = preference_path(root, content_path);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(&preference) {
        let _ = fs::write(path, contents);
    }
}
