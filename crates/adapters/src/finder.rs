// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helper registry lookup for click apps.
//!
//! The registry root (normally `$XDG_DATA_HOME/ubuntu-push-client`) holds:
//! - `helpers_data.json`: a cache mapping app base or package name to
//!   `{"helper_id": ..., "exec": ...}`, reloaded when its mtime advances
//! - `helpers/<package>_<app>.json`: per-helper hook files with
//!   `{"app_id": ..., "exec": ...}`, used when the cache file is missing

use crate::launcher::HelperInfo;
use parking_lot::Mutex;
use ph_core::AppId;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const HOOK_EXT: &str = ".json";

#[derive(Debug, Clone, Deserialize)]
struct CacheEntry {
    helper_id: String,
    exec: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HookFile {
    app_id: String,
    exec: String,
}

#[derive(Default)]
struct Cache {
    mtime: Option<SystemTime>,
    entries: HashMap<String, CacheEntry>,
}

pub struct HelperFinder {
    data_path: PathBuf,
    hook_dir: PathBuf,
    cache: Mutex<Cache>,
}

impl HelperFinder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_path: root.join("helpers_data.json"),
            hook_dir: root.join("helpers"),
            cache: Mutex::new(Cache::default()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(crate::env::helper_data_root())
    }

    /// Find the helper for a click app.
    pub fn helper(&self, app: &AppId) -> Option<HelperInfo> {
        if !app.is_click() {
            return None;
        }
        let meta = match std::fs::metadata(&self.data_path) {
            Ok(meta) => meta,
            Err(_) => {
                tracing::info!("helpers cache not found, falling back to hook file lookup");
                return self.from_hook_files(app);
            }
        };

        let mut cache = self.cache.lock();
        let mtime = meta.modified().ok();
        let stale = match (mtime, cache.mtime) {
            (Some(current), Some(seen)) => current > seen,
            _ => true,
        };
        if stale {
            let entries: Result<HashMap<String, CacheEntry>, String> = std::fs::read(&self.data_path)
                .map_err(|e| e.to_string())
                .and_then(|data| serde_json::from_slice(&data).map_err(|e| e.to_string()));
            match entries {
                Ok(entries) => {
                    cache.entries = entries;
                    cache.mtime = mtime;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.data_path.display(),
                        error = %e,
                        "unreadable helpers cache"
                    );
                    return None;
                }
            }
        }

        let entry = cache
            .entries
            .get(&app.base())
            .or_else(|| cache.entries.get(app.package()))?;
        if entry.exec.is_empty() {
            return None;
        }
        Some(HelperInfo::new(entry.helper_id.clone(), entry.exec.clone()))
    }

    fn from_hook_files(&self, app: &AppId) -> Option<HelperInfo> {
        let pattern = self.hook_dir.join(format!(
            "{}_*{HOOK_EXT}",
            glob::Pattern::escape(app.package())
        ));
        let matches = glob::glob(&pattern.to_string_lossy()).ok()?;
        let base = app.base();

        for path in matches.flatten() {
            let Ok(resolved) = std::fs::canonicalize(&path) else {
                continue;
            };
            let Ok(data) = std::fs::read(&resolved) else {
                continue;
            };
            let Ok(hook) = serde_json::from_slice::<HookFile>(&data) else {
                continue;
            };
            if hook.exec.is_empty() || !(hook.app_id.is_empty() || hook.app_id == base) {
                continue;
            }
            let name = path.file_name()?.to_string_lossy();
            let helper_id = name.strip_suffix(HOOK_EXT).unwrap_or(&*name).to_string();
            let exec = resolved.parent()?.join(&hook.exec);
            return Some(HelperInfo::new(helper_id, exec));
        }
        None
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
