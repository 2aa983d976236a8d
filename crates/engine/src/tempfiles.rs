// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job input/output files handed to helpers.
//!
//! Files live in `<cache-root>/<package>/push-helper*`, with legacy apps
//! (no package) using `<cache-root>/_legacy`. Directories are private to
//! the user.

use ph_core::AppId;
use std::fs::File;
use std::io::{self, Write};
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

const PREFIX: &str = "push-helper";
const LEGACY_DIR: &str = "_legacy";

/// Paths of one job's temp files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFiles {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl TempFiles {
    /// Create the input file holding `payload` and an empty output file.
    ///
    /// Nothing is left behind on failure.
    pub fn create(cache_root: &Path, app: &AppId, payload: &[u8]) -> io::Result<Self> {
        let dir = helper_dir(cache_root, app);
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(&dir)?;
        Self::create_in(&dir, payload, allocate)
    }

    fn create_in(
        dir: &Path,
        payload: &[u8],
        mut allocate: impl FnMut(&Path) -> io::Result<(File, PathBuf)>,
    ) -> io::Result<Self> {
        let (mut input_file, input) = allocate(dir)?;
        let output = match allocate(dir) {
            Ok((_, output)) => output,
            Err(e) => {
                remove_quietly(&input);
                return Err(e);
            }
        };
        let files = Self { input, output };

        if let Err(e) = input_file.write_all(payload).and_then(|()| input_file.flush()) {
            files.remove();
            return Err(e);
        }
        Ok(files)
    }

    /// Remove both files, logging (not failing) on error
    pub fn remove(&self) {
        remove_quietly(&self.input);
        remove_quietly(&self.output);
    }
}

/// Directory holding an app's temp files
pub fn helper_dir(cache_root: &Path, app: &AppId) -> PathBuf {
    match app.package() {
        "" => cache_root.join(LEGACY_DIR),
        package => cache_root.join(package),
    }
}

fn allocate(dir: &Path) -> io::Result<(File, PathBuf)> {
    tempfile::Builder::new()
        .prefix(PREFIX)
        .tempfile_in(dir)?
        .keep()
        .map_err(|e| e.error)
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "can't remove temp file"),
    }
}

#[cfg(test)]
#[path = "tempfiles_tests.rs"]
mod tests;
