//! Image discovery.
//!
//! Walks the working tree and collects every file whose extension is one of
//! the configured image extensions (`jpg`/`jpeg` by default, any case).
//! Version-control metadata is pruned as a whole subtree rather than filtered
//! file by file, so `.git/objects` is never visited.
//!
//! ```text
//! repo/
//! ├── .git/              # pruned
//! ├── a.jpg              # → "a.jpg"
//! └── b/
//!     ├── c.JPEG         # → "b/c.JPEG"
//!     └── d.png          # ignored
//! ```
//!
//! Returned paths are relative to the root, always `/`-separated, and sorted
//! lexicographically on the full relative path.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn scan(root: &Path, config: &ScanConfig) -> Result<Vec<String>, ScanError> {
    let mut images = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, &config.skip_dirs));

    for entry in walker {
        let entry = entry?;
        if !is_file(&entry) || !has_image_extension(entry.path(), &config.extensions) {
            continue;
        }
        // min_depth(1) guarantees every entry lives under root
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = relative_path_string(rel);
        debug!(path = %rel, "found image");
        images.push(rel);
    }

    images.sort();
    info!(count = images.len(), root = %root.display(), "scan complete");
    Ok(images)
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let skipped = skip_dirs.iter().any(|d| name == d.as_str());
    if skipped {
        debug!(dir = %entry.path().display(), "pruned");
    }
    skipped
}

/// Regular files, plus symlinks that resolve to a regular file.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// Join path components with `/` regardless of platform.
pub fn relative_path_string(rel: &Path) -> String {
    let parts: Vec<String> = rel
        .components()
        .map(|c| {
            let os = c.as_os_str();
            match os.to_str() {
                Some(s) => s.to_string(),
                None => {
                    warn!(path = %rel.display(), "file name is not valid UTF-8, converting lossily");
                    os.to_string_lossy().to_string()
                }
            }
        })
        .collect();
    parts.join("/")
}
