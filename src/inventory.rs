//! The shared front half of both commands: inspect → enumerate → build URLs.
//!
//! The walk starts at the requested root, which may be any directory inside
//! the checkout. Paths are then rebased onto the repository's top level, since
//! that is what raw-content URLs are relative to:
//!
//! ```text
//! toplevel/            root = toplevel/photos
//! └── photos/
//!     └── a.jpg        # → "photos/a.jpg"
//! ```

use crate::config::Config;
use crate::repo::{self, RepoError, RepositoryInfoProvider};
use crate::scan::{self, ScanError};
use crate::types::{ImageEntry, RepositoryIdentity};
use crate::urls::{RawBase, UrlError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl InventoryError {
    /// Filesystem failures abort the run; repository problems are reported
    /// and the run ends quietly with nothing produced.
    pub fn is_fatal(&self) -> bool {
        matches!(self, InventoryError::Scan(_))
    }
}

/// Every image in the working tree, with its raw-content URL.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub identity: RepositoryIdentity,
    pub base: RawBase,
    /// Working-tree top level; image paths are relative to it.
    pub toplevel: PathBuf,
    /// Sorted by path.
    pub images: Vec<ImageEntry>,
}

/// Inspect the repository behind `provider`, then list the images under `root`.
///
/// The repository is inspected first, so a non-GitHub checkout fails before
/// any walking happens. `root` must lie inside the working tree.
pub fn build(
    provider: &dyn RepositoryInfoProvider,
    root: &Path,
    config: &Config,
) -> Result<Inventory, InventoryError> {
    let identity = repo::inspect(provider, &config.remote)?;
    let base = RawBase::new(&identity)?;
    let toplevel = resolve(&provider.toplevel()?)?;
    let prefix = root_prefix(&resolve(root)?, &toplevel)?;
    debug!(toplevel = %toplevel.display(), prefix = %prefix, "rebasing scan");

    let images = scan::scan(root, &config.scan)?
        .into_iter()
        .map(|rel| {
            let path = if prefix.is_empty() {
                rel
            } else {
                format!("{prefix}/{rel}")
            };
            let url = base.url_for(&path);
            ImageEntry { path, url }
        })
        .collect();

    Ok(Inventory {
        identity,
        base,
        toplevel,
        images,
    })
}

fn resolve(path: &Path) -> Result<PathBuf, ScanError> {
    fs::canonicalize(path).map_err(|source| ScanError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// `/`-joined location of `root` inside `toplevel`; empty at the top level.
fn root_prefix(root: &Path, toplevel: &Path) -> Result<String, RepoError> {
    let rel = root.strip_prefix(toplevel).map_err(|_| {
        RepoError::Configuration(format!(
            "{} is outside the working tree at {}",
            root.display(),
            toplevel.display()
        ))
    })?;
    Ok(scan::relative_path_string(rel))
}

impl Inventory {
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|i| i.url.as_str())
    }
}
