//! Shared types passed between the pipeline stages.
//!
//! [`OutputBundle`] is the only one written to disk; its field order is the
//! key order of `image_data.json`, and [`ImageRecord`]'s field order is the
//! column order of `image_data.csv`.

use serde::{Deserialize, Serialize};

/// Who owns the repository and which branch is checked out.
///
/// Derived once per run from the VCS remote configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepositoryIdentity {
    /// `owner/repo`, the form GitHub shows in its UI.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// An image path paired with its raw-content URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    pub url: String,
}

/// One image with its size metadata, as exported to JSON and CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path relative to the repository root, `/`-separated.
    pub filename: String,
    pub url: String,
    pub size_bytes: u64,
    /// Size in MiB, rounded to two decimals.
    pub size_mb: f64,
}

/// Everything `export` writes out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputBundle {
    /// `owner/repo`
    pub repository: String,
    pub branch: String,
    pub base_url: String,
    pub total_images: usize,
    pub images: Vec<ImageRecord>,
}
