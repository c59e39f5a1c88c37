//! # raw-image-urls
//!
//! Lists the JPEG images in a GitHub-backed working tree as
//! `raw.githubusercontent.com` URLs, optionally exporting them with size
//! metadata as text, JSON and CSV.
//!
//! # Pipeline
//!
//! Every run is a single linear pass:
//!
//! ```text
//! inspect    git remote + branch  →  RepositoryIdentity
//! enumerate  working tree         →  sorted relative paths
//! build      paths                →  raw-content URLs
//! export     URLs + file sizes    →  image_urls_only.txt, image_data.json, image_data.csv
//! ```
//!
//! `list` stops after building URLs and prints them all; `export` continues
//! through the last step and prints a short summary.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`repo`] | Reads remote URL and branch through [`repo::RepositoryInfoProvider`]; parses GitHub HTTPS remotes |
//! | [`scan`] | Walks the tree, prunes `.git`, collects image paths |
//! | [`urls`] | Base URL and per-segment percent-encoding |
//! | [`inventory`] | Runs inspect → scan → URLs as one operation |
//! | [`export`] | File sizes and the three output files |
//! | [`output`] | Console formatting for both commands |
//! | [`config`] | Optional `.raw-image-urls.toml`, merged over stock defaults |
//! | [`types`] | `RepositoryIdentity`, `ImageEntry`, `ImageRecord`, `OutputBundle` |
//! | [`logging`] | `tracing` subscriber on stderr |
//!
//! # Failure Handling
//!
//! A repository that can't be identified (not a git checkout, no `origin`,
//! non-GitHub or SSH remote, detached HEAD) is reported as `Error: ...` and
//! the run ends successfully with nothing produced. Filesystem failures
//! while walking or writing outputs abort the run with a non-zero exit.

pub mod config;
pub mod export;
pub mod inventory;
pub mod logging;
pub mod output;
pub mod repo;
pub mod scan;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
