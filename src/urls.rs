//! Raw-content URL construction.
//!
//! GitHub serves file bytes at
//! `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}`.
//! [`RawBase`] holds everything up to and including the branch; image URLs
//! are that prefix plus the relative path, percent-encoded one segment at a
//! time so `/` keeps separating directories:
//!
//! ```text
//! "Living Room/café 1.jpg" → "Living%20Room/caf%C3%A9%201.jpg"
//! ```

use crate::types::RepositoryIdentity;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use thiserror::Error;
use url::Url;

pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com/";

/// Everything except `A-Z a-z 0-9 - . _ ~` is escaped inside a segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum UrlError {
    #[error("Invalid URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("URL cannot take path segments: {0}")]
    NotABase(String),
}

/// `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBase {
    url: Url,
}

impl RawBase {
    /// Build the base URL for a repository at a branch.
    ///
    /// A branch such as `release/2024` contributes two path segments, which is
    /// how raw.githubusercontent.com addresses it.
    pub fn new(identity: &RepositoryIdentity) -> Result<Self, UrlError> {
        let mut url = Url::parse(RAW_CONTENT_HOST)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UrlError::NotABase(RAW_CONTENT_HOST.to_string()))?;
            segments
                .pop_if_empty()
                .push(&identity.owner)
                .push(&identity.repo)
                .extend(identity.branch.split('/'))
                // trailing slash
                .push("");
        }
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// URL for a file at `rel_path` (relative to the repository root).
    pub fn url_for(&self, rel_path: &str) -> String {
        format!("{}{}", self.url, percent_encode_path(rel_path))
    }
}

impl fmt::Display for RawBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent-encode each `/`-separated segment of `path`, keeping the slashes.
pub fn percent_encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
