//! Repository inspection: which GitHub repository and branch are we on?
//!
//! The answer comes from two pieces of ambient VCS state: the URL of a
//! remote (normally `origin`) and the currently checked-out branch. Both are
//! read through [`RepositoryInfoProvider`] so tests can substitute canned
//! answers; [`GitCli`] is the real implementation and shells out to `git`.
//!
//! Only HTTPS GitHub remotes are understood:
//!
//! ```text
//! https://github.com/acme/shots.git   → ("acme", "shots")
//! https://github.com/acme/shots       → ("acme", "shots")
//! git@github.com:acme/shots.git       → unsupported
//! ```

use crate::types::RepositoryIdentity;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

const GITHUB_HTTPS_PREFIX: &str = "https://github.com/";

#[derive(Error, Debug)]
pub enum RepoError {
    /// The VCS state exists but doesn't describe a GitHub HTTPS checkout.
    #[error("Unsupported repository configuration: {0}")]
    Configuration(String),
    /// The VCS command itself could not be run or exited non-zero.
    #[error("Failed to get repository information: `{command}`: {message}")]
    Execution { command: String, message: String },
}

/// Source of the two facts the inspector needs.
pub trait RepositoryInfoProvider {
    /// URL configured for the named remote, trimmed.
    fn remote_url(&self, remote: &str) -> Result<String, RepoError>;
    /// Name of the checked-out branch, trimmed. Empty on a detached HEAD.
    fn current_branch(&self) -> Result<String, RepoError>;
    /// Absolute path of the working tree's top-level directory.
    fn toplevel(&self) -> Result<PathBuf, RepoError>;
}

/// Reads repository state by running the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run git commands inside `workdir`.
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, RepoError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, workdir = %self.workdir.display(), "running");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| RepoError::Execution {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(RepoError::Execution { command, message });
        }

        decode_stdout(&command, output.stdout)
    }
}

/// Trimmed UTF-8 text of a successful command's stdout.
fn decode_stdout(command: &str, stdout: Vec<u8>) -> Result<String, RepoError> {
    let text = String::from_utf8(stdout).map_err(|_| RepoError::Execution {
        command: command.to_string(),
        message: "output is not valid UTF-8".to_string(),
    })?;
    Ok(text.trim().to_string())
}

impl RepositoryInfoProvider for GitCli {
    fn remote_url(&self, remote: &str) -> Result<String, RepoError> {
        self.run(&["remote", "get-url", remote])
    }

    fn current_branch(&self) -> Result<String, RepoError> {
        self.run(&["branch", "--show-current"])
    }

    fn toplevel(&self) -> Result<PathBuf, RepoError> {
        self.run(&["rev-parse", "--show-toplevel"]).map(PathBuf::from)
    }
}

/// Split a GitHub HTTPS remote URL into `(owner, repo)`.
///
/// A trailing `/` and then a trailing `.git` are dropped before splitting.
/// Anything past the second path component is ignored. `.` and `..` are not
/// names; a URL built from them would silently lose a path component.
pub fn parse_github_remote(url: &str) -> Result<(String, String), RepoError> {
    let unsupported = || RepoError::Configuration(format!("unsupported remote URL format: {url}"));

    let path = url.strip_prefix(GITHUB_HTTPS_PREFIX).ok_or_else(unsupported)?;
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if is_name(owner) && is_name(repo) => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(unsupported()),
    }
}

fn is_name(component: &str) -> bool {
    !matches!(component, "" | "." | "..")
}

/// Work out the GitHub identity of the checkout behind `provider`.
///
/// Single attempt; the first failure is returned as-is.
pub fn inspect(
    provider: &dyn RepositoryInfoProvider,
    remote: &str,
) -> Result<RepositoryIdentity, RepoError> {
    let remote_url = provider.remote_url(remote)?;
    let (owner, repo) = parse_github_remote(&remote_url)?;

    let branch = provider.current_branch()?;
    if branch.is_empty() {
        return Err(RepoError::Configuration(
            "no branch is checked out (detached HEAD)".to_string(),
        ));
    }

    debug!(%owner, %repo, %branch, "repository identified");
    Ok(RepositoryIdentity {
        owner,
        repo,
        branch,
    })
}
