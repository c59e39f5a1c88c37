//! Shared test utilities.
//!
//! [`FakeRepo`] stands in for `git` so the pipeline can be driven without a
//! real checkout; [`write_tree`] lays out files in a temp directory.

use crate::repo::{RepoError, RepositoryInfoProvider};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Canned answers for the repository inspector.
pub struct FakeRepo {
    answer: Result<(String, String), String>,
    toplevel: Option<PathBuf>,
    asked: RefCell<Vec<String>>,
}

impl FakeRepo {
    pub fn new(remote_url: &str, branch: &str) -> Self {
        Self {
            answer: Ok((remote_url.to_string(), branch.to_string())),
            toplevel: None,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Every call fails as if `git` exited non-zero with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            toplevel: None,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Report `dir` as the working tree's top level. Without it `toplevel`
    /// fails.
    pub fn at(mut self, dir: &Path) -> Self {
        self.toplevel = Some(dir.to_path_buf());
        self
    }

    /// Remote names passed to `remote_url`, in call order.
    pub fn remotes_asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn fail(&self, command: &str) -> RepoError {
        let message = match &self.answer {
            Err(message) => message.clone(),
            Ok(_) => "fatal: not a git repository".to_string(),
        };
        RepoError::Execution {
            command: command.to_string(),
            message,
        }
    }
}

impl RepositoryInfoProvider for FakeRepo {
    fn remote_url(&self, remote: &str) -> Result<String, RepoError> {
        self.asked.borrow_mut().push(remote.to_string());
        match &self.answer {
            Ok((url, _)) => Ok(url.clone()),
            Err(_) => Err(self.fail("git remote get-url")),
        }
    }

    fn current_branch(&self) -> Result<String, RepoError> {
        match &self.answer {
            Ok((_, branch)) => Ok(branch.clone()),
            Err(_) => Err(self.fail("git branch --show-current")),
        }
    }

    fn toplevel(&self) -> Result<PathBuf, RepoError> {
        match (&self.answer, &self.toplevel) {
            (Ok(_), Some(dir)) => Ok(dir.clone()),
            _ => Err(self.fail("git rev-parse --show-toplevel")),
        }
    }
}

/// Create each `/`-separated relative path under `root` as a small file,
/// making parent directories as needed. File contents are the path itself.
pub fn write_tree(root: &Path, paths: &[&str]) {
    for rel in paths {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, rel.as_bytes()).unwrap();
    }
}
