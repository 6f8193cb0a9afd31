//! Read action definitions from a checkout on disk.
//!
//! Owner and repo are ignored: the directory already is the repository.

use crate::error::FetchError;
use crate::fetch::ContentFetcher;

use std::fs;
use std::path::PathBuf;

pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentFetcher for DirFetcher {
    fn fetch(&self, _owner: &str, _repo: &str, path: &str) -> Result<String, FetchError> {
        let path = self.root.join(path);
        fs::read_to_string(&path).map_err(|source| FetchError::Read { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("action.yaml"), "name: x\n").unwrap();

        let fetcher = DirFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("o", "r", "action.yaml").unwrap(), "name: x\n");
        assert!(matches!(
            fetcher.fetch("o", "r", "action.yml"),
            Err(FetchError::Read { .. })
        ));
    }
}
