//! Permalinks back to the line of action.yml that defines a node.
//!
//! Shape: <base_url>/<owner>/<repo>/blob/<branch>/<file>#L<line>

use crate::action::{ActionFile, Nwo};

pub const DEFAULT_BASE_URL: &str = "https://github.com";
pub const DEFAULT_BRANCH: &str = "main";

/// Where links point. Passed in explicitly rather than read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub base_url: String,
    pub branch: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl LinkConfig {
    pub fn new(base_url: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            branch: branch.into(),
        }
    }

    /// Permalink to `file` in `nwo`. With no line the link targets the whole file.
    pub fn permalink(&self, nwo: &Nwo, file: ActionFile, line: Option<usize>) -> String {
        let mut url = format!(
            "{}/{}/{}/blob/{}/{}",
            self.base_url.trim_end_matches('/'),
            nwo.owner,
            nwo.repo,
            self.branch,
            file.file_name()
        );
        if let Some(line) = line {
            url.push_str(&format!("#L{line}"));
        }
        url
    }
}
