//! Getting the raw action definition out of a repository.
//!
//! The fetcher itself is a collaborator behind [`ContentFetcher`]; this module
//! adds the `action.yml` -> `action.yaml` fallback on top of it.

pub mod attempt;
pub mod github;
pub mod local;

pub use attempt::first_success;
pub use github::{GithubConfig, GithubFetcher};
pub use local::DirFetcher;

use crate::action::{ActionFile, Nwo};
use crate::error::{ActionError, FetchError};

use log::{debug, warn};

pub trait ContentFetcher {
    /// Raw text of `path` in `owner/repo`.
    fn fetch(&self, owner: &str, repo: &str, path: &str) -> Result<String, FetchError>;
}

/// Raw definition text and the filename it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub file: ActionFile,
    pub text: String,
}

/// Fetch `action.yml`, falling back to `action.yaml` only if the first fetch fails.
///
/// A successful fetch with empty content is not retried; like a double miss it
/// is reported as [`ActionError::NotFound`].
pub fn fetch_action(fetcher: &dyn ContentFetcher, nwo: &Nwo) -> Result<Fetched, ActionError> {
    debug!("Getting metadata for action: {nwo}");

    let attempt = first_success(ActionFile::CANDIDATES, |file| {
        fetcher.fetch(&nwo.owner, &nwo.repo, file.file_name())
    });

    match attempt {
        Ok((file, text)) if !text.trim().is_empty() => {
            if file.is_alternate() {
                debug!("using alternate {} for {nwo}", file.file_name());
            }
            Ok(Fetched { file, text })
        }
        Ok((file, _)) => {
            warn!("{} in {nwo} is empty", file.file_name());
            Err(ActionError::NotFound {
                nwo: nwo.to_string(),
                source: None,
            })
        }
        Err(failures) => {
            for (file, err) in &failures {
                warn!("{} not fetched from {nwo}: {err}", file.file_name());
            }
            Err(ActionError::NotFound {
                nwo: nwo.to_string(),
                source: failures.into_iter().last().map(|(_, err)| err),
            })
        }
    }
}
