//! Failure taxonomy for one conversion run.
//!
//! Every variant is terminal. The orchestrator reports exactly one of these to
//! the result sink; the `Display` text is the message the user sees.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action is not of format \"owner/name\".")]
    InvalidIdentifier(String),

    /// `source` is the last fetch failure, if the fetches failed at all.
    #[error("{nwo} doesn't appear to have an action.yml or action.yaml.")]
    NotFound {
        nwo: String,
        #[source]
        source: Option<FetchError>,
    },

    #[error("Action is empty")]
    EmptyDocument,

    #[error("Action does not have a name")]
    MissingName,

    #[error("Action definition is empty")]
    EmptyDefinition,

    #[error("failed to parse action definition: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failure of a single fetch attempt. An exhausted set of attempts becomes
/// [`ActionError::NotFound`], carrying the last failure as its source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {path} failed")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
