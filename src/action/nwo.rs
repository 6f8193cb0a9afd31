//! "Name with owner" identifier for an action repository.
//!
//! Example: `actions/checkout`  =>  Nwo { owner: "actions", repo: "checkout" }
//!
//! Both segments are restricted to ASCII letters, digits, `-` and `_`. Anything
//! else (whitespace, extra slashes, empty segments) is rejected before we go
//! anywhere near the network.

use crate::error::ActionError;

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const NWO_RE: &str = r"^[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$";

static NWO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NWO_RE).expect("NWO_RE is a valid pattern"));

/// Returns true iff `s` is exactly `<segment>/<segment>`.
pub fn is_valid(s: &str) -> bool {
    NWO.is_match(s)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nwo {
    pub owner: String,
    pub repo: String,
}

impl FromStr for Nwo {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid(s) {
            return Err(ActionError::InvalidIdentifier(s.to_string()));
        }
        // The pattern guarantees exactly one '/'.
        let (owner, repo) = s
            .split_once('/')
            .ok_or_else(|| ActionError::InvalidIdentifier(s.to_string()))?;
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for Nwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
