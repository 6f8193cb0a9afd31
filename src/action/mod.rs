//! Action-definition layer: the repository identifier and the parsed metadata.
//!
//! This module knows nothing about diagrams or the network. It owns:
//! - Nwo (owner/repo identifier + syntax check)
//! - ActionDocument (action.yml, parsed and classified)

pub mod document;
pub mod nwo;

pub use document::ActionDocument;
pub use nwo::Nwo;

/// Which of the two candidate filenames a definition was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFile {
    /// `action.yml`, tried first.
    Yml,
    /// `action.yaml`, the alternate.
    Yaml,
}

impl ActionFile {
    /// Candidates in the order they are tried.
    pub const CANDIDATES: [ActionFile; 2] = [ActionFile::Yml, ActionFile::Yaml];

    pub fn file_name(self) -> &'static str {
        match self {
            ActionFile::Yml => "action.yml",
            ActionFile::Yaml => "action.yaml",
        }
    }

    pub fn is_alternate(self) -> bool {
        self == ActionFile::Yaml
    }
}
