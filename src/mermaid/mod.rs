//! Mermaid rendering: the flowchart itself plus the helpers it leans on
//! (text contrast, line lookup, permalinks).

pub mod contrast;
pub mod flowchart;
pub mod lines;
pub mod link;

pub use flowchart::{AddressingContext, Diagram, render};
pub use link::LinkConfig;
