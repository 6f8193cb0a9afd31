//! Source-line lookup for click-through links.
//!
//! This is a plain substring scan, not a YAML-aware key search. If an input
//! name also shows up earlier in the file (in a description, say) the earlier
//! line wins and the link points there. Callers get `None` when nothing matches
//! and decide what to do with the link.

/// 1-based number of the first line of `text` containing `name`.
pub fn find_line(text: &str, name: &str) -> Option<usize> {
    text.split('\n')
        .position(|line| line.contains(name))
        .map(|idx| idx + 1)
}
