//! ezconf-formats — YAML and JSON front-ends for [`ezconf_core::Factory`].
//!
//! Each front-end keeps one global factory per base type, keyed by the parsed
//! node type of its format, so the same hierarchy can be registered for both
//! YAML and JSON independently.

pub mod json;
pub mod types;
pub mod yaml;

/// A tag found in a document, with the path of the node that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSite {
    /// `$` for the root, `.key` for mapping entries, `[i]` for sequence items.
    pub path: String,
    pub tag: String,
}
