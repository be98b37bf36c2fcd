//! Structural checks over a loaded table.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::index::SearchEntry;
use crate::token::is_normalized;

/// One broken structural property. `entry` is the zero-based table position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    EmptyKey { entry: usize },
    MalformedKey { entry: usize, key: String },
    NoAnchors { entry: usize, key: String },
    DuplicateKey { entry: usize, first: usize, key: String },
    DuplicateAnchor { entry: usize, key: String, url: String },
}

impl Violation {
    pub fn entry(&self) -> usize {
        match self {
            Violation::EmptyKey { entry }
            | Violation::MalformedKey { entry, .. }
            | Violation::NoAnchors { entry, .. }
            | Violation::DuplicateKey { entry, .. }
            | Violation::DuplicateAnchor { entry, .. } => *entry,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyKey { entry } => write!(f, "entry {entry}: empty key"),
            Violation::MalformedKey { entry, key } => {
                write!(f, "entry {entry}: key '{key}' is not a normalised token with numeric suffix")
            }
            Violation::NoAnchors { entry, key } => {
                write!(f, "entry {entry}: key '{key}' has no anchors")
            }
            Violation::DuplicateKey { entry, first, key } => {
                write!(f, "entry {entry}: key '{key}' already used by entry {first}")
            }
            Violation::DuplicateAnchor { entry, key, url } => {
                write!(f, "entry {entry}: anchor '{url}' repeated for key '{key}'")
            }
        }
    }
}

/// Every violation in `entries`, in table order.
pub fn validate(entries: &[SearchEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut pairs: HashSet<(&str, &str)> = HashSet::new();

    for (entry, item) in entries.iter().enumerate() {
        let key = item.key.as_str();

        if key.is_empty() {
            violations.push(Violation::EmptyKey { entry });
        } else if !is_normalized(key) {
            violations.push(Violation::MalformedKey {
                entry,
                key: key.to_string(),
            });
        }

        if item.anchors.is_empty() {
            violations.push(Violation::NoAnchors {
                entry,
                key: key.to_string(),
            });
        }

        if let Some(&first) = first_seen.get(key) {
            violations.push(Violation::DuplicateKey {
                entry,
                first,
                key: key.to_string(),
            });
        } else {
            first_seen.insert(key, entry);
        }

        for anchor in &item.anchors {
            if !pairs.insert((key, anchor.url.as_str())) {
                violations.push(Violation::DuplicateAnchor {
                    entry,
                    key: key.to_string(),
                    url: anchor.url.clone(),
                });
            }
        }
    }

    tracing::debug!(
        entries = entries.len(),
        violations = violations.len(),
        "validated search index"
    );
    violations
}
