//! The loaded search table and its prefix lookup.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use fst::automaton::{Automaton, Str};
use fst::{IntoStreamer, Set, Streamer};

use crate::entities::unescape;
use crate::error::IndexError;
use crate::parser::{parse_document, Literal};
use crate::token::{decode_token, encode_token};
use crate::validate::{validate, Violation};

/// A documentation location for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Relative page URL, optionally with a `#fragment`.
    pub url: String,
    /// Generator flag carried with every anchor.
    pub flag: i64,
    /// Containing scope label; may be empty.
    pub scope: String,
}

impl Anchor {
    pub fn page(&self) -> &str {
        self.url.split_once('#').map_or(self.url.as_str(), |(page, _)| page)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, fragment)| fragment)
    }
}

/// One row of the table: a token, its display label and where it points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub key: String,
    /// HTML-escaped display label.
    pub label: String,
    pub anchors: Vec<Anchor>,
}

impl SearchEntry {
    pub fn display_label(&self) -> Cow<'_, str> {
        unescape(&self.label)
    }

    /// Decoded lowercase name and position suffix of the key.
    pub fn decoded_key(&self) -> Result<(String, Option<usize>), IndexError> {
        decode_token(&self.key)
    }
}

/// An ordered, read-only search table with an FST over its keys.
#[derive(Debug)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    keys: Set<Vec<u8>>,
    positions: HashMap<String, Vec<usize>>,
}

impl SearchIndex {
    /// Build from entries already in table order.
    pub fn from_entries(entries: Vec<SearchEntry>) -> Result<Self, IndexError> {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            positions.entry(entry.key.clone()).or_default().push(i);
        }

        let mut sorted: Vec<&str> = positions.keys().map(String::as_str).collect();
        sorted.sort_unstable();
        let keys = Set::from_iter(sorted)?;

        Ok(SearchIndex {
            entries,
            keys,
            positions,
        })
    }

    /// Parse the text of a generated data file.
    pub fn parse(src: &str) -> Result<Self, IndexError> {
        let rows = match parse_document(src)? {
            Literal::List(rows) => rows,
            _ => {
                return Err(IndexError::Shape {
                    entry: 0,
                    message: "top level must be a list of entries".to_string(),
                })
            }
        };
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| entry_from_literal(position, row))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(entries = entries.len(), "parsed search index");
        Self::from_entries(entries)
    }

    /// Read and parse a data file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let src = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&src)
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with exactly this key.
    pub fn get(&self, key: &str) -> Option<&SearchEntry> {
        self.positions
            .get(key)
            .and_then(|p| p.first())
            .map(|&i| &self.entries[i])
    }

    /// Entries whose key starts with the normalised `query`, in table order.
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let stem = encode_token(query.trim());
        if stem.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        let mut stream = self.keys.search(Str::new(&stem).starts_with()).into_stream();
        while let Some(key) = stream.next() {
            let found = std::str::from_utf8(key)
                .ok()
                .and_then(|k| self.positions.get(k));
            if let Some(found) = found {
                hits.extend_from_slice(found);
            }
        }
        hits.sort_unstable();
        tracing::trace!(query, stem = %stem, hits = hits.len(), "search index lookup");
        hits.into_iter().map(|i| &self.entries[i]).collect()
    }

    pub fn validate(&self) -> Vec<Violation> {
        validate(&self.entries)
    }
}

fn entry_from_literal(position: usize, row: Literal) -> Result<SearchEntry, IndexError> {
    let shape = |message: &str| IndexError::Shape {
        entry: position,
        message: message.to_string(),
    };

    let Literal::List(items) = row else {
        return Err(shape("expected [key, [label, anchors...]]"));
    };
    let [key, body]: [Literal; 2] = items
        .try_into()
        .map_err(|_| shape("expected [key, [label, anchors...]]"))?;
    let (Literal::Str(key), Literal::List(body)) = (key, body) else {
        return Err(shape("expected a string key and a list body"));
    };

    let mut body = body.into_iter();
    let Some(Literal::Str(label)) = body.next() else {
        return Err(shape("body must start with a string label"));
    };

    let anchors = body
        .map(|anchor| {
            let Literal::List(parts) = anchor else {
                return Err(shape("anchor must be [url, flag, scope]"));
            };
            let [url, flag, scope]: [Literal; 3] = parts
                .try_into()
                .map_err(|_| shape("anchor must be [url, flag, scope]"))?;
            match (url, flag, scope) {
                (Literal::Str(url), Literal::Int(flag), Literal::Str(scope)) => {
                    Ok(Anchor { url, flag, scope })
                }
                _ => Err(shape("anchor must be [string, integer, string]")),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchEntry {
        key,
        label,
        anchors,
    })
}
