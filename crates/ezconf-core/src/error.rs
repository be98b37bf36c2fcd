//! Error type shared by the ezconf crates.
//!
//! Registration and creation failures surface as [`Error`] values rather than
//! panics. Format front-ends wrap their parser errors into
//! [`Error::Parse`] and [`Error::Decode`] so callers only match on one type.

/// Boxed error used as the source of parse and decode failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias used throughout the ezconf crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A creator is already registered under this tag.
    #[error("Tag '{0}' already present")]
    DuplicateTag(String),

    /// No creator is registered under this tag.
    #[error("Could not find tag '{tag}'. Available tags: [{}]", quote_list(.available))]
    UnknownTag { tag: String, available: Vec<String> },

    /// YAML tags must look like `!name`.
    #[error("yaml tag must start with !, got '{0}'")]
    InvalidTag(String),

    /// A YAML node without a tag was handed to a factory.
    #[error("expected a tagged node of the form `!tag payload`, found an untagged value")]
    MissingTag,

    /// A JSON value that is not an object with exactly one key.
    #[error("Expected dictionary of size 1 of format {{tag: object}}")]
    NotSingleKeyObject,

    /// The payload under a known tag could not be decoded into the
    /// intermediate type.
    #[error("failed to decode payload for tag '{tag}': {source}")]
    Decode {
        tag: String,
        #[source]
        source: BoxError,
    },

    /// The document text itself could not be parsed.
    #[error("failed to parse document: {0}")]
    Parse(#[source] BoxError),
}

impl Error {
    /// Build a [`Error::Decode`] for `tag` from any error value.
    pub fn decode(tag: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Decode {
            tag: tag.into(),
            source: source.into(),
        }
    }

    /// The tag this error is about, if it concerns a specific one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Error::DuplicateTag(tag) | Error::InvalidTag(tag) => Some(tag),
            Error::UnknownTag { tag, .. } | Error::Decode { tag, .. } => Some(tag),
            Error::MissingTag | Error::NotSingleKeyObject | Error::Parse(_) => None,
        }
    }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
