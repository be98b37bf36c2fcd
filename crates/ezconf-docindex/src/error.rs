use std::path::PathBuf;

/// Failure while loading a search index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The text is not a well-formed literal.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The literal parsed but an entry does not have the fixed tuple shape.
    #[error("entry {entry}: {message}")]
    Shape { entry: usize, message: String },

    /// A token key could not be decoded.
    #[error("invalid token '{key}': {message}")]
    Token { key: String, message: String },

    #[error("failed to build prefix index: {0}")]
    Fst(#[from] fst::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
