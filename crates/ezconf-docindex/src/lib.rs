//! ezconf-docindex — the generated API-reference search table.
//!
//! Reads `var searchData=[...]` files, checks their structural properties and
//! answers prefix queries over the normalised tokens with an [`fst::Set`].

pub mod entities;
pub mod error;
pub mod index;
mod parser;
pub mod token;
pub mod validate;

pub use error::IndexError;
pub use index::{Anchor, SearchEntry, SearchIndex};
pub use token::{decode_token, encode_token, is_normalized, with_suffix};
pub use validate::{validate, Violation};
