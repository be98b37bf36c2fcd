//! ezconf-core — tag registries for building trait objects from configuration.
//!
//! This crate holds the pieces every front-end shares: the tag-keyed
//! [`Factory`], process-wide [`global`] instances, the common [`Error`] type
//! and the tool configuration.
//!
//! # Architecture
//!
//! ```text
//! document ──► front-end (yaml / json) ──► Factory<B, node> ──► Box<B>
//!                                             ▲
//!                      register(tag, creator) ┘
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod global;

pub use error::{BoxError, Error, Result};
pub use factory::Factory;
