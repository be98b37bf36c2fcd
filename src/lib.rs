//! ezconf — build trait objects from tagged YAML and JSON configuration.
//!
//! This crate re-exports the workspace layers so applications and the
//! integration harnesses depend on one name:
//!
//! ```text
//! core (Factory, global, Error, Config)
//!   └──► formats (yaml, json, types) ──► your serde config structs
//! docindex (search table for the API reference)
//! ```
//!
//! The [`cli`] module holds the subcommands of the `ezconf` binary.

pub mod cli;

pub use ezconf_core::{config, factory, global, BoxError, Error, Factory, Result};
pub use ezconf_docindex as docindex;
pub use ezconf_formats::{json, types, yaml, TagSite};
pub use ezconf_formats::{ez_json_register, ez_yaml_register};
