//! Shared test utilities for ezconf integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Global factories live for the whole test binary, so
//! every harness registers through [`register_shapes`], which runs once.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
