//! serde helpers for value shapes that keep showing up in configuration.
//!
//! Several shapes need nothing from this module because serde derive already
//! covers them, in both YAML and JSON:
//!
//! - optional values: `Option<T>` reads `null` / `~` as `None`;
//! - filesystem paths: `PathBuf`;
//! - enums by variant name: `#[derive(Deserialize)] enum Mode { Fast, Safe }`
//!   reads `Fast`;
//! - tagged alternatives: an externally tagged enum reads YAML `!double 3.14`
//!   or JSON `{"double": 3.14}` into `Value::Double(3.14)`;
//! - plain structs: `#[derive(Deserialize)]`.

pub mod duration;
pub mod geometry;
pub mod unique_map;

pub use duration::HumanDuration;
pub use geometry::{DVector, Matrix, Pose2, Pose3, Quaternion, Rotation2, Vector};
pub use unique_map::UniqueMap;
