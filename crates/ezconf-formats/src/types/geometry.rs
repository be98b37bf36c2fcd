//! Numeric vectors, matrices, quaternions and poses as they appear in
//! robotics-style configuration.
//!
//! Accepted shapes:
//!
//! | type | forms |
//! |------|-------|
//! | [`Vector<N>`] | `[1, 2, 3]`, `{x: 1, y: 2, z: 3}` |
//! | [`DVector`] | same, any length (map form up to 4 axes) |
//! | [`Matrix`] | `[[1, 2, 3], [4, 5, 6]]` |
//! | [`Quaternion`] | `{w, x, y, z}`, `{qw, qx, qy, qz}` |
//! | [`Pose3`] | `{translation: .., orientation: ..}`, `{x, y, z, qw, qx, qy, qz}` |
//! | [`Rotation2`] | `0.5` (yaw), `{qz, qw}`, `{z, w}` |
//! | [`Pose2`] | `{translation: [x, y], orientation: ..}`, `{x, y, qz, qw}`, `{x, y, z, w}`, `{x, y, yaw}` |

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

const AXES: [&str; 4] = ["x", "y", "z", "w"];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVector {
    Seq(Vec<f64>),
    Map(BTreeMap<String, f64>),
}

impl RawVector {
    fn into_values(self, expected: Option<usize>) -> Result<Vec<f64>, String> {
        match self {
            RawVector::Seq(values) => match expected {
                Some(n) if values.len() != n => Err(size_message(n, values.len())),
                _ => Ok(values),
            },
            RawVector::Map(mut map) => {
                let n = expected.unwrap_or(map.len());
                if n > AXES.len() || map.len() != n {
                    return Err(format!(
                        "vector map must have exactly the keys {}",
                        AXES[..n.min(AXES.len())].join(", ")
                    ));
                }
                AXES[..n]
                    .iter()
                    .map(|axis| {
                        map.remove(*axis)
                            .ok_or_else(|| format!("vector map is missing key '{axis}'"))
                    })
                    .collect()
            }
        }
    }
}

fn size_message(expected: usize, got: usize) -> String {
    format!("Invalid size of numeric yaml vector: expected '{expected}' but got '{got}'")
}

/// Fixed-size vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>(pub [f64; N]);

impl<'de, const N: usize> Deserialize<'de> for Vector<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = RawVector::deserialize(deserializer)?
            .into_values(Some(N))
            .map_err(D::Error::custom)?;
        let array: [f64; N] = values
            .try_into()
            .map_err(|v: Vec<f64>| D::Error::custom(size_message(N, v.len())))?;
        Ok(Vector(array))
    }
}

/// Vector whose length comes from the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DVector(pub Vec<f64>);

impl<'de> Deserialize<'de> for DVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawVector::deserialize(deserializer)?
            .into_values(None)
            .map(DVector)
            .map_err(D::Error::custom)
    }
}

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build from rows; fails on an empty list or rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let cols = match rows.first() {
            Some(first) => first.len(),
            None => return Err("Can not parse empty matrix".to_string()),
        };
        if rows.iter().any(|row| row.len() != cols) {
            return Err("Not all rows have the same length".to_string());
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(D::Error::custom)
    }
}

/// Rotation quaternion, components as written (not normalised).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[derive(Deserialize)]
struct RawQuaternion {
    w: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    qw: Option<f64>,
    qx: Option<f64>,
    qy: Option<f64>,
    qz: Option<f64>,
}

fn quaternion_from_parts(
    prefixed: [Option<f64>; 4],
    plain: [Option<f64>; 4],
) -> Result<Quaternion, String> {
    let parts = if prefixed[0].is_some() { prefixed } else { plain };
    match parts {
        [Some(w), Some(x), Some(y), Some(z)] => Ok(Quaternion { w, x, y, z }),
        _ => Err("quaternion needs w, x, y, z (or qw, qx, qy, qz)".to_string()),
    }
}

impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawQuaternion::deserialize(deserializer)?;
        quaternion_from_parts([raw.qw, raw.qx, raw.qy, raw.qz], [raw.w, raw.x, raw.y, raw.z])
            .map_err(D::Error::custom)
    }
}

/// Rigid transform in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose3 {
    pub translation: [f64; 3],
    pub orientation: Quaternion,
}

#[derive(Deserialize)]
struct RawPose3 {
    translation: Option<Vector<3>>,
    orientation: Option<Quaternion>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    qw: Option<f64>,
    qx: Option<f64>,
    qy: Option<f64>,
    qz: Option<f64>,
}

impl<'de> Deserialize<'de> for Pose3 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPose3::deserialize(deserializer)?;
        if raw.qw.is_some() {
            let orientation =
                quaternion_from_parts([raw.qw, raw.qx, raw.qy, raw.qz], [None; 4])
                    .map_err(D::Error::custom)?;
            return match (raw.x, raw.y, raw.z) {
                (Some(x), Some(y), Some(z)) => Ok(Pose3 {
                    translation: [x, y, z],
                    orientation,
                }),
                _ => Err(D::Error::custom("flat pose needs x, y, z next to qw, qx, qy, qz")),
            };
        }
        match (raw.translation, raw.orientation) {
            (Some(Vector(translation)), Some(orientation)) => Ok(Pose3 {
                translation,
                orientation,
            }),
            _ => Err(D::Error::custom(
                "pose needs translation and orientation, or flat x, y, z, qw, qx, qy, qz",
            )),
        }
    }
}

/// Rotation in the plane, stored as its angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation2 {
    pub yaw: f64,
}

impl Rotation2 {
    pub const IDENTITY: Rotation2 = Rotation2 { yaw: 0.0 };

    /// From the `z` and `w` parts of a quaternion about the z axis.
    pub fn from_quaternion(qz: f64, qw: f64) -> Self {
        Rotation2 {
            yaw: 2.0 * qz.atan2(qw),
        }
    }

    /// `(qz, qw)` of the equivalent quaternion.
    pub fn quaternion(&self) -> (f64, f64) {
        let half = self.yaw / 2.0;
        (half.sin(), half.cos())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRotation2 {
    Yaw(f64),
    Parts {
        qz: Option<f64>,
        qw: Option<f64>,
        z: Option<f64>,
        w: Option<f64>,
    },
}

fn rotation2_from_parts(
    prefixed: [Option<f64>; 2],
    plain: [Option<f64>; 2],
) -> Result<Rotation2, String> {
    let parts = if prefixed[0].is_some() || prefixed[1].is_some() {
        prefixed
    } else {
        plain
    };
    match parts {
        [Some(z), Some(w)] => Ok(Rotation2::from_quaternion(z, w)),
        _ => Err("planar rotation needs a yaw angle, qz and qw, or z and w".to_string()),
    }
}

impl<'de> Deserialize<'de> for Rotation2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawRotation2::deserialize(deserializer)? {
            RawRotation2::Yaw(yaw) => Ok(Rotation2 { yaw }),
            RawRotation2::Parts { qz, qw, z, w } => {
                rotation2_from_parts([qz, qw], [z, w]).map_err(D::Error::custom)
            }
        }
    }
}

/// Rigid transform in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub translation: [f64; 2],
    pub orientation: Rotation2,
}

#[derive(Deserialize)]
struct RawPose2 {
    translation: Option<Vector<2>>,
    orientation: Option<Rotation2>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    w: Option<f64>,
    qz: Option<f64>,
    qw: Option<f64>,
    yaw: Option<f64>,
}

impl<'de> Deserialize<'de> for Pose2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPose2::deserialize(deserializer)?;
        let flat_orientation = if raw.qw.is_some() || raw.w.is_some() {
            Some(rotation2_from_parts([raw.qz, raw.qw], [raw.z, raw.w]).map_err(D::Error::custom)?)
        } else {
            raw.yaw.map(|yaw| Rotation2 { yaw })
        };

        if let Some(orientation) = flat_orientation {
            return match (raw.x, raw.y) {
                (Some(x), Some(y)) => Ok(Pose2 {
                    translation: [x, y],
                    orientation,
                }),
                _ => Err(D::Error::custom("flat planar pose needs x and y")),
            };
        }
        match (raw.translation, raw.orientation) {
            (Some(Vector(translation)), Some(orientation)) => Ok(Pose2 {
                translation,
                orientation,
            }),
            _ => Err(D::Error::custom(
                "planar pose needs translation and orientation, or flat x, y with yaw, qz/qw or z/w",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_from_sequence_and_map() {
        let v: Vector<3> = serde_yaml::from_str("[1., 2., 3.]").unwrap();
        assert_eq!(v, Vector([1.0, 2.0, 3.0]));
        let v: Vector<3> = serde_yaml::from_str("x: 1.\ny: 2.\nz: 3.\n").unwrap();
        assert_eq!(v, Vector([1.0, 2.0, 3.0]));
    }

    #[test]
    fn vector_wrong_size() {
        let err = serde_yaml::from_str::<Vector<3>>("[1., 2., 3., 4.]").unwrap_err();
        assert!(
            err.to_string()
                .contains("Invalid size of numeric yaml vector: expected '3' but got '4'"),
            "{err}"
        );
    }

    #[test]
    fn dynamic_vector() {
        let v: DVector = serde_yaml::from_str("[1., 2., 3., 4.]").unwrap();
        assert_eq!(v.0.len(), 4);
        let v: DVector = serde_yaml::from_str("x: 1.\ny: 2.\n").unwrap();
        assert_eq!(v, DVector(vec![1.0, 2.0]));
        assert!(serde_yaml::from_str::<DVector>("x: 1.\nz: 2.\n").is_err());
    }

    #[test]
    fn matrix_rows() {
        let m: Matrix = serde_yaml::from_str("[[1., 2., 3.], [4., 5., 6.]]").unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.row(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn matrix_errors() {
        let empty = serde_yaml::from_str::<Matrix>("[]").unwrap_err();
        assert!(empty.to_string().contains("Can not parse empty matrix"));
        let ragged = serde_yaml::from_str::<Matrix>("[[1., 2., 3.], [4., 5.]]").unwrap_err();
        assert!(ragged.to_string().contains("Not all rows have the same length"));
    }

    #[test]
    fn quaternion_both_spellings() {
        let expected = Quaternion {
            w: 0.0,
            x: 0.0,
            y: 0.0,
            z: 1.0,
        };
        let q: Quaternion = serde_yaml::from_str("w: 0.\nx: 0.\ny: 0.\nz: 1.\n").unwrap();
        assert_eq!(q, expected);
        let q: Quaternion = serde_yaml::from_str("qw: 0.\nqx: 0.\nqy: 0.\nqz: 1.\n").unwrap();
        assert_eq!(q, expected);
        assert_eq!(q.norm(), 1.0);
    }

    #[test]
    fn pose_nested_and_flat_agree() {
        let nested: Pose3 = serde_yaml::from_str(
            "translation:\n  x: 1.\n  y: -1.\n  z: 1.\norientation:\n  w: 0.\n  x: 0.\n  y: 0.\n  z: 1.\n",
        )
        .unwrap();
        let flat: Pose3 =
            serde_yaml::from_str("x: 1.\ny: -1.\nz: 1.\nqw: 0.\nqx: 0.\nqy: 0.\nqz: 1.\n").unwrap();
        assert_eq!(nested, flat);
        assert_eq!(flat.translation, [1.0, -1.0, 1.0]);
    }

    #[test]
    fn pose_incomplete() {
        assert!(serde_yaml::from_str::<Pose3>("translation: [1., 2., 3.]\n").is_err());
    }
    fn assert_yaw(rotation: Rotation2, expected: f64) {
        assert!(
            (rotation.yaw - expected).abs() < 1e-12,
            "yaw {} != {expected}",
            rotation.yaw
        );
    }

    #[test]
    fn rotation2_all_forms() {
        let half = std::f64::consts::FRAC_PI_4;
        let from_yaw: Rotation2 = serde_yaml::from_str("1.5").unwrap();
        assert_yaw(from_yaw, 1.5);
        let prefixed: Rotation2 =
            serde_yaml::from_str(&format!("qz: {}\nqw: {}\n", half.sin(), half.cos())).unwrap();
        assert_yaw(prefixed, std::f64::consts::FRAC_PI_2);
        let plain: Rotation2 = serde_yaml::from_str("z: 0.\nw: 1.\n").unwrap();
        assert_yaw(plain, 0.0);
        assert!(serde_yaml::from_str::<Rotation2>("qz: 1.\n").is_err());
    }

    #[test]
    fn rotation2_quaternion_round_trip() {
        let (qz, qw) = Rotation2 { yaw: 0.7 }.quaternion();
        assert_yaw(Rotation2::from_quaternion(qz, qw), 0.7);
    }

    #[test]
    fn pose2_all_forms() {
        let with_yaw: Pose2 = serde_yaml::from_str("x: 1.\ny: 2.\nyaw: 0.5\n").unwrap();
        assert_eq!(with_yaw.translation, [1.0, 2.0]);
        assert_yaw(with_yaw.orientation, 0.5);

        let flat_q: Pose2 = serde_yaml::from_str("x: 1.\ny: 2.\nqz: 0.\nqw: 1.\n").unwrap();
        assert_eq!(flat_q.translation, [1.0, 2.0]);
        assert_yaw(flat_q.orientation, 0.0);

        let flat_zw: Pose2 = serde_yaml::from_str("x: -1.\ny: 0.\nz: 0.\nw: 1.\n").unwrap();
        assert_eq!(flat_zw.translation, [-1.0, 0.0]);

        let nested: Pose2 =
            serde_yaml::from_str("translation: [1., 2.]\norientation: 0.5\n").unwrap();
        assert_eq!(nested, with_yaw);

        let nested_map: Pose2 = serde_yaml::from_str(
            "translation: {x: 1., y: 2.}\norientation: {qz: 0., qw: 1.}\n",
        )
        .unwrap();
        assert_eq!(nested_map, flat_q);
    }

    #[test]
    fn pose2_incomplete() {
        let err = serde_yaml::from_str::<Pose2>("yaw: 0.5\n").unwrap_err();
        assert!(err.to_string().contains("needs x and y"), "{err}");
        assert!(serde_yaml::from_str::<Pose2>("translation: [1., 2.]\n").is_err());
    }
}
