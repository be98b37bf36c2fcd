//! A small shape hierarchy registered with both global front-ends.
//!
//! ```text
//! dyn Shape ─┬─ Circle   (!circle / circle)   payload {radius}
//!            ├─ Square   (!square / square)   payload f64, via From<f64>
//!            ├─ Rect     (!rect   / rect)     payload {width, height}
//!            └─ Group    (!group  / group)    payload {children: [shape...]}
//! ```

use std::sync::Once;

use ezconf::{ez_json_register, ez_yaml_register, json, yaml};
use serde::Deserialize;

pub trait Shape: Send + Sync + std::fmt::Debug {
    fn area(&self) -> f64;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
    fn name(&self) -> &'static str {
        "circle"
    }
}

#[derive(Debug, Clone)]
pub struct Square {
    pub side: f64,
}

impl From<f64> for Square {
    fn from(side: f64) -> Self {
        Square { side }
    }
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
    fn name(&self) -> &'static str {
        "square"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Shape for Rect {
    fn area(&self) -> f64 {
        self.width * self.height
    }
    fn name(&self) -> &'static str {
        "rect"
    }
}

/// Nested shapes, built through the same global factory while it is in use.
#[derive(Debug, Deserialize)]
pub struct YamlGroup {
    pub children: Vec<yaml::Boxed<dyn Shape>>,
}

impl Shape for YamlGroup {
    fn area(&self) -> f64 {
        self.children.iter().map(|c| c.area()).sum()
    }
    fn name(&self) -> &'static str {
        "group"
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonGroup {
    pub children: Vec<json::Boxed<dyn Shape>>,
}

impl Shape for JsonGroup {
    fn area(&self) -> f64 {
        self.children.iter().map(|c| c.area()).sum()
    }
    fn name(&self) -> &'static str {
        "group"
    }
}

static REGISTER: Once = Once::new();

/// Register the shape hierarchy with the global YAML and JSON factories.
/// Safe to call from every test.
pub fn register_shapes() {
    REGISTER.call_once(|| {
        ez_yaml_register!(dyn Shape, "!circle", Circle).unwrap();
        ez_yaml_register!(dyn Shape, "!square", Square, f64).unwrap();
        ez_yaml_register!(dyn Shape, "!rect", Rect).unwrap();
        ez_yaml_register!(dyn Shape, "!group", YamlGroup).unwrap();

        ez_json_register!(dyn Shape, "circle", Circle).unwrap();
        ez_json_register!(dyn Shape, "square", Square, f64).unwrap();
        ez_json_register!(dyn Shape, "rect", Rect).unwrap();
        ez_json_register!(dyn Shape, "group", JsonGroup).unwrap();
    });
}

/// Names of a list of shapes, for compact assertions.
pub fn names<S: std::ops::Deref<Target = dyn Shape>>(shapes: &[S]) -> Vec<&'static str> {
    shapes.iter().map(|s| s.name()).collect()
}
