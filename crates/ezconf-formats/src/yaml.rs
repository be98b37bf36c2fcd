//! YAML front-end.
//!
//! Objects are written as tagged nodes: the tag selects the creator, the node
//! underneath is the payload.
//!
//! ```yaml
//! shapes:
//!   - !circle
//!     radius: 2.0
//!   - !square 3.0
//! ```
//!
//! Creators are registered per base type with [`register`] (or the
//! [`ez_yaml_register!`](crate::ez_yaml_register) macro). The payload is
//! deserialized into an intermediate type first, then handed to the creator.
//! [`Boxed`] and [`Shared`] make tagged objects usable as fields of ordinary
//! serde-derived config structs.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use ezconf_core::{Error, Factory, Result};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;

pub use crate::TagSite;

/// Factory whose creators take a YAML payload.
pub type YamlFactory<B> = Factory<B, Value>;

/// Register a creator with the global YAML factory for `B`.
///
/// The payload under `tag` is deserialized into `I` and passed to `creator`.
/// `tag` must start with `!` and name something after it.
pub fn register<B, I, F>(tag: &str, creator: F) -> Result<()>
where
    B: ?Sized + 'static,
    I: DeserializeOwned + 'static,
    F: Fn(I) -> Box<B> + Send + Sync + 'static,
{
    register_in(YamlFactory::<B>::global(), tag, creator)
}

/// Like [`register`], against an explicit factory.
pub fn register_in<B, I, F>(factory: &YamlFactory<B>, tag: &str, creator: F) -> Result<()>
where
    B: ?Sized + 'static,
    I: DeserializeOwned + 'static,
    F: Fn(I) -> Box<B> + Send + Sync + 'static,
{
    check_tag(tag)?;
    let owned_tag = tag.to_string();
    factory.register_fallible(tag, move |payload: Value| {
        let intermediate: I =
            serde_yaml::from_value(payload).map_err(|e| Error::decode(owned_tag.as_str(), e))?;
        Ok(creator(intermediate))
    })
}

/// Build an object from a tagged node using the global factory for `B`.
pub fn create<B: ?Sized + 'static>(node: Value) -> Result<Box<B>> {
    create_in(YamlFactory::<B>::global(), node)
}

/// Build an object from a tagged node using an explicit factory.
pub fn create_in<B: ?Sized + 'static>(factory: &YamlFactory<B>, node: Value) -> Result<Box<B>> {
    match node {
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            factory.create(&tag.to_string(), value)
        }
        _ => Err(Error::MissingTag),
    }
}

/// Parse `text` as a single tagged YAML document and build the object.
pub fn from_str<B: ?Sized + 'static>(text: &str) -> Result<Box<B>> {
    let node: Value = serde_yaml::from_str(text).map_err(|e| Error::Parse(e.into()))?;
    create(node)
}

fn check_tag(tag: &str) -> Result<()> {
    if tag.len() < 2 || !tag.starts_with('!') {
        tracing::warn!(tag, "rejected yaml tag without ! prefix");
        return Err(Error::InvalidTag(tag.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tag inspection
// ---------------------------------------------------------------------------

/// Every tag in `node`, in document order.
pub fn collect_tags(node: &Value) -> Vec<TagSite> {
    let mut sites = Vec::new();
    walk(node, "$".to_string(), &mut sites);
    sites
}

fn walk(node: &Value, path: String, sites: &mut Vec<TagSite>) {
    match node {
        Value::Tagged(tagged) => {
            sites.push(TagSite {
                path: path.clone(),
                tag: tagged.tag.to_string(),
            });
            walk(&tagged.value, path, sites);
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, format!("{path}[{i}]"), sites);
            }
        }
        Value::Mapping(map) => {
            for (key, value) in map {
                walk(value, format!("{path}.{}", key_label(key)), sites);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => "?".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Deserialize wrappers
// ---------------------------------------------------------------------------

/// Owned object built through the global YAML factory for `B` when
/// deserialized.
pub struct Boxed<B: ?Sized>(pub Box<B>);

/// Shared object built through the global YAML factory for `B` when
/// deserialized.
pub struct Shared<B: ?Sized>(pub Arc<B>);

impl<B: ?Sized> Boxed<B> {
    pub fn into_inner(self) -> Box<B> {
        self.0
    }
}

impl<B: ?Sized> Shared<B> {
    pub fn into_inner(self) -> Arc<B> {
        self.0
    }
}

impl<'de, B: ?Sized + 'static> Deserialize<'de> for Boxed<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let node = Value::deserialize(deserializer)?;
        create::<B>(node).map(Boxed).map_err(D::Error::custom)
    }
}

impl<'de, B: ?Sized + 'static> Deserialize<'de> for Shared<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Boxed::<B>::deserialize(deserializer).map(|boxed| Shared(Arc::from(boxed.0)))
    }
}

impl<B: ?Sized> Deref for Boxed<B> {
    type Target = B;
    fn deref(&self) -> &B {
        &self.0
    }
}

impl<B: ?Sized> DerefMut for Boxed<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.0
    }
}

impl<B: ?Sized> Deref for Shared<B> {
    type Target = B;
    fn deref(&self) -> &B {
        &self.0
    }
}

impl<B: ?Sized> Clone for Shared<B> {
    fn clone(&self) -> Self {
        Shared(Arc::clone(&self.0))
    }
}

impl<B: ?Sized + fmt::Debug> fmt::Debug for Boxed<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Boxed").field(&&*self.0).finish()
    }
}

impl<B: ?Sized + fmt::Debug> fmt::Debug for Shared<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&&*self.0).finish()
    }
}

/// Register `Derived` with the global YAML factory for `Base`.
///
/// Without an intermediate type the payload deserializes straight into
/// `Derived`; with one, the payload deserializes into `Intermediate` and
/// `Derived: From<Intermediate>` builds the object.
///
/// ```ignore
/// ez_yaml_register!(dyn Shape, "!circle", Circle)?;
/// ez_yaml_register!(dyn Shape, "!square", Square, f64)?;
/// ```
#[macro_export]
macro_rules! ez_yaml_register {
    ($base:ty, $tag:expr, $derived:ty $(,)?) => {
        $crate::yaml::register::<$base, $derived, _>($tag, |derived: $derived| {
            ::std::boxed::Box::new(derived) as ::std::boxed::Box<$base>
        })
    };
    ($base:ty, $tag:expr, $derived:ty, $intermediate:ty $(,)?) => {
        $crate::yaml::register::<$base, $intermediate, _>($tag, |intermediate: $intermediate| {
            ::std::boxed::Box::new(<$derived>::from(intermediate)) as ::std::boxed::Box<$base>
        })
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
