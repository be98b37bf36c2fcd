//! JSON front-end.
//!
//! JSON has no tags, so an object is written as a dictionary with exactly one
//! key: the key is the tag, its value the payload.
//!
//! ```json
//! {"shapes": [{"circle": {"radius": 2.0}}, {"square": 3.0}]}
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use ezconf_core::{Error, Factory, Result};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

pub use crate::TagSite;

/// Factory whose creators take a JSON payload.
pub type JsonFactory<B> = Factory<B, Value>;

/// Register a creator with the global JSON factory for `B`.
pub fn register<B, I, F>(tag: &str, creator: F) -> Result<()>
where
    B: ?Sized + 'static,
    I: DeserializeOwned + 'static,
    F: Fn(I) -> Box<B> + Send + Sync + 'static,
{
    register_in(JsonFactory::<B>::global(), tag, creator)
}

/// Like [`register`], against an explicit factory.
pub fn register_in<B, I, F>(factory: &JsonFactory<B>, tag: &str, creator: F) -> Result<()>
where
    B: ?Sized + 'static,
    I: DeserializeOwned + 'static,
    F: Fn(I) -> Box<B> + Send + Sync + 'static,
{
    let owned_tag = tag.to_string();
    factory.register_fallible(tag, move |payload: Value| {
        let intermediate: I =
            serde_json::from_value(payload).map_err(|e| Error::decode(owned_tag.as_str(), e))?;
        Ok(creator(intermediate))
    })
}

/// Build an object from a `{tag: payload}` value using the global factory.
pub fn create<B: ?Sized + 'static>(value: Value) -> Result<Box<B>> {
    create_in(JsonFactory::<B>::global(), value)
}

/// Build an object from a `{tag: payload}` value using an explicit factory.
pub fn create_in<B: ?Sized + 'static>(factory: &JsonFactory<B>, value: Value) -> Result<Box<B>> {
    let Value::Object(map) = value else {
        return Err(Error::NotSingleKeyObject);
    };
    if map.len() != 1 {
        return Err(Error::NotSingleKeyObject);
    }
    match map.into_iter().next() {
        Some((tag, payload)) => factory.create(&tag, payload),
        None => Err(Error::NotSingleKeyObject),
    }
}

/// Parse `text` as JSON and build the object.
pub fn from_str<B: ?Sized + 'static>(text: &str) -> Result<Box<B>> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::Parse(e.into()))?;
    create(value)
}

// ---------------------------------------------------------------------------
// Tag inspection
// ---------------------------------------------------------------------------

/// Every single-key object in `value`, in document order. Each one is a
/// candidate `{tag: payload}` site; whether its key is a registered tag
/// depends on the factory it is handed to.
///
/// A payload object is not itself reported, only what is nested inside it,
/// and payload members keep the path of the tagged object.
pub fn collect_tags(value: &Value) -> Vec<TagSite> {
    let mut sites = Vec::new();
    walk(value, "$", &mut sites);
    sites
}

fn walk(value: &Value, path: &str, sites: &mut Vec<TagSite>) {
    match value {
        Value::Object(map) if map.len() == 1 => {
            for (tag, payload) in map {
                sites.push(TagSite {
                    path: path.to_string(),
                    tag: tag.clone(),
                });
                walk_members(payload, path, sites);
            }
        }
        _ => walk_members(value, path, sites),
    }
}

fn walk_members(value: &Value, path: &str, sites: &mut Vec<TagSite>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, &format!("{path}.{key}"), sites);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &format!("{path}[{i}]"), sites);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

// ---------------------------------------------------------------------------
// Deserialize wrappers
// ---------------------------------------------------------------------------

/// Owned object built through the global JSON factory for `B`.
pub struct Boxed<B: ?Sized>(pub Box<B>);

/// Shared object built through the global JSON factory for `B`.
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
        let value = Value::deserialize(deserializer)?;
        create::<B>(value).map(Boxed).map_err(D::Error::custom)
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

/// Register `Derived` with the global JSON factory for `Base`; see
/// [`ez_yaml_register!`](crate::ez_yaml_register) for the two forms.
#[macro_export]
macro_rules! ez_json_register {
    ($base:ty, $tag:expr, $derived:ty $(,)?) => {
        $crate::json::register::<$base, $derived, _>($tag, |derived: $derived| {
            ::std::boxed::Box::new(derived) as ::std::boxed::Box<$base>
        })
    };
    ($base:ty, $tag:expr, $derived:ty, $intermediate:ty $(,)?) => {
        $crate::json::register::<$base, $intermediate, _>($tag, |intermediate: $intermediate| {
            ::std::boxed::Box::new(<$derived>::from(intermediate)) as ::std::boxed::Box<$base>
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    trait Item: Send + Sync {
        fn id(&self) -> String;
    }

    struct Text(String);
    impl Item for Text {
        fn id(&self) -> String {
            self.0.clone()
        }
    }

    #[derive(Deserialize)]
    struct Sum {
        x: i64,
        y: i64,
    }
    impl Item for Sum {
        fn id(&self) -> String {
            (self.x + self.y).to_string()
        }
    }

    fn item_factory() -> JsonFactory<dyn Item> {
        let factory = JsonFactory::new();
        register_in(&factory, "d1", |s: String| Box::new(Text(s)) as Box<dyn Item>).unwrap();
        register_in(&factory, "d3", |s: Sum| Box::new(s) as Box<dyn Item>).unwrap();
        factory
    }

    #[test]
    fn create_intermediate_and_direct() {
        let factory = item_factory();
        assert_eq!(
            create_in(&factory, json!({"d1": "hello"})).unwrap().id(),
            "hello"
        );
        assert_eq!(
            create_in(&factory, json!({"d3": {"x": 1, "y": 2}}))
                .unwrap()
                .id(),
            "3"
        );
    }

    #[test]
    fn more_than_one_key_is_rejected() {
        let factory = item_factory();
        let err = create_in(&factory, json!({"d1": "hello", "d3": {"x": 1, "y": 2}})).map(|_| ()).unwrap_err();
        assert!(matches!(err, Error::NotSingleKeyObject));
    }

    #[test]
    fn non_objects_are_rejected() {
        let factory = item_factory();
        for value in [json!("d1"), json!([{"d1": "x"}]), json!({}), json!(null)] {
            assert!(matches!(
                create_in(&factory, value),
                Err(Error::NotSingleKeyObject)
            ));
        }
    }

    #[test]
    fn json_tags_need_no_prefix() {
        let factory = JsonFactory::<dyn Item>::new();
        register_in(&factory, "plain", |s: String| Box::new(Text(s)) as Box<dyn Item>).unwrap();
        register_in(&factory, "!bang", |s: String| Box::new(Text(s)) as Box<dyn Item>).unwrap();
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn invalid_document_is_parse_error() {
        let err = from_str::<dyn Item>(r#"{ "hello" }"#).map(|_| ()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn collects_single_key_objects() {
        let doc = json!({"name": "scene", "shapes": [{"circle": {"radius": 2.0}}, {"square": 3.0}]});
        let sites: Vec<_> = collect_tags(&doc)
            .into_iter()
            .map(|s| (s.path, s.tag))
            .collect();
        assert_eq!(
            sites,
            vec![
                ("$.shapes[0]".to_string(), "circle".to_string()),
                ("$.shapes[1]".to_string(), "square".to_string()),
            ]
        );
    }
}
