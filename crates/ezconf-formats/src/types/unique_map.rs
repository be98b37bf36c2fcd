//! String-keyed maps that reject repeated keys.
//!
//! Neither YAML nor JSON deserialization into a `HashMap` complains when a key
//! appears twice; the later value silently wins. For configuration that is
//! almost always a typo, so this helper turns it into an error:
//!
//! ```
//! # use serde::Deserialize;
//! # use std::collections::HashMap;
//! #[derive(Deserialize)]
//! struct Limits {
//!     #[serde(deserialize_with = "ezconf_formats::types::unique_map::deserialize")]
//!     per_host: HashMap<String, u32>,
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::{Error as _, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

struct UniqueKeys<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
    type Value = HashMap<String, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with unique string keys")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(M::Error::custom(format!("Double key '{key}' in map")));
            }
            let value = access.next_value()?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// A `HashMap<String, V>` that fails to deserialize on repeated keys.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueMap<V>(pub HashMap<String, V>);

impl<V> UniqueMap<V> {
    pub fn into_inner(self) -> HashMap<String, V> {
        self.0
    }
}

impl<V> Deref for UniqueMap<V> {
    type Target = HashMap<String, V>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(UniqueMap)
    }
}
