//! Tag-keyed factories for trait-object hierarchies.
//!
//! A [`Factory<B, A>`] maps string tags to creator functions that build a
//! `Box<B>` from arguments of type `A`. `B` is usually a trait object
//! (`dyn Shape`), `A` is `()` for argument-less creators, a tuple for several
//! arguments, or a parsed document node for the YAML and JSON front-ends.
//!
//! Each `(B, A)` pair has one process-wide instance reachable through
//! [`Factory::global`]; [`Factory::new`] builds an independent registry for
//! callers that want explicit ownership (tests, plugins, sandboxes).
//!
//! ```
//! use ezconf_core::Factory;
//!
//! trait Shape: Send {
//!     fn sides(&self) -> u32;
//! }
//! struct Triangle;
//! impl Shape for Triangle {
//!     fn sides(&self) -> u32 { 3 }
//! }
//!
//! let shapes: Factory<dyn Shape> = Factory::new();
//! shapes.register("triangle", |()| Box::new(Triangle) as Box<dyn Shape>).unwrap();
//! assert_eq!(shapes.create("triangle", ()).unwrap().sides(), 3);
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

type Creator<B, A> = Arc<dyn Fn(A) -> Result<Box<B>> + Send + Sync>;

/// Registry of creators for the hierarchy rooted at `B`, taking `A`.
///
/// Tags are kept sorted so error messages and [`Factory::tags`] are stable.
pub struct Factory<B: ?Sized + 'static, A: 'static = ()> {
    creators: RwLock<BTreeMap<String, Creator<B, A>>>,
}

impl<B: ?Sized + 'static, A: 'static> Factory<B, A> {
    /// An empty registry, independent of the global one.
    pub fn new() -> Self {
        Self {
            creators: RwLock::new(BTreeMap::new()),
        }
    }

    /// The process-wide registry for this base and argument type.
    pub fn global() -> &'static Self {
        crate::global::instance::<Self>()
    }

    /// Add an infallible creator under `tag`.
    ///
    /// Fails with [`Error::DuplicateTag`] if the tag is taken; the existing
    /// creator stays in place.
    pub fn register<F>(&self, tag: impl Into<String>, creator: F) -> Result<()>
    where
        F: Fn(A) -> Box<B> + Send + Sync + 'static,
    {
        self.register_fallible(tag, move |args| Ok(creator(args)))
    }

    /// Add a creator that may reject its arguments.
    pub fn register_fallible<F>(&self, tag: impl Into<String>, creator: F) -> Result<()>
    where
        F: Fn(A) -> Result<Box<B>> + Send + Sync + 'static,
    {
        match self.write().entry(tag.into()) {
            Entry::Occupied(slot) => {
                tracing::warn!(tag = %slot.key(), "rejected duplicate factory tag");
                Err(Error::DuplicateTag(slot.key().clone()))
            }
            Entry::Vacant(slot) => {
                tracing::debug!(
                    tag = %slot.key(),
                    base = std::any::type_name::<B>(),
                    "registered factory method"
                );
                slot.insert(Arc::new(creator));
                Ok(())
            }
        }
    }

    /// Build the object registered under `tag`.
    ///
    /// The registry lock is released before the creator runs, so creators may
    /// call back into the same factory for nested objects.
    pub fn create(&self, tag: &str, args: A) -> Result<Box<B>> {
        let creator = self.read().get(tag).cloned();
        match creator {
            Some(creator) => {
                tracing::trace!(tag, base = std::any::type_name::<B>(), "creating object");
                creator(args)
            }
            None => Err(Error::UnknownTag {
                tag: tag.to_string(),
                available: self.tags(),
            }),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.read().contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Creator<B, A>>> {
        self.creators.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Creator<B, A>>> {
        self.creators.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: ?Sized + 'static, A: 'static> Default for Factory<B, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized + 'static, A: 'static> fmt::Debug for Factory<B, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("base", &std::any::type_name::<B>())
            .field("tags", &self.tags())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
