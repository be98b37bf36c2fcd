//! Process-wide instances keyed by type.
//!
//! [`instance`] hands out one lazily created `T` per type for the lifetime of
//! the process. The factories use it to give every `(base, arguments)` pair a
//! shared registry without a hand-written `static` per base type.

use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

type Slot = &'static (dyn Any + Send + Sync);

static INSTANCES: Lazy<RwLock<HashMap<TypeId, Slot>>> = Lazy::new(Default::default);

/// Return the global instance of `T`, creating it with `T::default()` on
/// first use.
///
/// Instances are never dropped. `T::default()` runs outside the internal lock,
/// so it may itself call `instance` for other types. When two threads race on
/// the first call, one default value wins and the other is leaked unused.
pub fn instance<T>() -> &'static T
where
    T: Default + Send + Sync + 'static,
{
    let id = TypeId::of::<T>();

    let existing = INSTANCES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    if let Some(slot) = existing {
        return downcast(slot);
    }

    let fresh: &'static T = Box::leak(Box::new(T::default()));
    let slot = *INSTANCES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert(fresh as Slot);
    tracing::trace!(ty = std::any::type_name::<T>(), "global instance ready");
    downcast(slot)
}

fn downcast<T: 'static>(slot: Slot) -> &'static T {
    match slot.downcast_ref::<T>() {
        Some(value) => value,
        None => unreachable!("global slot keyed by TypeId holds a different type"),
    }
}
