//! Descriptor interning for generic container types.
//!
//! Non-generic `Fill` impls cache their descriptor in a per-impl `OnceLock`
//! static. That is not expressible for generic impls (a `static` inside a
//! generic item is shared across monomorphizations), so `Vec<T>`,
//! `HashMap<K, V>` and friends intern their descriptor here, keyed by
//! `TypeId`. Interned descriptors are leaked; the set is bounded by the
//! number of distinct container instantiations in the program.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use super::TypeDescriptor;

static CACHE: OnceLock<RwLock<HashMap<TypeId, &'static TypeDescriptor>>> = OnceLock::new();

/// Returns the interned descriptor for `type_id`, building it on first use.
pub(crate) fn intern(
    type_id: TypeId,
    build: impl FnOnce() -> TypeDescriptor,
) -> &'static TypeDescriptor {
    let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    {
        let map = cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(descriptor) = map.get(&type_id) {
            return descriptor;
        }
    }
    let mut map = cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *map.entry(type_id)
        .or_insert_with(|| Box::leak(Box::new(build())))
}
