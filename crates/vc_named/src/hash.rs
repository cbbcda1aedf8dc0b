//! Hash states and the [`TypeId`] keyed map used by the caches.
//!
//! - [`FixedHashState`]: `foldhash` with a fixed seed, for string keys.
//! - [`NoOpHashState`]: passes a `u64` through, for keys that are already hashes.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::HashMap;

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Fixed hash state based upon a random but fixed seed.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`HashMap`] using [`FixedHashState`].
pub(crate) type FixedHashMap<K, V> = HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// NoOpHashState

/// A hasher storing the last `u64` written.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map with [`TypeId`] as the fixed key type.
pub(crate) struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns the value for `type_id`, inserting the result of `f` first
    /// if the key is not present.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{NoOpHashState, TypeIdMap};
    use core::any::TypeId;
    use core::hash::{BuildHasher, Hash, Hasher};

    #[test]
    fn noop_hasher_passes_u64() {
        let mut hasher = NoOpHashState.build_hasher();
        3_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 3);
    }

    #[test]
    fn type_id_map() {
        let mut map = TypeIdMap::new();
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 1), 1);
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 2), 1);
        assert!(map.contains(&TypeId::of::<u8>()));
        assert!(map.get(&TypeId::of::<u16>()).is_none());
        assert_eq!(map.len(), 1);
    }
}
