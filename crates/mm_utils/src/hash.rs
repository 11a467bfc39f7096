//! Provide `FixedHasher`, `NoOpHasher` and hash containers.
//!
//! `FixedHasher` is based on `foldhash` with a fixed seed, so model hashes only
//! depend on the hashed content and are stable for the lifetime of the process.
//!
//! `NoOpHasher` passes a single `u64` through, which is what [`TypeId`] keys need.
//!
//! [`TypeId`]: core::any::TypeId

use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6D0D_E1A9_F3C4_2B17);

/// A hasher whose result only depends on the written data.
///
/// Created through [`FixedHashState::build_hasher`] or [`fixed_hash`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use mm_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "pages".hash(&mut a);
/// "pages".hash(&mut b);
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hash a single value with the [`FixedHashState`].
#[inline]
pub fn fixed_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FixedHashState.build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that stores the last `u64` written to it.
///
/// Other writes are folded in byte by byte, so it stays usable for keys
/// that do not call `write_u64`.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
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

/// Build state for [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hash_is_stable() {
        assert_eq!(fixed_hash("ext.desc"), fixed_hash("ext.desc"));
        assert_ne!(fixed_hash(&1_u64), fixed_hash(&2_u64));
    }

    #[test]
    fn no_op_passes_u64() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(42);
        assert_eq!(hasher.finish(), 42);
    }
}
