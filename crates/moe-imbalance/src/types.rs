//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a token id in a token stream.
///
/// These are constrained to be unsigned primitive integers;
/// every tokenizer backend in this crate produces `u32`.
pub trait TokenType:
    'static + PrimInt + ToPrimitive + Unsigned + Hash + Default + Debug + Display + Send + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type IbHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IbHashMap<K, V> {
            IbHashMap::with_capacity(capacity)
        }

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type IbHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IbHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

    } else {
        /// Type Alias for hash maps in this crate.
        pub type IbHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IbHashMap<K, V> {
            IbHashMap::with_capacity(capacity)
        }
    }
}
