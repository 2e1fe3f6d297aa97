//! # Common Types

/// The reserved unknown token; always index 0 of a [`crate::vocab::Vocabulary`].
pub const UNK_TOKEN: &str = "<unk>";

/// The index every unknown token maps to.
pub const UNK_INDEX: usize = 0;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WVHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WVHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WVHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WVHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Create a new hash map with the given capacity.
pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WVHashMap<K, V> {
    WVHashMap::with_capacity(capacity)
}
