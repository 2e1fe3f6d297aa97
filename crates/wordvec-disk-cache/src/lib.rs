//! # wordvec-disk-cache
//!
//! Resolves where `wordvec` keeps raw embedding sources (the data dir)
//! and parsed table artifacts (the cache dir).
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod disk_cache;
pub mod path_resolver;

pub use disk_cache::{WordvecDiskCache, WordvecDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const WORDVEC_CACHE_DIR: &str = "WORDVEC_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const WORDVEC_DATA_DIR: &str = "WORDVEC_DATA_DIR";

/// Default [`PathResolver`] for wordvec.
pub const WORDVEC_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordvec",
    organization: "",
    application: "wordvec",
    cache_env_vars: &[WORDVEC_CACHE_DIR],
    data_env_vars: &[WORDVEC_DATA_DIR],
};
