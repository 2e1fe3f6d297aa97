//! # Pretrained Embedding Sources
//!
//! Named, published embedding sets, resolved to local text files by a
//! [`SourceLoader`]. Nothing is downloaded; each descriptor names the
//! archive to fetch by hand.
//!
//! ```rust,no_run
//! use wordvec::{
//!     disk_cache::WordvecDiskCacheOptions,
//!     pretrained::{DiskCacheSourceLoader, PretrainedSource},
//! };
//!
//! fn example() -> wordvec::WVResult<()> {
//!     let mut loader = DiskCacheSourceLoader::new(WordvecDiskCacheOptions::default())?;
//!     let table = PretrainedSource::Glove840B300d.load(&mut loader)?;
//!     println!("Loaded {} words", table.len());
//!     Ok(())
//! }
//! ```

pub mod glove;
pub mod source_loader;

use strum::IntoEnumIterator;

#[doc(inline)]
pub use glove::PretrainedSource;
#[cfg(feature = "disk-cache")]
#[doc(inline)]
pub use source_loader::DiskCacheSourceLoader;
#[doc(inline)]
pub use source_loader::{ConstSourceDescriptor, DirSourceLoader, SourceLoader};

/// List the names of the pretrained sources.
pub fn list_sources() -> Vec<String> {
    PretrainedSource::iter().map(|s| s.to_string()).collect()
}

/// The descriptors of the pretrained sources, in listing order.
pub fn list_descriptors() -> impl Iterator<Item = &'static ConstSourceDescriptor> {
    PretrainedSource::iter().map(|s| s.descriptor())
}

/// Look up a pretrained source by name.
pub fn find_source(name: &str) -> Option<PretrainedSource> {
    name.parse().ok()
}
