//! # Source Loaders

use std::path::{Path, PathBuf};

use crate::{
    embeddings::{EmbeddingTable, EmbeddingTableOptions, cache::cache_path_for},
    errors::{WVResult, WordvecError},
};

/// A static description of a pretrained source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstSourceDescriptor {
    /// The alias, e.g. `glove.6B.100d`.
    pub name: &'static str,

    /// The cache context (sub directory) shared by a family of sources.
    pub context: &'static str,

    /// The unpacked text file name.
    pub file_name: &'static str,

    /// Where the archive containing `file_name` is published.
    pub url: &'static str,

    /// The vector width.
    pub dim: usize,
}

/// Loads [`EmbeddingTable`]s for pretrained sources.
pub trait SourceLoader {
    /// Load the table described by `descr`.
    fn load_source(
        &mut self,
        descr: &ConstSourceDescriptor,
    ) -> WVResult<EmbeddingTable>;
}

/// The error for a source with neither a text file nor a cache artifact.
fn missing_source(
    descr: &ConstSourceDescriptor,
    source: &Path,
) -> WordvecError {
    WordvecError::Load(format!(
        "no vectors found for {} at {}; unpack {} from {}",
        descr.name,
        source.display(),
        descr.file_name,
        descr.url,
    ))
}

/// Load `source`, caching under `cache_dir`.
fn load_described(
    descr: &ConstSourceDescriptor,
    source: &Path,
    cache_dir: &Path,
    options: &EmbeddingTableOptions,
) -> WVResult<EmbeddingTable> {
    let table = EmbeddingTable::load_with_options(
        source,
        options.clone().with_cache_dir(Some(cache_dir)),
    )?;
    if table.dim() != descr.dim {
        log::warn!(
            "{} declares {} dimensions, but {} has {}",
            descr.name,
            descr.dim,
            source.display(),
            table.dim()
        );
    }
    Ok(table)
}

/// Loads sources from one flat directory, which also holds the cache.
#[derive(Debug, Clone)]
pub struct DirSourceLoader {
    dir: PathBuf,
    options: EmbeddingTableOptions,
}

impl DirSourceLoader {
    /// Create a loader over `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            options: EmbeddingTableOptions::default(),
        }
    }

    /// Set the table options; the cache dir is always `dir`.
    pub fn with_options(
        mut self,
        options: EmbeddingTableOptions,
    ) -> Self {
        self.options = options;
        self
    }

    /// The directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SourceLoader for DirSourceLoader {
    fn load_source(
        &mut self,
        descr: &ConstSourceDescriptor,
    ) -> WVResult<EmbeddingTable> {
        let source = self.dir.join(descr.file_name);
        if !source.is_file() && !cache_path_for(&source, &self.dir)?.is_file() {
            return Err(missing_source(descr, &source));
        }
        load_described(descr, &source, &self.dir, &self.options)
    }
}

#[cfg(feature = "disk-cache")]
pub use disk_cache_loader::DiskCacheSourceLoader;

#[cfg(feature = "disk-cache")]
mod disk_cache_loader {
    use super::*;
    use crate::disk_cache::{WordvecDiskCache, WordvecDiskCacheOptions};

    /// Loads sources through a [`WordvecDiskCache`].
    ///
    /// Text sources are read from `<data_dir>/<context>/<file_name>`;
    /// the parsed artifacts live in `<cache_dir>/<context>/`.
    #[derive(Debug, Clone)]
    pub struct DiskCacheSourceLoader {
        disk_cache: WordvecDiskCache,
        options: EmbeddingTableOptions,
    }

    impl DiskCacheSourceLoader {
        /// Resolve the disk cache directories and build a loader.
        pub fn new(options: WordvecDiskCacheOptions) -> WVResult<Self> {
            let disk_cache = WordvecDiskCache::new(options)
                .map_err(|e| WordvecError::External(format!("{e:#}")))?;
            Ok(Self::from_disk_cache(disk_cache))
        }

        /// Wrap an existing disk cache.
        pub fn from_disk_cache(disk_cache: WordvecDiskCache) -> Self {
            Self {
                disk_cache,
                options: EmbeddingTableOptions::default(),
            }
        }

        /// Set the table options; the cache dir is always resolved by the disk cache.
        pub fn with_options(
            mut self,
            options: EmbeddingTableOptions,
        ) -> Self {
            self.options = options;
            self
        }

        /// The disk cache.
        pub fn disk_cache(&self) -> &WordvecDiskCache {
            &self.disk_cache
        }

        /// Where the text source for `descr` is expected.
        pub fn source_path(
            &self,
            descr: &ConstSourceDescriptor,
        ) -> PathBuf {
            self.disk_cache.data_path(&[descr.context], descr.file_name)
        }
    }

    impl SourceLoader for DiskCacheSourceLoader {
        fn load_source(
            &mut self,
            descr: &ConstSourceDescriptor,
        ) -> WVResult<EmbeddingTable> {
            let cache_dir = self
                .disk_cache
                .ensure_cache_dir(&[descr.context])
                .map_err(|e| WordvecError::External(format!("{e:#}")))?;

            let source = match self
                .disk_cache
                .find_data_file(&[descr.context], descr.file_name)
            {
                Ok(source) => source,
                Err(e) => {
                    let source = self.source_path(descr);
                    if !cache_path_for(&source, &cache_dir)?.is_file() {
                        log::debug!("{e:#}");
                        return Err(missing_source(descr, &source));
                    }
                    source
                }
            };
            load_described(descr, &source, &cache_dir, &self.options)
        }
    }
}
