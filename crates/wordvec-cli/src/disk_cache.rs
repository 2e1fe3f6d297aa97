use std::path::PathBuf;

use wordvec::{
    EmbeddingTableOptions,
    disk_cache::WordvecDiskCacheOptions,
    pretrained::DiskCacheSourceLoader,
};

/// Disk cache argument group.
#[derive(clap::Args, Debug)]
pub struct DiskCacheArgs {
    /// Cache directory for parsed artifacts.
    #[arg(long, default_value = None)]
    cache_dir: Option<PathBuf>,

    /// Data directory holding pretrained text sources.
    #[arg(long, default_value = None)]
    data_dir: Option<PathBuf>,

    /// Do not write parsed artifacts.
    #[arg(long)]
    no_write_cache: bool,
}

impl DiskCacheArgs {
    /// The disk cache options.
    pub fn options(&self) -> WordvecDiskCacheOptions {
        WordvecDiskCacheOptions::default()
            .with_cache_dir(self.cache_dir.as_ref())
            .with_data_dir(self.data_dir.as_ref())
    }

    /// The table options; the cache dir is filled in by the loader.
    pub fn table_options(&self) -> EmbeddingTableOptions {
        EmbeddingTableOptions::default().with_write_cache(!self.no_write_cache)
    }

    /// Initialize the pretrained source loader.
    pub fn init_loader(&self) -> Result<DiskCacheSourceLoader, Box<dyn std::error::Error>> {
        Ok(DiskCacheSourceLoader::new(self.options())?.with_options(self.table_options()))
    }
}
