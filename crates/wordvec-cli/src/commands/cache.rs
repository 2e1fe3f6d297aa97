use crate::{disk_cache::DiskCacheArgs, source_selector::SourceSelectorArgs};

/// Args for the cache command.
#[derive(clap::Args, Debug)]
pub struct CacheArgs {
    #[command(flatten)]
    source: SourceSelectorArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl CacheArgs {
    /// Run the cache command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let table = self.source.load_table(&self.disk_cache)?;
        println!("Loaded {} words", table.len());
        Ok(())
    }
}
