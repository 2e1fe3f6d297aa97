use std::io::Write;

use wordvec::{embeddings::cache::cache_path_for, pretrained::list_descriptors};

use crate::{disk_cache::DiskCacheArgs, input_output::OutputArgs};

/// Args for the sources listing command.
#[derive(clap::Args, Debug)]
pub struct SourcesArgs {
    #[command(flatten)]
    disk_cache: DiskCacheArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl SourcesArgs {
    /// Run the sources listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let loader = self.disk_cache.init_loader()?;
        let mut writer = self.output.open_writer()?;

        for descr in list_descriptors() {
            let source = loader.source_path(descr);
            let cache_dir = loader.disk_cache().cache_path(&[descr.context], "");
            let status = if cache_path_for(&source, &cache_dir)?.is_file() {
                "cached"
            } else if source.is_file() {
                "source"
            } else {
                "missing"
            };

            writeln!(writer, "\"{}\" - {}d [{}]", descr.name, descr.dim, status)?;
            writeln!(writer, "    file: {}", source.display())?;
            writeln!(writer, "    from: {}", descr.url)?;
        }
        writer.flush()?;

        Ok(())
    }
}
