use std::io::Write;

use wordvec::search::nearest_by;

use crate::{
    commands::write_neighbors,
    disk_cache::DiskCacheArgs,
    input_output::OutputArgs,
    metric::MetricArgs,
    source_selector::SourceSelectorArgs,
};

/// Args for the neighbors command.
#[derive(clap::Args, Debug)]
pub struct NeighborsArgs {
    #[command(flatten)]
    source: SourceSelectorArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,

    #[command(flatten)]
    metric: MetricArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Query word; may be repeated.
    #[arg(long = "word", required = true)]
    words: Vec<String>,

    /// Number of neighbors per word.
    #[arg(short, default_value_t = 10)]
    n: usize,
}

impl NeighborsArgs {
    /// Run the neighbors command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let table = self.source.load_table(&self.disk_cache)?;
        let metric = self.metric.distance();
        let mut writer = self.output.open_writer()?;

        for (idx, word) in self.words.iter().enumerate() {
            if !table.contains(word) {
                log::warn!("{word:?} is not in the table; using the unknown vector");
            }
            let query = table.vector_of(word)?;
            let hits = nearest_by(&table, &query, self.n, metric)?;

            if self.words.len() > 1 {
                if idx > 0 {
                    writeln!(writer)?;
                }
                writeln!(writer, "{word}:")?;
            }
            write_neighbors(&mut writer, &hits)?;
        }
        writer.flush()?;

        Ok(())
    }
}
