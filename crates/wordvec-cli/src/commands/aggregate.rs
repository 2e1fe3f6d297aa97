use std::io::{BufRead, Write};

use wordvec::search::{count_tokens, intersect_neighbors_by, nearest_by, weighted_aggregate};

use crate::{
    commands::write_neighbors,
    disk_cache::DiskCacheArgs,
    input_output::{InputArgs, OutputArgs},
    metric::MetricArgs,
    source_selector::SourceSelectorArgs,
};

/// Args for the aggregate command.
///
/// Input lines are `sentence<TAB>target`; a line without a tab is a bare target.
#[derive(clap::Args, Debug)]
pub struct AggregateArgs {
    #[command(flatten)]
    source: SourceSelectorArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,

    #[command(flatten)]
    metric: MetricArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Number of neighbors for the aggregate and for each target.
    #[arg(short, default_value_t = 10)]
    n: usize,
}

/// Read the lower-cased target of every non-blank line.
fn read_targets(reader: &mut dyn BufRead) -> std::io::Result<Vec<String>> {
    let mut targets = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let target = match line.split_once('\t') {
            Some((_sentence, target)) => target,
            None => line.as_str(),
        }
        .trim();
        if target.is_empty() {
            log::warn!("line {}: no target word; skipping", lineno + 1);
            continue;
        }
        targets.push(target.to_lowercase());
    }
    Ok(targets)
}

impl AggregateArgs {
    /// Run the aggregate command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let targets = {
            let mut reader = self.input.open_reader()?;
            read_targets(&mut reader)?
        };
        log::info!("Read {} target words", targets.len());

        let table = self.source.load_table(&self.disk_cache)?;
        let metric = self.metric.distance();

        let counts = count_tokens(&targets);
        let aggregate = weighted_aggregate(&table, &counts)?;
        let hits = nearest_by(&table, &aggregate, self.n, metric)?;

        let mut common: Vec<String> = intersect_neighbors_by(&table, &targets, self.n, metric)?
            .into_iter()
            .collect();
        common.sort();

        let mut writer = self.output.open_writer()?;
        write_neighbors(&mut writer, &hits)?;
        writeln!(writer)?;
        for token in &common {
            writeln!(writer, "{token}")?;
        }
        writer.flush()?;

        Ok(())
    }
}
