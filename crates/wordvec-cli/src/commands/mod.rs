use std::io::Write;

use wordvec::Neighbor;

pub mod aggregate;
pub mod cache;
pub mod neighbors;
pub mod sources;

/// Subcommands for wvec
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the nearest neighbors of words.
    Neighbors(neighbors::NeighborsArgs),

    /// Aggregate target words from `sentence<TAB>target` lines.
    Aggregate(aggregate::AggregateArgs),

    /// List pretrained sources.
    #[clap(visible_alias = "ls")]
    Sources(sources::SourcesArgs),

    /// Parse a source and write its cache artifact.
    Cache(cache::CacheArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Neighbors(cmd) => cmd.run(),
            Commands::Aggregate(cmd) => cmd.run(),
            Commands::Sources(cmd) => cmd.run(),
            Commands::Cache(cmd) => cmd.run(),
        }
    }
}

/// Write hits as `(%.4f) token` lines.
pub fn write_neighbors(
    writer: &mut dyn Write,
    hits: &[Neighbor],
) -> std::io::Result<()> {
    for hit in hits {
        writeln!(writer, "({:.4}) {}", hit.distance, hit.token)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_neighbors() {
        let hits = vec![
            Neighbor {
                token: "dog".to_string(),
                distance: 0.0,
            },
            Neighbor {
                token: "puppy".to_string(),
                distance: 0.14142136,
            },
        ];
        let mut buf = Vec::new();
        write_neighbors(&mut buf, &hits).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "(0.0000) dog\n(0.1414) puppy\n");
    }
}
