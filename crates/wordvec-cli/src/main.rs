mod commands;
mod disk_cache;
mod input_output;
mod logging;
mod metric;
mod source_selector;

use clap::Parser;
use commands::Commands;
use logging::LogArgs;

/// wvec: word-embedding lookups, aggregates and caches.
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub logging: LogArgs,

    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.logging.setup_logging(3)?;

    args.command.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_neighbors() {
        let args = Args::try_parse_from([
            "wvec",
            "-q",
            "neighbors",
            "--source",
            "glove.6B.50d",
            "--word",
            "cat",
            "--word",
            "dog",
            "-n",
            "3",
        ])
        .unwrap();
        assert!(args.logging.quiet);
        assert!(matches!(args.command, Commands::Neighbors(_)));
    }
}
