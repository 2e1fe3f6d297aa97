use wordvec::search::{Cosine, Distance, Euclidean, SquaredEuclidean};

/// Distance metrics.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// L2 distance.
    #[default]
    Euclidean,

    /// Squared L2 distance.
    SquaredEuclidean,

    /// One minus cosine similarity.
    Cosine,
}

/// Metric selection arg group.
#[derive(clap::Args, Debug)]
pub struct MetricArgs {
    /// Distance metric for neighbor ranking.
    #[arg(long, value_enum, default_value_t)]
    metric: Metric,
}

impl MetricArgs {
    /// The selected distance.
    pub fn distance(&self) -> &'static dyn Distance {
        match self.metric {
            Metric::Euclidean => &Euclidean,
            Metric::SquaredEuclidean => &SquaredEuclidean,
            Metric::Cosine => &Cosine,
        }
    }
}
