//! # Neighbor Search
//!
//! Exact nearest-neighbor queries over an [`EmbeddingTable`](crate::embeddings::EmbeddingTable).
//! Every query is a full scan; with the `rayon` feature the rows are
//! scored in parallel.

pub mod distance;
pub mod neighbors;

#[doc(inline)]
pub use distance::{Cosine, Distance, Euclidean, SquaredEuclidean};
#[doc(inline)]
pub use neighbors::{
    Neighbor,
    NeighborSearch,
    count_tokens,
    intersect_neighbors,
    intersect_neighbors_by,
    nearest,
    nearest_by,
    weighted_aggregate,
};
