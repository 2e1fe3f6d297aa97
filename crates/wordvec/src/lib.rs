//! # `wordvec` Word Embedding Suite
//!
//! Load pretrained word-embedding tables (`GloVe`-style text), cache them
//! as binary artifacts, build frequency vocabularies over them, and run
//! exact nearest-neighbor queries.
//!
//! See:
//! * [`embeddings`] to parse and cache an [`EmbeddingTable`].
//! * [`vocab`] to build a [`Vocabulary`] and attach vectors to it.
//! * [`search`] for nearest neighbors, weighted aggregates, and intersections.
//! * [`pretrained`] for the named `GloVe` sources.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordvec::{EmbeddingTable, search::NeighborSearch};
//!
//! fn example() -> wordvec::WVResult<()> {
//!     let table = EmbeddingTable::load("glove.840B.300d.txt", ".vector_cache")?;
//!     let search = NeighborSearch::new(&table);
//!     for hit in search.nearest_to_token("king", 10)? {
//!         println!("({:.4}) {}", hit.distance, hit.token);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

#[cfg(feature = "disk-cache")]
#[doc(inline)]
pub use wordvec_disk_cache as disk_cache;

pub mod embeddings;
pub mod errors;
pub mod pretrained;
pub mod search;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use embeddings::{EmbeddingTable, EmbeddingTableOptions, UnkInit};
#[doc(inline)]
pub use errors::{WVResult, WordvecError};
#[doc(inline)]
pub use search::{Neighbor, NeighborSearch, nearest};
#[doc(inline)]
pub use vocab::{VocabOptions, Vocabulary};
