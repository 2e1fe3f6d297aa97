//! # Embedding Tables
//!
//! An [`EmbeddingTable`] is parsed once from a GloVe-style text source:
//! ```terminaloutput
//! {TOKEN} {V1} {V2} ... {VD}
//! ```
//! and then persisted as a binary cache artifact (see [`cache`]) which
//! later loads read instead of the text.
//!
//! ```rust,no_run
//! use wordvec::embeddings::EmbeddingTable;
//!
//! fn example() -> wordvec::WVResult<()> {
//!     let table = EmbeddingTable::load("glove.840B.300d.txt", ".vector_cache")?;
//!     println!("Loaded {} words", table.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod table;
pub mod text_io;

#[doc(inline)]
pub use table::{EmbeddingTable, EmbeddingTableOptions, UnkInit};
