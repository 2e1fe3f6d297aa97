//! # Vocabulary
//!
//! A [`Vocabulary`] ranks tokens by frequency behind a fixed prefix of
//! `<unk>` and the special tokens, and can carry one vector per index.
//!
//! ```rust
//! use wordvec::vocab::{VocabOptions, Vocabulary};
//!
//! let vocab = Vocabulary::build(
//!     [("a", 5), ("b", 5), ("c", 1)],
//!     &VocabOptions::default().with_min_freq(2),
//! );
//! assert_eq!(vocab.itos(), &["<unk>", "<pad>", "a", "b"]);
//! assert_eq!(vocab.lookup_index("c"), 0);
//! ```

pub mod vector_matrix;
pub mod vectors;
pub mod vocabulary;

#[doc(inline)]
pub use vector_matrix::VectorMatrix;
#[doc(inline)]
pub use vectors::VectorSource;
#[doc(inline)]
pub use vocabulary::{DEFAULT_SPECIALS, VocabOptions, Vocabulary};
