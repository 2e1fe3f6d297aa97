//! # Error Types

/// Errors from wordvec operations.
#[derive(Debug, thiserror::Error)]
pub enum WordvecError {
    /// No usable source or cache, or the source was unreadable or empty.
    #[error("load error: {0}")]
    Load(String),

    /// A source line disagrees with the dimension fixed by earlier lines.
    #[error(
        "vector for token {token:?} has {found} dimensions, but previously read vectors have {expected} dimensions"
    )]
    DimensionInconsistency {
        /// The token on the offending line.
        token: String,
        /// The number of entries on the offending line.
        found: usize,
        /// The established dimension.
        expected: usize,
    },

    /// Bad caller input: unknown alias, missing vectors, empty source list.
    #[error("validation error: {0}")]
    Validation(String),

    /// Vector arithmetic between vectors of different lengths.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// A query over zero tokens or zero total occurrences.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A vector component that is not a float.
    #[error("parse error: {0}")]
    Parse(String),

    /// Cache artifact (de)serialization failure.
    #[error("cache error: {0}")]
    Cache(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

impl From<bincode::Error> for WordvecError {
    fn from(err: bincode::Error) -> Self {
        WordvecError::Cache(err.to_string())
    }
}

/// Result type for wordvec operations.
pub type WVResult<T> = core::result::Result<T, WordvecError>;

/// Check that a vector has the `expected` length.
pub fn check_dim(
    expected: usize,
    actual: usize,
) -> WVResult<()> {
    if expected != actual {
        return Err(WordvecError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dim() {
        assert!(check_dim(3, 3).is_ok());
        assert!(matches!(
            check_dim(3, 2),
            Err(WordvecError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_inconsistency_message() {
        let err = WordvecError::DimensionInconsistency {
            token: "dog".to_string(),
            found: 3,
            expected: 2,
        };
        assert_eq!(
            err.to_string(),
            "vector for token \"dog\" has 3 dimensions, but previously read vectors have 2 dimensions"
        );
    }
}
