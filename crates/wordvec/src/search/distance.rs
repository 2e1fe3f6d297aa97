//! # Distance Metrics

use crate::errors::{WVResult, check_dim};

/// A dissimilarity between two vectors; smaller is closer.
pub trait Distance: Send + Sync {
    /// The distance from `a` to `b`; assumes equal lengths.
    fn distance_unchecked(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> f32;

    /// The distance from `a` to `b`.
    ///
    /// ## Errors
    /// * [`crate::WordvecError::DimensionMismatch`] on unequal lengths.
    fn distance(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> WVResult<f32> {
        check_dim(a.len(), b.len())?;
        Ok(self.distance_unchecked(a, b))
    }
}

/// L2 distance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean;

/// Squared L2 distance; ranks like [`Euclidean`] without the root.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SquaredEuclidean;

/// `1 - cos(a, b)`; zero-magnitude vectors have similarity 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cosine;

#[inline]
fn squared_l2(
    a: &[f32],
    b: &[f32],
) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// The dot product of `a` and `b`.
#[inline]
pub fn dot(
    a: &[f32],
    b: &[f32],
) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// The L2 norm of `v`.
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

impl Distance for Euclidean {
    fn distance_unchecked(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> f32 {
        squared_l2(a, b).sqrt()
    }
}

impl Distance for SquaredEuclidean {
    fn distance_unchecked(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> f32 {
        squared_l2(a, b)
    }
}

impl Distance for Cosine {
    fn distance_unchecked(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> f32 {
        let denom = magnitude(a) * magnitude(b);
        let sim = if denom > 0.0 { dot(a, b) / denom } else { 0.0 };
        1.0 - sim
    }
}
