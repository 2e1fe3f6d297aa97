//! # Dense Vector Matrix

use crate::errors::{WVResult, check_dim};

/// A dense row-major `f32` matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorMatrix {
    data: Vec<f32>,
    rows: usize,
    dim: usize,
}

impl VectorMatrix {
    /// An all-zero matrix.
    pub fn zeros(
        rows: usize,
        dim: usize,
    ) -> Self {
        Self {
            data: vec![0.0; rows * dim],
            rows,
            dim,
        }
    }

    /// Wrap row-major `data`.
    ///
    /// ## Errors
    /// * [`crate::WordvecError::DimensionMismatch`] if `data.len() != rows * dim`.
    pub fn from_data(
        data: Vec<f32>,
        rows: usize,
        dim: usize,
    ) -> WVResult<Self> {
        check_dim(rows * dim, data.len())?;
        Ok(Self { data, rows, dim })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The row-major data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Row `idx`, if in range.
    pub fn row(
        &self,
        idx: usize,
    ) -> Option<&[f32]> {
        if idx >= self.rows {
            return None;
        }
        Some(&self.data[idx * self.dim..(idx + 1) * self.dim])
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // `chunks_exact(0)` panics; a zero-width matrix still has `rows` rows.
        (0..self.rows).map(move |i| &self.data[i * self.dim..(i + 1) * self.dim])
    }

    /// Mutable row `idx`.
    ///
    /// Panics if `idx` is out of range.
    pub(crate) fn row_mut(
        &mut self,
        idx: usize,
    ) -> &mut [f32] {
        &mut self.data[idx * self.dim..(idx + 1) * self.dim]
    }
}
