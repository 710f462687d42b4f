//! Sparse feature rows
//!
//! A row is a `1 x dim` CSR matrix, the same shape TF-IDF exports produce
//! for a single document. Explicit zeros are never stored.

use sprs::CsMat;
use std::collections::BTreeMap;

use crate::error::{Result, SpamError};

/// A single sparse row with sorted, unique column indices
#[derive(Debug, Clone, PartialEq)]
pub struct SparseRow(CsMat<f64>);

impl SparseRow {
    /// An all-zero row of the given width
    pub fn zeros(dim: usize) -> Self {
        Self(CsMat::zero((1, dim)))
    }

    /// Build a row from `(column, value)` pairs in any order.
    ///
    /// Duplicate columns are summed, zeros are dropped.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut summed: BTreeMap<usize, f64> = BTreeMap::new();
        for (col, value) in pairs {
            if col >= dim {
                return Err(SpamError::DimensionMismatch {
                    context: "sparse row column",
                    expected: dim,
                    actual: col + 1,
                });
            }
            *summed.entry(col).or_insert(0.0) += value;
        }

        Ok(Self::from_sorted(dim, summed.into_iter()))
    }

    /// Build a row from a dense slice
    pub fn from_dense(dense: &[f64]) -> Self {
        Self::from_sorted(dense.len(), dense.iter().copied().enumerate())
    }

    /// Columns must be strictly increasing and below `dim`
    fn from_sorted(dim: usize, entries: impl Iterator<Item = (usize, f64)>) -> Self {
        let (indices, data): (Vec<usize>, Vec<f64>) = entries.filter(|&(_, v)| v != 0.0).unzip();
        let indptr = vec![0, indices.len()];
        Self(CsMat::new((1, dim), indptr, indices, data))
    }

    /// Row width
    pub fn dim(&self) -> usize {
        self.0.cols()
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.0.nnz()
    }

    pub fn indices(&self) -> &[usize] {
        self.0.indices()
    }

    pub fn values(&self) -> &[f64] {
        self.0.data()
    }

    /// Iterate over `(column, value)` of the stored entries
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices().iter().copied().zip(self.values().iter().copied())
    }

    /// Value at `col`, zero when not stored
    pub fn get(&self, col: usize) -> f64 {
        self.0.get(0, col).copied().unwrap_or(0.0)
    }

    /// Apply `f` to every stored value
    pub fn map_values(&mut self, f: impl Fn(f64) -> f64) {
        self.0.map_inplace(|&v| f(v));
        if self.values().contains(&0.0) {
            let dim = self.dim();
            let entries: Vec<(usize, f64)> = self.iter().collect();
            *self = Self::from_sorted(dim, entries.into_iter());
        }
    }

    /// Dot product with a dense weight vector of the same width
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim() {
            return Err(SpamError::DimensionMismatch {
                context: "dot product",
                expected: self.dim(),
                actual: weights.len(),
            });
        }
        Ok(self.0.outer_view(0).map_or(0.0, |row| row.dot_dense(weights)))
    }

    /// Horizontally concatenate `other` after `self`.
    ///
    /// Columns of `other` are shifted by `self.dim()`.
    pub fn hstack(self, other: &SparseRow) -> Self {
        Self(sprs::hstack(&[self.0.view(), other.0.view()]))
    }

    /// Materialize the row as a dense vector
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim()];
        for (col, v) in self.iter() {
            dense[col] = v;
        }
        dense
    }

    pub fn as_csr(&self) -> &CsMat<f64> {
        &self.0
    }
}
