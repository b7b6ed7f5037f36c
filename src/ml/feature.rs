//! Sparse feature vectors passed from the vectorizer to the classifier.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonalError};

/// A sparse numeric vector with a fixed dimension.
///
/// Entries are kept sorted by index with no duplicates; indices are always
/// below `dimension`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector from `(index, value)` entries.
    ///
    /// Entries may come in any order; duplicate indices are summed and zero
    /// values dropped.
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        if let Some(&(index, _)) = entries.iter().find(|(index, _)| *index >= dimension) {
            return Err(TonalError::model(format!(
                "Feature index {index} out of range for dimension {dimension}"
            )));
        }

        entries.sort_by_key(|&(index, _)| index);

        let mut indices: Vec<usize> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match indices.last() {
                Some(&last) if last == index => {
                    if let Some(previous) = values.last_mut() {
                        *previous += value;
                    }
                }
                _ => {
                    indices.push(index);
                    values.push(value);
                }
            }
        }

        let mut vector = FeatureVector {
            dimension,
            indices,
            values,
        };
        vector.prune_zeros();
        Ok(vector)
    }

    /// An all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a sparse vector from a dense slice.
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0.0)
            .map(|(index, value)| (index, *value))
            .unzip();

        FeatureVector {
            dimension: dense.len(),
            indices,
            values,
        }
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the non-zero `(index, value)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index` (zero when not stored).
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight row of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dimension {
            return Err(TonalError::model(format!(
                "X has {} features, but the model is expecting {} features as input",
                self.dimension,
                weights.len()
            )));
        }

        Ok(self.iter().map(|(index, value)| value * weights[index]).sum())
    }

    /// Sum of absolute values.
    pub fn l1_norm(&self) -> f64 {
        self.values.iter().map(|v| v.abs()).sum()
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Apply `f` to every stored value.
    pub fn map_values<F: Fn(usize, f64) -> f64>(mut self, f: F) -> Self {
        for (index, value) in self.indices.iter().zip(self.values.iter_mut()) {
            *value = f(*index, *value);
        }
        self.prune_zeros();
        self
    }

    /// Divide every value by `divisor`; a zero divisor leaves the vector as is.
    pub fn scale_down(self, divisor: f64) -> Self {
        if divisor == 0.0 {
            return self;
        }
        self.map_values(|_, value| value / divisor)
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|v| *v != 0.0) {
            return;
        }
        let (indices, values) = self
            .indices
            .iter()
            .zip(self.values.iter())
            .filter(|(_, value)| **value != 0.0)
            .map(|(index, value)| (*index, *value))
            .unzip();
        self.indices = indices;
        self.values = values;
    }
}
