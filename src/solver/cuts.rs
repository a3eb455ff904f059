//! Bounded buffer of cutting planes
//!
//! Each cut is a dense vector in the weighted-degree feature space,
//! aggregated from one iteration's violated examples. The buffer owns every
//! cut once appended; cuts are immutable afterwards and slots fill in order
//! from index 0. The capacity bound is enforced here as a hard error rather
//! than an eviction policy.

use crate::core::{Result, WdSvmError};
use crate::utils::vector;

/// Append-only store of at most `capacity` equal-length dense cuts
#[derive(Debug)]
pub struct CutBuffer {
    cuts: Vec<Vec<f64>>,
    capacity: usize,
    dim: usize,
}

impl CutBuffer {
    /// Create an empty buffer for `capacity` cuts of dimension `dim`
    pub fn new(capacity: usize, dim: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(WdSvmError::InvalidParameter(
                "cut buffer capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            cuts: Vec::with_capacity(capacity),
            capacity,
            dim,
        })
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Whether no cut has been appended yet
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Maximum number of cuts the buffer will hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dimension every cut must have
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the cut in slot `i`
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn get(&self, i: usize) -> &[f64] {
        &self.cuts[i]
    }

    /// Iterate over the stored cuts in slot order
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.cuts.iter().map(|c| c.as_slice())
    }

    /// Append a cut, taking ownership. Fails without modifying the buffer if
    /// all slots are in use or the dimension does not match.
    pub fn push(&mut self, cut: Vec<f64>) -> Result<()> {
        if self.cuts.len() >= self.capacity {
            return Err(WdSvmError::CutBufferExhausted {
                capacity: self.capacity,
            });
        }
        if cut.len() != self.dim {
            return Err(WdSvmError::DimensionMismatch {
                expected: self.dim,
                actual: cut.len(),
            });
        }
        self.cuts.push(cut);
        Ok(())
    }

    /// Inner products of `v` against every stored cut, in slot order
    pub fn dot_all(&self, v: &[f64]) -> Vec<f64> {
        self.cuts.iter().map(|c| vector::dot(c, v)).collect()
    }
}
