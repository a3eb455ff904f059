//! Weighted-degree (WD) string feature map
//!
//! Expands a fixed-length symbol sequence into positional k-mer features
//! without ever materializing the feature vector. Every sequence position j
//! owns a disjoint block of `single_char_dim` coordinates; within a block,
//! the k-mer starting at j is encoded incrementally as a mixed-radix integer
//! `val = val*A + s[j+k]`, and each order k contributes with a fixed
//! decaying weight. Expanded, the inner product of two such maps reproduces
//! the weighted-degree string kernel.

use crate::core::{Result, WdSvmError};

/// Immutable configuration of the weighted-degree feature space
///
/// Derived dimensions are computed once with checked arithmetic; a
/// combination of alphabet size and degree whose k-mer count is not
/// representable is rejected instead of silently wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct WdConfig {
    degree: usize,
    alphabet_size: usize,
    string_length: usize,
    single_char_dim: usize,
    feature_dim: usize,
    weights: Vec<f64>,
}

impl WdConfig {
    /// Create a feature-map configuration for sequences of `string_length`
    /// symbols over an alphabet of `alphabet_size` codes, with k-mers up to
    /// order `degree`.
    pub fn new(degree: usize, alphabet_size: usize, string_length: usize) -> Result<Self> {
        if degree == 0 {
            return Err(WdSvmError::InvalidParameter(
                "degree must be at least 1".to_string(),
            ));
        }
        if alphabet_size < 2 {
            return Err(WdSvmError::InvalidParameter(format!(
                "alphabet size must be at least 2, got {alphabet_size}"
            )));
        }
        if string_length == 0 {
            return Err(WdSvmError::InvalidParameter(
                "string length must be at least 1".to_string(),
            ));
        }

        // Number of distinct k-mer codes of order 1..=degree at one position
        let overflow = || WdSvmError::DimensionOverflow {
            alphabet_size,
            degree,
        };
        let mut power = 1usize;
        let mut single_char_dim = 0usize;
        for _ in 0..degree {
            power = power.checked_mul(alphabet_size).ok_or_else(overflow)?;
            single_char_dim = single_char_dim.checked_add(power).ok_or_else(overflow)?;
        }
        let feature_dim = string_length
            .checked_mul(single_char_dim)
            .ok_or_else(overflow)?;

        // Decaying per-order schedule, normalized to sum to 1
        let denom = (degree * (degree + 1)) as f64;
        let weights = (0..degree)
            .map(|k| 2.0 * (degree - k) as f64 / denom)
            .collect();

        Ok(Self {
            degree,
            alphabet_size,
            string_length,
            single_char_dim,
            feature_dim,
            weights,
        })
    }

    /// Maximum k-mer order
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of distinct symbol codes
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Expected sequence length
    pub fn string_length(&self) -> usize {
        self.string_length
    }

    /// Width of one position's coordinate block
    pub fn single_char_dim(&self) -> usize {
        self.single_char_dim
    }

    /// Total dimensionality of the feature space
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Per-order weight schedule (length `degree`)
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Validate a sequence against the configured length and alphabet
    pub fn check_sequence(&self, sequence: &[u8]) -> Result<()> {
        if sequence.len() != self.string_length {
            return Err(WdSvmError::SequenceLengthMismatch {
                expected: self.string_length,
                actual: sequence.len(),
            });
        }
        for (position, &code) in sequence.iter().enumerate() {
            if code as usize >= self.alphabet_size {
                return Err(WdSvmError::InvalidSymbol {
                    position,
                    code,
                    alphabet_size: self.alphabet_size,
                });
            }
        }
        Ok(())
    }

    /// Inner product of the implicit feature expansion of `sequence` with a
    /// dense weight vector over the feature space.
    ///
    /// Uses the exact window recurrence [`accumulate`](Self::accumulate)
    /// uses, so scores and cuts live in the same coordinates.
    pub fn score(&self, sequence: &[u8], w: &[f64]) -> Result<f64> {
        self.check_sequence(sequence)?;
        debug_assert_eq!(w.len(), self.feature_dim);

        let mut sum = 0.0;
        let mut offs = 0;
        for j in 0..self.string_length {
            let mut val = 0usize;
            for k in 0..self.degree {
                if j + k >= self.string_length {
                    break;
                }
                val = val * self.alphabet_size + sequence[j + k] as usize;
                sum += self.weights[k] * w[offs + val];
            }
            offs += self.single_char_dim;
        }
        Ok(sum)
    }

    /// Add `scale` times the implicit feature expansion of `sequence` into a
    /// dense accumulator. Nothing is written if validation fails.
    pub fn accumulate(&self, sequence: &[u8], scale: f64, acc: &mut [f64]) -> Result<()> {
        if acc.len() != self.feature_dim {
            return Err(WdSvmError::DimensionMismatch {
                expected: self.feature_dim,
                actual: acc.len(),
            });
        }
        self.check_sequence(sequence)?;

        let mut offs = 0;
        for j in 0..self.string_length {
            let mut val = 0usize;
            for k in 0..self.degree {
                if j + k >= self.string_length {
                    break;
                }
                val = val * self.alphabet_size + sequence[j + k] as usize;
                acc[offs + val] += self.weights[k] * scale;
            }
            offs += self.single_char_dim;
        }
        Ok(())
    }
}
