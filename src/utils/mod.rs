//! Utility functions for weighted-degree SVM operations

use crate::core::SequenceDataset;

/// Deterministic co-sorting of parallel value/index arrays
pub mod sort {
    /// Sort `values` ascending and permute `indices` along with it.
    ///
    /// The sort is stable: equal values keep the relative order their indices
    /// had on entry, so selections derived from the ordering are reproducible
    /// across runs with identical input.
    pub fn sort_with_indices(values: &mut [f64], indices: &mut [u32]) {
        assert_eq!(
            values.len(),
            indices.len(),
            "Values and indices must have same length"
        );

        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        let sorted_values: Vec<f64> = order.iter().map(|&p| values[p]).collect();
        let sorted_indices: Vec<u32> = order.iter().map(|&p| indices[p]).collect();
        values.copy_from_slice(&sorted_values);
        indices.copy_from_slice(&sorted_indices);
    }
}

/// Dense vector primitives used by the cut buffer and weight store
pub mod vector {
    /// Dot product of two equal-length dense vectors
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
    }

    /// y += a * x, elementwise
    pub fn axpy(y: &mut [f64], a: f64, x: &[f64]) {
        debug_assert_eq!(y.len(), x.len());
        for (yi, &xi) in y.iter_mut().zip(x.iter()) {
            *yi += a * xi;
        }
    }
}

/// Validation and preprocessing utilities
pub mod validation {
    use super::*;

    /// Validate that all labels in a dataset are binary (-1 or +1)
    pub fn validate_binary_labels<D: SequenceDataset>(dataset: &D) -> Result<(), String> {
        let labels = dataset.get_labels();
        for (i, &label) in labels.iter().enumerate() {
            if label != 1.0 && label != -1.0 {
                return Err(format!(
                    "Invalid label {label} at index {i}: labels must be +1 or -1"
                ));
            }
        }
        Ok(())
    }

    /// Check if dataset labels are balanced (roughly equal +1 and -1 samples)
    pub fn check_label_balance<D: SequenceDataset>(dataset: &D) -> (usize, usize, f64) {
        let labels = dataset.get_labels();
        let positive_count = labels.iter().filter(|&&l| l > 0.0).count();
        let negative_count = labels.len() - positive_count;
        let balance_ratio = if negative_count == 0 {
            f64::INFINITY
        } else {
            positive_count as f64 / negative_count as f64
        };
        (positive_count, negative_count, balance_ratio)
    }
}
