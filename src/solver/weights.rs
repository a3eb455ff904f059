//! Weight vector store for the cutting-plane iteration
//!
//! Owns the current and previous weight iterates. `aggregate` is the only
//! place cuts are combined back into a weight vector; `combine` realizes the
//! line-search step between successive iterates.

use crate::core::{Result, WdSvmError, WeightUpdate};
use crate::solver::cuts::CutBuffer;
use crate::utils::vector;

/// Current and previous dense weight iterates of equal dimension
#[derive(Debug)]
pub struct WeightStore {
    current: Vec<f64>,
    previous: Vec<f64>,
}

impl WeightStore {
    /// Create a store with both iterates at the origin
    pub fn new(dim: usize) -> Self {
        Self {
            current: vec![0.0; dim],
            previous: vec![0.0; dim],
        }
    }

    /// Dimension of the iterates
    pub fn dim(&self) -> usize {
        self.current.len()
    }

    /// The current weight vector
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// The iterate from before the last aggregation
    pub fn previous(&self) -> &[f64] {
        &self.previous
    }

    /// Consume the store, keeping the current iterate
    pub fn into_current(self) -> Vec<f64> {
        self.current
    }

    /// Rebuild the current iterate as `sum_i alpha_i * cut_i`.
    ///
    /// The old current iterate becomes `previous`. Cuts with a zero or
    /// negative dual weight contribute nothing. Returns the squared norm of
    /// the new iterate and its dot product with the previous one, both
    /// needed by the solver's line search.
    pub fn aggregate(&mut self, alpha: &[f64], cuts: &CutBuffer) -> Result<WeightUpdate> {
        if alpha.len() != cuts.len() {
            return Err(WdSvmError::DimensionMismatch {
                expected: cuts.len(),
                actual: alpha.len(),
            });
        }
        if cuts.dim() != self.current.len() {
            return Err(WdSvmError::DimensionMismatch {
                expected: self.current.len(),
                actual: cuts.dim(),
            });
        }

        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.fill(0.0);

        for (i, &a) in alpha.iter().enumerate() {
            if a > 0.0 {
                vector::axpy(&mut self.current, a, cuts.get(i));
            }
        }

        Ok(WeightUpdate {
            sq_norm: vector::dot(&self.current, &self.current),
            dot_with_previous: vector::dot(&self.current, &self.previous),
        })
    }

    /// Move the current iterate to `previous*(1-t) + current*t` elementwise
    /// and return its squared norm. `t=0` reproduces `previous`; `t=1`
    /// leaves `current` unchanged.
    pub fn combine(&mut self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t));

        let mut sq_norm = 0.0;
        for (w, &old) in self.current.iter_mut().zip(self.previous.iter()) {
            *w = old * (1.0 - t) + t * *w;
            sq_norm += *w * *w;
        }
        sq_norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn buffer_with(cuts: &[&[f64]]) -> CutBuffer {
        let mut buffer =
            CutBuffer::new(cuts.len().max(1), cuts[0].len()).expect("Buffer should build");
        for cut in cuts {
            buffer.push(cut.to_vec()).expect("Push should succeed");
        }
        buffer
    }

    #[test]
    fn test_aggregate_weighted_sum() {
        let cuts = buffer_with(&[&[1.0, 0.0, 2.0], &[0.0, 3.0, 1.0]]);
        let mut store = WeightStore::new(3);

        let update = store
            .aggregate(&[2.0, 1.0], &cuts)
            .expect("Aggregate should succeed");

        assert_eq!(store.current(), &[2.0, 3.0, 5.0]);
        assert_relative_eq!(update.sq_norm, 4.0 + 9.0 + 25.0, max_relative = 1e-12);
        // Previous iterate was the origin
        assert_eq!(update.dot_with_previous, 0.0);
    }

    #[test]
    fn test_aggregate_skips_zero_and_negative_weights() {
        let cuts = buffer_with(&[&[1.0, 1.0], &[5.0, 5.0], &[-2.0, 4.0]]);
        let mut store = WeightStore::new(2);

        store
            .aggregate(&[1.0, 0.0, -3.0], &cuts)
            .expect("Aggregate should succeed");

        assert_eq!(store.current(), &[1.0, 1.0]);
    }

    #[test]
    fn test_aggregate_all_zero_yields_zero_vector() {
        let cuts = buffer_with(&[&[1.0, 2.0]]);
        let mut store = WeightStore::new(2);

        let update = store
            .aggregate(&[0.0], &cuts)
            .expect("Aggregate should succeed");

        assert_eq!(store.current(), &[0.0, 0.0]);
        assert_eq!(update.sq_norm, 0.0);
    }

    #[test]
    fn test_aggregate_sq_norm_is_self_dot() {
        let cuts = buffer_with(&[&[1.0, -2.0, 0.5], &[0.0, 1.0, 4.0]]);
        let mut store = WeightStore::new(3);

        let update = store
            .aggregate(&[0.7, 1.3], &cuts)
            .expect("Aggregate should succeed");

        let self_dot = vector::dot(store.current(), store.current());
        assert_relative_eq!(update.sq_norm, self_dot, max_relative = 1e-12);
    }

    #[test]
    fn test_aggregate_keeps_old_iterate_as_previous() {
        let cuts = buffer_with(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let mut store = WeightStore::new(2);

        store.aggregate(&[2.0, 0.0], &cuts).expect("Aggregate should succeed");
        assert_eq!(store.current(), &[2.0, 0.0]);

        let update = store.aggregate(&[0.0, 3.0], &cuts).expect("Aggregate should succeed");
        assert_eq!(store.current(), &[0.0, 3.0]);
        assert_eq!(store.previous(), &[2.0, 0.0]);
        assert_eq!(update.dot_with_previous, 0.0);
    }

    #[test]
    fn test_aggregate_alpha_length_checked() {
        let cuts = buffer_with(&[&[1.0, 0.0]]);
        let mut store = WeightStore::new(2);

        let result = store.aggregate(&[1.0, 2.0], &cuts);
        assert!(matches!(
            result,
            Err(WdSvmError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_combine_endpoints() {
        let cuts = buffer_with(&[&[1.0, 2.0], &[3.0, -1.0]]);

        // t=0 must reproduce the previous iterate exactly
        let mut store = WeightStore::new(2);
        store.aggregate(&[1.0, 0.0], &cuts).expect("Aggregate should succeed");
        store.aggregate(&[0.0, 1.0], &cuts).expect("Aggregate should succeed");
        let sq_norm = store.combine(0.0);
        assert_eq!(store.current(), &[1.0, 2.0]);
        assert_eq!(sq_norm, 5.0);

        // t=1 must leave the current iterate unchanged
        let mut store = WeightStore::new(2);
        store.aggregate(&[1.0, 0.0], &cuts).expect("Aggregate should succeed");
        store.aggregate(&[0.0, 1.0], &cuts).expect("Aggregate should succeed");
        let sq_norm = store.combine(1.0);
        assert_eq!(store.current(), &[3.0, -1.0]);
        assert_eq!(sq_norm, 10.0);
    }

    #[test]
    fn test_combine_midpoint() {
        let cuts = buffer_with(&[&[2.0, 0.0], &[0.0, 4.0]]);
        let mut store = WeightStore::new(2);
        store.aggregate(&[1.0, 0.0], &cuts).expect("Aggregate should succeed");
        store.aggregate(&[0.0, 1.0], &cuts).expect("Aggregate should succeed");

        let sq_norm = store.combine(0.5);
        assert_eq!(store.current(), &[1.0, 2.0]);
        assert_relative_eq!(sq_norm, 5.0, max_relative = 1e-12);
    }
}
