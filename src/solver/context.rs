//! Optimizer context for weighted-degree cutting-plane training
//!
//! [`WdOcasProblem`] owns the mutable optimization state (weight iterates and
//! cut buffer) over a borrowed training set, and exposes it to the solver
//! through the [`CuttingPlaneProblem`] callback contract. Scoring and cut
//! generation both go through [`WdConfig`], so the two sides of the bound
//! computation share one feature encoding.

use log::debug;

use crate::core::{
    CuttingPlaneProblem, Result, SequenceDataset, WdSvmError, WeightUpdate,
};
use crate::features::WdConfig;
use crate::solver::cuts::CutBuffer;
use crate::solver::weights::WeightStore;
use crate::utils::vector;

/// Mutable training state bound to one dataset and one feature configuration
pub struct WdOcasProblem<'a, D: SequenceDataset> {
    dataset: &'a D,
    labels: Vec<f64>,
    wd: WdConfig,
    weights: WeightStore,
    cuts: CutBuffer,
}

impl<'a, D: SequenceDataset> WdOcasProblem<'a, D> {
    /// Allocate iteration state for `dataset` under the feature map `wd`.
    ///
    /// All configuration errors fire here, before any per-iteration state
    /// exists: empty dataset, label/example miscounts, non-binary labels,
    /// and a feature map that disagrees with the dataset's geometry.
    pub fn new(dataset: &'a D, wd: WdConfig, bufsize: usize) -> Result<Self> {
        if dataset.is_empty() {
            return Err(WdSvmError::EmptyDataset);
        }
        if wd.string_length() != dataset.seq_len() {
            return Err(WdSvmError::SequenceLengthMismatch {
                expected: wd.string_length(),
                actual: dataset.seq_len(),
            });
        }
        if wd.alphabet_size() != dataset.alphabet_size() {
            return Err(WdSvmError::InvalidParameter(format!(
                "feature map alphabet size {} does not match dataset alphabet size {}",
                wd.alphabet_size(),
                dataset.alphabet_size()
            )));
        }

        let labels = dataset.get_labels();
        if labels.len() != dataset.len() {
            return Err(WdSvmError::DimensionMismatch {
                expected: dataset.len(),
                actual: labels.len(),
            });
        }
        for &label in &labels {
            if label != 1.0 && label != -1.0 {
                return Err(WdSvmError::InvalidLabel(label));
            }
        }

        let weights = WeightStore::new(wd.feature_dim());
        let cuts = CutBuffer::new(bufsize, wd.feature_dim())?;

        Ok(Self {
            dataset,
            labels,
            wd,
            weights,
            cuts,
        })
    }

    /// The feature-map configuration this problem was built with
    pub fn wd(&self) -> &WdConfig {
        &self.wd
    }

    /// The current weight iterate
    pub fn current_weights(&self) -> &[f64] {
        self.weights.current()
    }

    /// Consume the problem, keeping the feature configuration and the final
    /// weight vector
    pub fn into_solution(self) -> (WdConfig, Vec<f64>) {
        (self.wd, self.weights.into_current())
    }
}

impl<D: SequenceDataset> CuttingPlaneProblem for WdOcasProblem<'_, D> {
    fn num_examples(&self) -> usize {
        self.dataset.len()
    }

    fn compute_output(&self, output: &mut [f64]) -> Result<()> {
        if output.len() != self.dataset.len() {
            return Err(WdSvmError::DimensionMismatch {
                expected: self.dataset.len(),
                actual: output.len(),
            });
        }

        let w = self.weights.current();
        for i in 0..self.dataset.len() {
            output[i] = self.labels[i] * self.wd.score(self.dataset.sequence(i), w)?;
        }
        Ok(())
    }

    fn add_cut(&mut self, violators: &[usize]) -> Result<Vec<f64>> {
        // Fail before the expensive accumulation when no slot is left; the
        // buffer must be observably unchanged on any error path
        if self.cuts.len() >= self.cuts.capacity() {
            return Err(WdSvmError::CutBufferExhausted {
                capacity: self.cuts.capacity(),
            });
        }
        for &i in violators {
            if i >= self.dataset.len() {
                return Err(WdSvmError::InvalidParameter(format!(
                    "violated example index {i} out of range for {} examples",
                    self.dataset.len()
                )));
            }
        }

        let mut new_a = vec![0.0; self.wd.feature_dim()];
        for &i in violators {
            self.wd
                .accumulate(self.dataset.sequence(i), self.labels[i], &mut new_a)?;
        }

        // New column of the cut Gram matrix: off-diagonal entries against
        // every stored cut, then the diagonal self product
        let mut column = self.cuts.dot_all(&new_a);
        column.push(vector::dot(&new_a, &new_a));

        debug!(
            "cut {} aggregates {} violated examples, diag {:.6}",
            self.cuts.len(),
            violators.len(),
            column[self.cuts.len()]
        );

        self.cuts.push(new_a)?;
        Ok(column)
    }

    fn num_cuts(&self) -> usize {
        self.cuts.len()
    }

    fn aggregate_cuts(&mut self, alpha: &[f64]) -> Result<WeightUpdate> {
        self.weights.aggregate(alpha, &self.cuts)
    }

    fn line_search_step(&mut self, t: f64) -> f64 {
        self.weights.combine(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Alphabet, StringDataset};
    use approx::assert_relative_eq;

    fn toy_dataset() -> StringDataset {
        StringDataset::from_strings(&[("AC", 1.0), ("AG", -1.0)], &Alphabet::dna())
            .expect("Dataset should build")
    }

    #[test]
    fn test_signed_scores_under_all_ones_weights() {
        // degree=1 over ACGT: with all-ones weights every position matches,
        // so the raw score is the sequence length and the sign is the label
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let problem = WdOcasProblem::new(&dataset, wd, 4).expect("Problem should build");

        let w = vec![1.0; problem.wd().feature_dim()];
        let s0 = problem.wd().score(dataset.sequence(0), &w).unwrap();
        let s1 = problem.wd().score(dataset.sequence(1), &w).unwrap();
        assert_eq!(s0, 2.0);
        assert_eq!(s1, 2.0);

        let labels = dataset.get_labels();
        assert_eq!(labels[0] * s0, 2.0);
        assert_eq!(labels[1] * s1, -2.0);
    }

    #[test]
    fn test_compute_output_zero_weights() {
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let problem = WdOcasProblem::new(&dataset, wd, 4).expect("Problem should build");

        let mut output = vec![f64::NAN; 2];
        problem.compute_output(&mut output).expect("Scoring should succeed");
        assert_eq!(output, vec![0.0, 0.0]);
    }

    #[test]
    fn test_cut_gram_column() {
        let dataset = StringDataset::from_strings(
            &[("ACGT", 1.0), ("ACGA", 1.0), ("TTTT", -1.0)],
            &Alphabet::dna(),
        )
        .expect("Dataset should build");
        let wd = WdConfig::new(2, 4, 4).expect("Config should build");
        let mut problem = WdOcasProblem::new(&dataset, wd, 8).expect("Problem should build");

        let col0 = problem.add_cut(&[0, 1]).expect("Cut should append");
        assert_eq!(col0.len(), 1);
        assert_eq!(problem.num_cuts(), 1);

        let col1 = problem.add_cut(&[2]).expect("Cut should append");
        assert_eq!(col1.len(), 2);

        // Diagonal entries are self inner products
        let diag1 = vector::dot(
            problem.cuts.get(1),
            problem.cuts.get(1),
        );
        assert_relative_eq!(col1[1], diag1, max_relative = 1e-12);

        // Symmetry: the off-diagonal entry of the second column equals the
        // dot product computed the other way around
        let cross = vector::dot(problem.cuts.get(0), problem.cuts.get(1));
        assert_relative_eq!(col1[0], cross, max_relative = 1e-12);
    }

    #[test]
    fn test_cut_buffer_exhaustion_surfaces() {
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let mut problem = WdOcasProblem::new(&dataset, wd, 2).expect("Problem should build");

        problem.add_cut(&[0]).expect("Cut should append");
        problem.add_cut(&[1]).expect("Cut should append");

        let result = problem.add_cut(&[0, 1]);
        assert!(matches!(
            result,
            Err(WdSvmError::CutBufferExhausted { capacity: 2 })
        ));
        assert_eq!(problem.num_cuts(), 2);
    }

    #[test]
    fn test_out_of_range_violator_rejected() {
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let mut problem = WdOcasProblem::new(&dataset, wd, 4).expect("Problem should build");

        let result = problem.add_cut(&[5]);
        assert!(matches!(result, Err(WdSvmError::InvalidParameter(_))));
        assert_eq!(problem.num_cuts(), 0);
    }

    #[test]
    fn test_mismatched_feature_map_rejected() {
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 3).expect("Config should build");

        let result = WdOcasProblem::new(&dataset, wd, 4);
        assert!(matches!(
            result,
            Err(WdSvmError::SequenceLengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_lying_dataset_cannot_corrupt_state() {
        // A dataset whose advertised length disagrees with an actual
        // sequence must fail scoring and cut generation without mutating
        // the buffer
        struct LyingDataset;

        impl SequenceDataset for LyingDataset {
            fn len(&self) -> usize {
                2
            }
            fn seq_len(&self) -> usize {
                4
            }
            fn alphabet_size(&self) -> usize {
                4
            }
            fn sequence(&self, i: usize) -> &[u8] {
                if i == 0 {
                    &[0, 1, 2, 3]
                } else {
                    &[0, 1] // shorter than advertised
                }
            }
            fn get_labels(&self) -> Vec<f64> {
                vec![1.0, -1.0]
            }
        }

        let dataset = LyingDataset;
        let wd = WdConfig::new(2, 4, 4).expect("Config should build");
        let mut problem = WdOcasProblem::new(&dataset, wd, 4).expect("Problem should build");

        let mut output = vec![0.0; 2];
        assert!(matches!(
            problem.compute_output(&mut output),
            Err(WdSvmError::SequenceLengthMismatch { .. })
        ));

        let result = problem.add_cut(&[0, 1]);
        assert!(matches!(
            result,
            Err(WdSvmError::SequenceLengthMismatch { .. })
        ));
        assert_eq!(problem.num_cuts(), 0);
    }

    #[test]
    fn test_aggregate_and_line_search_through_contract() {
        let dataset = toy_dataset();
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let mut problem = WdOcasProblem::new(&dataset, wd, 4).expect("Problem should build");

        let col = problem.add_cut(&[0, 1]).expect("Cut should append");
        let update = problem
            .aggregate_cuts(&[1.0])
            .expect("Aggregate should succeed");

        // With a single cut and alpha=1, ||w||^2 equals the cut's diagonal
        assert_relative_eq!(update.sq_norm, col[0], max_relative = 1e-12);

        // Walking back to the origin iterate zeroes the norm
        let sq_norm = problem.line_search_step(0.0);
        assert_eq!(sq_norm, 0.0);
    }
}
