//! Training orchestration for the weighted-degree SVM
//!
//! This module derives the feature-space geometry from a dataset, runs the
//! cutting-plane solver over it, and packages the resulting weight vector
//! into a predictor that reuses the training-time feature encoding.

use log::{debug, info};

use crate::core::{
    OptimizationResult, Prediction, Result, SequenceDataset, SequenceModel, TrainConfig,
    WdSvmError,
};
use crate::features::WdConfig;
use crate::solver::{OcasSolver, WdOcasProblem};

/// High-level trainer binding a configuration to the cutting-plane solver
pub struct WdSvmOptimizer {
    config: TrainConfig,
}

impl WdSvmOptimizer {
    /// Create an optimizer with the given training configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Create an optimizer with default configuration
    pub fn with_defaults() -> Self {
        Self::new(TrainConfig::default())
    }

    /// Get the training configuration
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Train a model on the given dataset.
    ///
    /// The feature-space geometry is derived here from the dataset and the
    /// configured degree; every configuration error fires before any
    /// iteration state is allocated.
    pub fn train<D: SequenceDataset>(&self, dataset: &D) -> Result<TrainedWdSvm> {
        let wd = WdConfig::new(
            self.config.degree,
            dataset.alphabet_size(),
            dataset.seq_len(),
        )?;
        debug!("cutting plane has {} dims", wd.feature_dim());

        let mut problem = WdOcasProblem::new(dataset, wd, self.config.bufsize)?;
        let solver = OcasSolver::new(self.config.clone());
        let result = solver.solve(&mut problem)?;

        info!(
            "training finished after {} iterations with {} cuts, primal {:.6}",
            result.iterations, result.num_cuts, result.primal_objective
        );

        let (wd, weights) = problem.into_solution();
        TrainedWdSvm::from_parts(wd, weights, 0.0, result, self.config.clone())
    }
}

/// A trained weighted-degree SVM: a dense weight vector over the implicit
/// feature space plus a bias
pub struct TrainedWdSvm {
    wd: WdConfig,
    weights: Vec<f64>,
    bias: f64,
    result: OptimizationResult,
    config: TrainConfig,
}

impl TrainedWdSvm {
    /// Assemble a model from its parts, checking that the weight vector
    /// matches the feature-space dimension
    pub(crate) fn from_parts(
        wd: WdConfig,
        weights: Vec<f64>,
        bias: f64,
        result: OptimizationResult,
        config: TrainConfig,
    ) -> Result<Self> {
        if weights.len() != wd.feature_dim() {
            return Err(WdSvmError::DimensionMismatch {
                expected: wd.feature_dim(),
                actual: weights.len(),
            });
        }
        Ok(Self {
            wd,
            weights,
            bias,
            result,
            config,
        })
    }

    /// Raw decision value for an encoded sequence
    pub fn decision_function(&self, sequence: &[u8]) -> Result<f64> {
        Ok(self.wd.score(sequence, &self.weights)? + self.bias)
    }

    /// The feature-map configuration used in training
    pub fn wd(&self) -> &WdConfig {
        &self.wd
    }

    /// The trained dense weight vector
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Statistics of the optimization run that produced this model
    pub fn optimization_result(&self) -> &OptimizationResult {
        &self.result
    }

    /// The configuration this model was trained with
    pub fn train_config(&self) -> &TrainConfig {
        &self.config
    }
}

impl SequenceModel for TrainedWdSvm {
    fn predict(&self, sequence: &[u8]) -> Result<Prediction> {
        let decision_value = self.decision_function(sequence)?;
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Ok(Prediction::new(label, decision_value))
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Alphabet, StringDataset};

    fn separable_dataset() -> StringDataset {
        StringDataset::from_strings(
            &[
                ("AAAA", 1.0),
                ("AATA", 1.0),
                ("ATAA", 1.0),
                ("TTTT", -1.0),
                ("TTAT", -1.0),
                ("TATT", -1.0),
            ],
            &Alphabet::dna(),
        )
        .expect("Dataset should build")
    }

    #[test]
    fn test_train_and_predict() {
        let dataset = separable_dataset();
        let config = TrainConfig {
            degree: 2,
            bufsize: 100,
            ..TrainConfig::default()
        };

        let model = WdSvmOptimizer::new(config)
            .train(&dataset)
            .expect("Training should succeed");

        for (i, &label) in dataset.get_labels().iter().enumerate() {
            let prediction = model
                .predict(dataset.sequence(i))
                .expect("Prediction should succeed");
            assert_eq!(prediction.label, label);
        }
    }

    #[test]
    fn test_model_dimensions() {
        let dataset = separable_dataset();
        let model = WdSvmOptimizer::with_defaults()
            .train(&dataset)
            .expect("Training should succeed");

        assert_eq!(model.weights().len(), model.wd().feature_dim());
        assert_eq!(model.bias(), 0.0);
        assert!(model.optimization_result().iterations > 0);
    }

    #[test]
    fn test_prediction_rejects_wrong_length() {
        let dataset = separable_dataset();
        let model = WdSvmOptimizer::with_defaults()
            .train(&dataset)
            .expect("Training should succeed");

        let result = model.predict(&[0, 1]);
        assert!(matches!(
            result,
            Err(WdSvmError::SequenceLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_predict_batch() {
        let dataset = separable_dataset();
        let model = WdSvmOptimizer::with_defaults()
            .train(&dataset)
            .expect("Training should succeed");

        let sequences: Vec<&[u8]> = (0..dataset.len()).map(|i| dataset.sequence(i)).collect();
        let predictions = model
            .predict_batch(&sequences)
            .expect("Batch prediction should succeed");
        assert_eq!(predictions.len(), dataset.len());
    }

    #[test]
    fn test_from_parts_validates_dimension() {
        let wd = WdConfig::new(1, 4, 2).expect("Config should build");
        let result = TrainedWdSvm::from_parts(
            wd,
            vec![0.0; 3],
            0.0,
            OptimizationResult {
                iterations: 0,
                num_cuts: 0,
                primal_objective: 0.0,
                dual_objective: 0.0,
                converged: true,
            },
            TrainConfig::default(),
        );
        assert!(matches!(result, Err(WdSvmError::DimensionMismatch { .. })));
    }
}
