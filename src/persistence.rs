//! Model serialization and persistence
//!
//! This module provides functionality to save and load trained models for
//! use with the CLI application and other scenarios where model persistence
//! is needed. A model is a dense weight vector plus its feature-map
//! geometry and alphabet, so reconstruction is complete: a loaded model
//! predicts identically to the one that was saved.

use crate::api::TrainedModel;
use crate::core::traits::SequenceModel;
use crate::core::{OptimizationResult, Result, TrainConfig, WdSvmError};
use crate::data::Alphabet;
use crate::features::WdConfig;
use crate::optimizer::TrainedWdSvm;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable representation of a trained model
#[derive(Serialize, Deserialize)]
pub struct SerializableModel {
    /// Dense weight vector over the weighted-degree feature space
    pub weights: Vec<f64>,
    /// Bias term
    pub bias: f64,
    /// Maximum k-mer order
    pub degree: usize,
    /// Sequence length the model was trained on
    pub string_length: usize,
    /// Alphabet used to encode sequences
    pub alphabet: Alphabet,
    /// Model metadata
    pub metadata: ModelMetadata,
}

/// Model metadata for tracking and validation
#[derive(Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    /// Training parameters used
    pub training_params: TrainingParams,
    /// Statistics of the optimization run
    pub training_stats: TrainingStats,
    /// Creation timestamp
    pub created_at: String,
}

/// Training parameters for reference
#[derive(Serialize, Deserialize)]
pub struct TrainingParams {
    pub c: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
    pub bufsize: usize,
}

/// Optimization statistics for reference
#[derive(Serialize, Deserialize)]
pub struct TrainingStats {
    pub iterations: usize,
    pub num_cuts: usize,
    pub primal_objective: f64,
    pub dual_objective: f64,
    pub converged: bool,
}

impl SerializableModel {
    /// Create a serializable model from a trained model
    pub fn from_trained_model(model: &TrainedModel) -> Self {
        let inner = model.inner();
        let wd = inner.wd();
        let result = inner.optimization_result();
        let config = inner.train_config();

        Self {
            weights: inner.weights().to_vec(),
            bias: inner.bias(),
            degree: wd.degree(),
            string_length: wd.string_length(),
            alphabet: model.alphabet().clone(),
            metadata: ModelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                training_params: TrainingParams {
                    c: config.c,
                    epsilon: config.epsilon,
                    max_iterations: config.max_iterations,
                    bufsize: config.bufsize,
                },
                training_stats: TrainingStats {
                    iterations: result.iterations,
                    num_cuts: result.num_cuts,
                    primal_objective: result.primal_objective,
                    dual_objective: result.dual_objective,
                    converged: result.converged,
                },
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(WdSvmError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| WdSvmError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load model from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(WdSvmError::IoError)?;
        let reader = BufReader::new(file);
        let model = serde_json::from_reader(reader)
            .map_err(|e| WdSvmError::SerializationError(e.to_string()))?;
        Ok(model)
    }

    /// Convert back to a usable trained model
    pub fn to_trained_model(&self) -> Result<TrainedModel> {
        let wd = WdConfig::new(self.degree, self.alphabet.size(), self.string_length)?;

        let stats = &self.metadata.training_stats;
        let result = OptimizationResult {
            iterations: stats.iterations,
            num_cuts: stats.num_cuts,
            primal_objective: stats.primal_objective,
            dual_objective: stats.dual_objective,
            converged: stats.converged,
        };
        let params = &self.metadata.training_params;
        let config = TrainConfig {
            c: params.c,
            epsilon: params.epsilon,
            max_iterations: params.max_iterations,
            degree: self.degree,
            bufsize: params.bufsize,
        };

        let inner = TrainedWdSvm::from_parts(wd, self.weights.clone(), self.bias, result, config)?;
        Ok(TrainedModel::from_parts(inner, self.alphabet.clone()))
    }

    /// Print model summary
    pub fn print_summary(&self) {
        println!("=== WD-SVM Model Summary ===");
        println!("Degree: {}", self.degree);
        println!("String Length: {}", self.string_length);
        println!("Alphabet Size: {}", self.alphabet.size());
        println!("Feature Dimension: {}", self.weights.len());
        println!("Bias: {:.6}", self.bias);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Training Parameters:");
        println!("  C: {}", self.metadata.training_params.c);
        println!("  Epsilon: {}", self.metadata.training_params.epsilon);
        println!(
            "  Max Iterations: {}",
            self.metadata.training_params.max_iterations
        );
        println!("  Buffer Size: {}", self.metadata.training_params.bufsize);
        println!("Training Run:");
        println!("  Iterations: {}", self.metadata.training_stats.iterations);
        println!("  Cuts: {}", self.metadata.training_stats.num_cuts);
        println!("  Converged: {}", self.metadata.training_stats.converged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WdSvm;
    use tempfile::NamedTempFile;

    fn toy_model() -> TrainedModel {
        WdSvm::new()
            .with_degree(2)
            .train_entries(&[
                ("AAAA", 1.0),
                ("AATA", 1.0),
                ("TTTT", -1.0),
                ("TTAT", -1.0),
            ])
            .expect("Training should succeed")
    }

    #[test]
    fn test_model_serialization_roundtrip() -> Result<()> {
        let model = toy_model();
        let serializable = SerializableModel::from_trained_model(&model);

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        serializable.save_to_file(temp_file.path())?;

        let loaded = SerializableModel::load_from_file(temp_file.path())?;
        assert_eq!(loaded.degree, 2);
        assert_eq!(loaded.string_length, 4);
        assert_eq!(loaded.weights.len(), serializable.weights.len());
        assert_eq!(loaded.bias, serializable.bias);

        Ok(())
    }

    #[test]
    fn test_loaded_model_predicts_identically() -> Result<()> {
        let model = toy_model();
        let serializable = SerializableModel::from_trained_model(&model);

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        serializable.save_to_file(temp_file.path())?;

        let restored = SerializableModel::load_from_file(temp_file.path())?.to_trained_model()?;

        for seq in ["AAAA", "TTTT", "ATAT", "GGCC"] {
            let original = model.predict_sequence(seq)?;
            let reloaded = restored.predict_sequence(seq)?;
            assert_eq!(original.label, reloaded.label);
            assert_eq!(original.decision_value, reloaded.decision_value);
        }

        Ok(())
    }

    #[test]
    fn test_corrupt_weights_rejected_on_reconstruction() {
        let model = toy_model();
        let mut serializable = SerializableModel::from_trained_model(&model);
        serializable.weights.truncate(3);

        let result = serializable.to_trained_model();
        assert!(matches!(result, Err(WdSvmError::DimensionMismatch { .. })));
    }
}
