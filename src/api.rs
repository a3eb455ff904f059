//! High-level API for weighted-degree SVM operations
//!
//! This module provides a user-friendly interface for common tasks:
//! training on labeled sequence data, prediction, and model evaluation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wdsvm::api::WdSvm;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Train a model on DNA sequences
//! let model = WdSvm::new()
//!     .with_degree(3)
//!     .with_c(1.0)
//!     .train_from_file("train.seq")?;
//!
//! // Make predictions
//! let prediction = model.predict_sequence("ACGTACGT")?;
//! println!("Accuracy: {:.2}%", model.evaluate_from_file("test.seq")? * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{
    Prediction, Result, SequenceDataset, SequenceModel, TrainConfig, WdSvmError,
};
use crate::data::{Alphabet, StringDataset};
use crate::optimizer::{TrainedWdSvm, WdSvmOptimizer};
use std::path::Path;

/// High-level SVM interface with builder pattern
pub struct WdSvm {
    config: TrainConfig,
    alphabet: Alphabet,
}

impl WdSvm {
    /// Create a new trainer with the DNA alphabet and default parameters
    pub fn new() -> Self {
        Self {
            config: TrainConfig::default(),
            alphabet: Alphabet::dna(),
        }
    }
}

impl Default for WdSvm {
    fn default() -> Self {
        Self::new()
    }
}

impl WdSvm {
    /// Set the alphabet used to encode text sequences
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set the maximum k-mer order of the feature map
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.config.degree = degree;
        self
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set convergence tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set maximum number of cutting-plane iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the cut buffer capacity
    pub fn with_bufsize(mut self, bufsize: usize) -> Self {
        self.config.bufsize = bufsize;
        self
    }

    /// Train on a dataset
    pub fn train<D: SequenceDataset>(self, dataset: &D) -> Result<TrainedModel> {
        if dataset.alphabet_size() != self.alphabet.size() {
            return Err(WdSvmError::InvalidParameter(format!(
                "dataset alphabet size {} does not match configured alphabet size {}",
                dataset.alphabet_size(),
                self.alphabet.size()
            )));
        }
        let optimizer = WdSvmOptimizer::new(self.config);
        let model = optimizer.train(dataset)?;
        Ok(TrainedModel {
            model,
            alphabet: self.alphabet,
        })
    }

    /// Train on labeled text sequences
    pub fn train_entries(self, entries: &[(&str, f64)]) -> Result<TrainedModel> {
        let dataset = StringDataset::from_strings(entries, &self.alphabet)?;
        self.train(&dataset)
    }

    /// Train from a `label sequence` text file
    pub fn train_from_file<P: AsRef<Path>>(self, path: P) -> Result<TrainedModel> {
        let dataset = StringDataset::from_file(path, &self.alphabet)?;
        self.train(&dataset)
    }
}

/// Trained model with high-level prediction interface
pub struct TrainedModel {
    model: TrainedWdSvm,
    alphabet: Alphabet,
}

impl TrainedModel {
    pub(crate) fn from_parts(model: TrainedWdSvm, alphabet: Alphabet) -> Self {
        Self { model, alphabet }
    }

    /// Predict a single encoded sequence
    pub fn predict(&self, sequence: &[u8]) -> Result<Prediction> {
        self.model.predict(sequence)
    }

    /// Predict a text sequence, encoding it with the model's alphabet
    pub fn predict_sequence(&self, text: &str) -> Result<Prediction> {
        let encoded = self.alphabet.encode(text)?;
        self.model.predict(&encoded)
    }

    /// Predict every sequence of a dataset
    pub fn predict_dataset<D: SequenceDataset>(&self, dataset: &D) -> Result<Vec<Prediction>> {
        (0..dataset.len())
            .map(|i| self.model.predict(dataset.sequence(i)))
            .collect()
    }

    /// Predict every sequence of a `label sequence` file
    pub fn predict_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Prediction>> {
        let dataset = StringDataset::from_file(path, &self.alphabet)?;
        self.predict_dataset(&dataset)
    }

    /// Evaluate accuracy on a dataset
    pub fn evaluate<D: SequenceDataset>(&self, dataset: &D) -> Result<f64> {
        let predictions = self.predict_dataset(dataset)?;
        let labels = dataset.get_labels();

        let correct = predictions
            .iter()
            .zip(labels.iter())
            .filter(|(pred, &actual)| pred.label == actual)
            .count();

        Ok(correct as f64 / labels.len() as f64)
    }

    /// Evaluate accuracy on a `label sequence` file
    pub fn evaluate_from_file<P: AsRef<Path>>(&self, path: P) -> Result<f64> {
        let dataset = StringDataset::from_file(path, &self.alphabet)?;
        self.evaluate(&dataset)
    }

    /// Get detailed evaluation metrics
    pub fn evaluate_detailed<D: SequenceDataset>(&self, dataset: &D) -> Result<EvaluationMetrics> {
        let predictions = self.predict_dataset(dataset)?;
        let labels = dataset.get_labels();

        let mut tp = 0; // True positives
        let mut tn = 0; // True negatives
        let mut fp = 0; // False positives
        let mut fn_ = 0; // False negatives

        for (pred, &actual) in predictions.iter().zip(labels.iter()) {
            match (pred.label > 0.0, actual > 0.0) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
            }
        }

        Ok(EvaluationMetrics::new(tp, tn, fp, fn_))
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        let wd = self.model.wd();
        let result = self.model.optimization_result();
        ModelInfo {
            degree: wd.degree(),
            string_length: wd.string_length(),
            alphabet_size: wd.alphabet_size(),
            feature_dim: wd.feature_dim(),
            bias: self.model.bias(),
            iterations: result.iterations,
            num_cuts: result.num_cuts,
            converged: result.converged,
        }
    }

    /// The alphabet sequences are encoded with
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &TrainedWdSvm {
        &self.model
    }
}

/// Detailed evaluation metrics
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        let total =
            self.true_positives + self.true_negatives + self.false_positives + self.false_negatives;
        if total == 0 {
            0.0
        } else {
            (self.true_positives + self.true_negatives) as f64 / total as f64
        }
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        let denominator = self.true_negatives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_negatives as f64 / denominator as f64
        }
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub degree: usize,
    pub string_length: usize,
    pub alphabet_size: usize,
    pub feature_dim: usize,
    pub bias: f64,
    pub iterations: usize,
    pub num_cuts: usize,
    pub converged: bool,
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train a DNA model on a sequence file with default parameters
    pub fn train_file<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
        WdSvm::new().train_from_file(path)
    }

    /// Train with a custom C parameter
    pub fn train_file_with_c<P: AsRef<Path>>(path: P, c: f64) -> Result<TrainedModel> {
        WdSvm::new().with_c(c).train_from_file(path)
    }

    /// Quick evaluation: train on a training file, test on a test file
    pub fn evaluate_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
    ) -> Result<f64> {
        let model = train_file(train_path)?;
        model.evaluate_from_file(test_path)
    }
}
