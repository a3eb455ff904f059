//! Core type definitions for the weighted-degree SVM

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Configuration for training
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Regularization parameter (penalty on margin violations)
    pub c: f64,
    /// Relative tolerance on the primal-dual gap
    pub epsilon: f64,
    /// Maximum number of cutting-plane iterations
    pub max_iterations: usize,
    /// Maximum k-mer order of the weighted-degree feature map
    pub degree: usize,
    /// Maximum number of cutting planes kept in the buffer
    pub bufsize: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            epsilon: 0.001,
            max_iterations: 1000,
            degree: 4,
            bufsize: 3000,
        }
    }
}

/// Result of a cutting-plane optimization run
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Number of iterations performed
    pub iterations: usize,
    /// Number of cutting planes generated
    pub num_cuts: usize,
    /// Final primal objective value 0.5*||w||^2 + C*risk
    pub primal_objective: f64,
    /// Final objective of the reduced dual (lower bound on the primal optimum)
    pub dual_objective: f64,
    /// Whether the gap tolerance was reached before the iteration cap
    pub converged: bool,
}

/// Norms reported by a weight-vector aggregation, needed by the solver's
/// line search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightUpdate {
    /// Squared norm of the freshly aggregated weight vector
    pub sq_norm: f64,
    /// Dot product of the new weight vector with the previous iterate
    pub dot_with_previous: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(1.0, 2.5);
        assert_eq!(pred.label, 1.0);
        assert_eq!(pred.decision_value, 2.5);
        assert_eq!(pred.confidence(), 2.5);

        let neg_pred = Prediction::new(-1.0, -1.8);
        assert_eq!(neg_pred.confidence(), 1.8);
    }

    #[test]
    fn test_train_config_default() {
        let config = TrainConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.epsilon, 0.001);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.degree, 4);
        assert_eq!(config.bufsize, 3000);
    }

    #[test]
    fn test_weight_update_fields() {
        let update = WeightUpdate {
            sq_norm: 4.0,
            dot_with_previous: -1.5,
        };
        assert_eq!(update.sq_norm, 4.0);
        assert_eq!(update.dot_with_previous, -1.5);
    }
}
