//! Rust implementation of a weighted-degree string kernel SVM
//!
//! Trains a linear margin classifier over fixed-length symbol sequences
//! using the implicit weighted-degree feature map and the optimized cutting
//! plane algorithm from "Optimized Cutting Plane Algorithm for Large-Scale
//! Risk Minimization" by Vojtech Franc and Soeren Sonnenburg.

pub mod api;
pub mod core;
pub mod data;
pub mod features;
pub mod optimizer;
pub mod persistence;
pub mod solver;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, WdSvm};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{Alphabet, StringDataset};
pub use crate::features::WdConfig;
pub use crate::optimizer::{TrainedWdSvm, WdSvmOptimizer};
pub use crate::solver::{CutBuffer, OcasSolver, WdOcasProblem, WeightStore};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
