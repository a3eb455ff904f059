//! Cutting-plane solver for the weighted-degree SVM
//!
//! Implements the optimized cutting plane algorithm (OCAS) described in
//! "Optimized Cutting Plane Algorithm for Large-Scale Risk Minimization"
//! by Vojtech Franc and Soeren Sonnenburg.

pub mod context;
pub mod cuts;
pub mod ocas;
pub mod qp;
pub mod weights;

pub use self::context::*;
pub use self::cuts::*;
pub use self::ocas::*;
pub use self::qp::*;
pub use self::weights::*;
