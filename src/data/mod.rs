//! Data loading and dataset implementations
//!
//! This module provides the symbol alphabet, the fixed-length sequence
//! dataset, and its plain-text file loader.

pub mod alphabet;
pub mod strings;

pub use self::alphabet::*;
pub use self::strings::*;
