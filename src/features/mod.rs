//! Implicit feature maps for sequence classification

pub mod wd;

pub use self::wd::*;
