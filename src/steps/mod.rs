//! Evaluation steps.
//!
//! The comparison algorithm stays pluggable. Each step reads submission and
//! reference output through the sandbox capability and reduces them to a
//! scored outcome; the white-diff comparator is the built-in variant.

pub mod registry;
pub mod step;
pub mod whitediff;
