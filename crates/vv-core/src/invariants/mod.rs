//! Invariant checks over generated vector sets.

pub mod vectors;

pub use vectors::{VectorSetProperties, VectorSetPropertyChecker};
