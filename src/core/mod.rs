//! core components and types used throughout this library

/// Counter type defining operations required by the histogram and impls for primitives.
pub mod counter;

/// Derivation of the bucket layout from a histogram's configuration.
pub mod layout;

mod equivalence;
mod index;
