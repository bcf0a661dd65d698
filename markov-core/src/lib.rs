//! Character-level Markov model library.
//!
//! This crate provides an order-k Markov model over 8-bit symbols:
//! - Training from raw byte text into context → successor counts
//! - Frequency queries per context and per successor
//! - Seed-reproducible weighted sampling of the next symbol
//!
//! The value `0` is reserved as `NO_SYMBOL` and reports absence. Queries
//! never fail: an unknown context has a frequency of 0 and a successor of
//! `NO_SYMBOL`.

/// The Markov model and its reserved symbol.
pub mod model;

/// Errors of the model operations that can be refused.
pub mod error;

pub use error::{ModelError, ModelResult};
pub use model::NO_SYMBOL;
pub use model::markov_model::MarkovModel;
