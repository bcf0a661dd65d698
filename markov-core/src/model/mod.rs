//! Order-k Markov model over 8-bit symbols.
//!
//! - Fixed-order context statistics (`MarkovModel`)
//! - Per-context successor counts (`State`)

/// Context table, training, frequency queries and weighted sampling.
///
/// Exposes the model and its seeded generation interface.
pub mod markov_model;

/// Successor counts of a single context.
///
/// Tracks observed successors with their total and supports weighted
/// random sampling. Not exposed publicly.
mod state;

/// Reserved "no-character" symbol.
///
/// Never recorded as a successor. Returned by `MarkovModel::next_symbol`
/// when a context is unknown.
pub const NO_SYMBOL: u8 = 0;
