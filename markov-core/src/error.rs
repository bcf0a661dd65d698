use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Failures of the few model operations that can be refused.
///
/// Training and queries never fail; see `MarkovModel`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
	#[error("Order mismatch: self={expected}, other={found}")]
	OrderMismatch { expected: usize, found: usize },
}
