use std::collections::HashMap;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::NO_SYMBOL;
use super::state::State;
use crate::error::{ModelError, ModelResult};

/// Order-k Markov model over 8-bit symbols.
///
/// The model maps every context of exactly `order` symbols seen during
/// training to the symbols that followed it, and draws successors with the
/// same frequencies. It owns its random generator, so two models built with
/// the same order and seed and trained on the same text answer the same
/// sequence of `next_symbol` calls identically.
///
/// # Responsibilities
/// - Accumulate context → successor counts from training text
/// - Answer frequency queries for a context, or a context and a symbol
/// - Draw the next symbol for a context, weighted by observed counts
/// - Merge with another model of the same order
///
/// # Invariants
/// - `order` never changes after construction
/// - Every stored context is exactly `order` symbols long
/// - Every stored state has a total >= 1 equal to the sum of its counts
/// - `NO_SYMBOL` is never recorded as a successor
///
/// Absence is never an error: unknown contexts report a frequency of 0 and
/// a successor of `NO_SYMBOL`.
#[derive(Clone, Debug)]
pub struct MarkovModel<R = StdRng> {
	/// Context length
	order: usize,

	/// Mapping from a context to the statistics of its successors
	states: HashMap<Vec<u8>, State>,

	/// Generator consumed by `next_symbol` and `random_context`
	rng: R,
}

impl MarkovModel<StdRng> {
	/// Creates an empty model of the given order with a generator seeded
	/// from `seed`.
	///
	/// `order` may be 0, in which case every context is the empty slice.
	pub fn new(order: usize, seed: u64) -> Self {
		Self::with_rng(order, StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> MarkovModel<R> {
	/// Creates an empty model of the given order around a caller-supplied
	/// generator.
	pub fn with_rng(order: usize, rng: R) -> Self {
		Self { order, states: HashMap::new(), rng }
	}

	/// Returns the context length of this model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts recorded so far.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Adds the statistics of `text` to the model.
	///
	/// Every position `i` in `order..text.len()` contributes one observation:
	/// the context `text[i - order..i]` followed by `text[i]`.
	///
	/// # Notes
	/// - Positions whose successor is `NO_SYMBOL` are skipped.
	/// - Contexts are taken literally. A `NO_SYMBOL` inside a context keeps
	///   its place in the window and becomes part of the key.
	/// - Calls accumulate; nothing is reset between them.
	/// - Text shorter than or equal to `order` records nothing.
	pub fn train(&mut self, text: &[u8]) {
		let mut recorded = 0usize;
		let mut skipped = 0usize;

		for i in self.order..text.len() {
			let next_symbol = text[i];
			if next_symbol == NO_SYMBOL {
				skipped += 1;
				continue;
			}

			let context = &text[i - self.order..i];
			match self.states.get_mut(context) {
				Some(state) => state.add_transition(next_symbol, 1),
				None => {
					let mut state = State::default();
					state.add_transition(next_symbol, 1);
					self.states.insert(context.to_vec(), state);
				}
			}
			recorded += 1;
		}

		debug!(
			"trained order {} on {} symbols: {} observations recorded, {} skipped, {} contexts",
			self.order,
			text.len(),
			recorded,
			skipped,
			self.states.len()
		);
	}

	/// Returns how many times `context` was observed, or 0 if it never was.
	///
	/// A context whose length differs from `order` is always unknown.
	pub fn frequency(&self, context: &[u8]) -> usize {
		self.states.get(context).map_or(0, State::total)
	}

	/// Returns how many times `symbol` immediately followed `context`.
	///
	/// Returns 0 if the context has the wrong length, is unknown, or was
	/// never followed by `symbol`.
	pub fn frequency_of(&self, context: &[u8], symbol: u8) -> usize {
		if context.len() != self.order {
			return 0;
		}
		self.states.get(context).map_or(0, |state| state.count(symbol))
	}

	/// Iterates over the successors of `context` as `(symbol, count)` pairs
	/// in ascending symbol order. Empty for an unknown context.
	pub fn successors(&self, context: &[u8]) -> impl Iterator<Item = (u8, usize)> + '_ {
		self.states.get(context).into_iter().flat_map(|state| state.transitions())
	}

	/// Draws the symbol following `context`.
	///
	/// The probability of each successor equals its count divided by the
	/// context frequency. Exactly one value is drawn from the generator
	/// when the context is known.
	///
	/// Returns `NO_SYMBOL`, without touching the generator, if the context
	/// is unknown.
	pub fn next_symbol(&mut self, context: &[u8]) -> u8 {
		match self.states.get(context) {
			Some(state) => state.predict(&mut self.rng),
			None => {
				trace!("unknown context {:?}", context);
				NO_SYMBOL
			}
		}
	}

	/// Picks a recorded context, useful to start a generation run.
	///
	/// Contexts are ordered before drawing so the choice only depends on the
	/// generator state. Returns `None`, without touching the generator, if
	/// the model is empty.
	pub fn random_context(&mut self) -> Option<Vec<u8>> {
		if self.states.is_empty() {
			return None;
		}

		let mut contexts: Vec<&Vec<u8>> = self.states.keys().collect();
		contexts.sort_unstable();
		let index = self.rng.random_range(0..contexts.len());
		Some(contexts[index].clone())
	}

	/// Merges another model into this one.
	///
	/// Counts of matching contexts and successors are summed; missing
	/// contexts are cloned. The generator of `other` is ignored.
	///
	/// # Errors
	/// Returns `ModelError::OrderMismatch` if the orders differ, leaving
	/// `self` unchanged.
	pub fn merge<S>(&mut self, other: &MarkovModel<S>) -> ModelResult<()> {
		if self.order != other.order {
			return Err(ModelError::OrderMismatch { expected: self.order, found: other.order });
		}

		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state);
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}

		debug!("merged {} contexts, now {}", other.states.len(), self.states.len());
		Ok(())
	}
}
