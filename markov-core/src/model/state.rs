use std::collections::BTreeMap;

use rand::Rng;

use super::NO_SYMBOL;

/// Successor statistics of a single context.
///
/// A `State` stores every symbol observed right after one context together
/// with the number of times it was observed, and keeps the sum of those
/// counts alongside so that frequency queries do not have to re-sum.
///
/// ## Invariants
/// - `total == counts.values().sum()`
/// - Each stored count is strictly positive
/// - `NO_SYMBOL` is never a key
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
	/// Successor symbol to occurrence count, in ascending symbol order.
	/// Example: { b'a' => 3, b'e' => 42 }
	counts: BTreeMap<u8, usize>,
	/// Sum of all counts.
	total: usize,
}

impl State {
	/// Records `occurrence` observations of `symbol`.
	///
	/// The caller guarantees `symbol != NO_SYMBOL` and `occurrence > 0`.
	pub fn add_transition(&mut self, symbol: u8, occurrence: usize) {
		debug_assert!(symbol != NO_SYMBOL && occurrence > 0);
		*self.counts.entry(symbol).or_insert(0) += occurrence;
		self.total += occurrence;
	}

	/// Total number of observations for this context.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of times `symbol` followed this context.
	pub fn count(&self, symbol: u8) -> usize {
		self.counts.get(&symbol).copied().unwrap_or(0)
	}

	/// Iterates over `(symbol, count)` pairs in ascending symbol order.
	pub fn transitions(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
		self.counts.iter().map(|(symbol, count)| (*symbol, *count))
	}

	/// Draws a successor with probability `count / total`.
	///
	/// Takes exactly one value from `rng` unless the state is empty, in which
	/// case nothing is drawn and `NO_SYMBOL` is returned.
	///
	/// The draw `r` falls in `[0, total)` and the walk subtracts each count in
	/// ascending symbol order until `r` goes below the current count, so each
	/// symbol owns a disjoint interval as wide as its count.
	pub fn predict<R: Rng>(&self, rng: &mut R) -> u8 {
		if self.total == 0 {
			return NO_SYMBOL;
		}

		let mut r = rng.random_range(0..self.total);
		for (symbol, occurrence) in &self.counts {
			if r < *occurrence {
				return *symbol;
			}
			r -= occurrence;
		}

		// Unreachable while the total matches the counts.
		NO_SYMBOL
	}

	/// Adds every count of `other` into this state.
	pub fn merge(&mut self, other: &Self) {
		for (symbol, occurrence) in &other.counts {
			self.add_transition(*symbol, *occurrence);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn total_tracks_counts() {
		let mut state = State::default();
		state.add_transition(b'a', 1);
		state.add_transition(b'b', 1);
		state.add_transition(b'a', 1);

		assert_eq!(state.total(), 3);
		assert_eq!(state.count(b'a'), 2);
		assert_eq!(state.count(b'b'), 1);
		assert_eq!(state.count(b'z'), 0);
	}

	#[test]
	fn transitions_are_sorted() {
		let mut state = State::default();
		for symbol in [b'z', b'a', b'm', b'a'] {
			state.add_transition(symbol, 1);
		}
		let collected: Vec<_> = state.transitions().collect();
		assert_eq!(collected, vec![(b'a', 2), (b'm', 1), (b'z', 1)]);
	}

	#[test]
	fn empty_state_predicts_nothing() {
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(State::default().predict(&mut rng), NO_SYMBOL);
	}

	#[test]
	fn single_successor_is_always_chosen() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut state = State::default();
		state.add_transition(b'q', 5);
		for _ in 0..100 {
			assert_eq!(state.predict(&mut rng), b'q');
		}
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = State::default();
		left.add_transition(b'a', 2);
		let mut right = State::default();
		right.add_transition(b'a', 1);
		right.add_transition(b'c', 4);

		left.merge(&right);
		assert_eq!(left.count(b'a'), 3);
		assert_eq!(left.count(b'c'), 4);
		assert_eq!(left.total(), 7);
	}
}
