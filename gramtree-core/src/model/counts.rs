use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::lookup::{NgramLookupTable, build_lookup};
use super::probabilities::{NgramSummaryNode, annotate};
use super::sorted::sort;
use super::tokenizer::tokenize;

/// A node in the unsorted counting trie.
///
/// The path from the trie root to a node at depth K is a K-token prefix,
/// and `count` is the number of windows sharing that prefix. Nodes are
/// only ever mutated during counting (counts increase monotonically);
/// the sorted and annotated views are derived copies.
#[derive(Clone, Debug)]
pub(crate) struct CountNode {
	/// The token this node is keyed by (also the key in the parent map).
	pub(crate) token: String,
	/// Number of windows whose prefix ends at this node. Always >= 1.
	pub(crate) count: usize,
	/// Creation order within the owning counter. `HashMap` iteration
	/// order is arbitrary, so this is what realizes the first-seen
	/// tie-breaking the sorted views rely on.
	pub(crate) seq: usize,
	/// Child nodes, keyed by the next token in the prefix.
	pub(crate) next: HashMap<String, CountNode>,
}

/// Frequency-counting trie for n-grams of a fixed order.
///
/// Slides a window of exactly `n` tokens over every document added to
/// the batch and accumulates per-prefix counts into a recursive trie.
///
/// # Responsibilities
/// - Tokenize documents and accumulate window counts across a batch
/// - Merge with another counter of the same order `n`
/// - Derive the final result: lookup table and bounded summary
///
/// # Invariants
/// - `n` is always >= 2
/// - Every node's count equals the sum of its children's counts, except
///   at the final depth `n` where nodes have no children
/// - Counting a batch in one pass or as merged sub-batches gives the
///   same trie
#[derive(Clone, Debug)]
pub struct NgramCounts {
	/// The window length (number of tokens in the n-gram)
	n: usize, // must be >= 2
	/// Next creation-order number to hand out
	next_seq: usize,
	/// Top-level nodes, keyed by the first token of the window
	nodes: HashMap<String, CountNode>,
}

/// The full result of counting one batch of inputs.
///
/// `count` is the total number of window occurrences counted; `lookup`
/// is the token-keyed view for point queries; `summary` is the sorted,
/// rounded, per-level-truncated view for display.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramData {
	pub count: usize,
	pub lookup: NgramLookupTable,
	pub summary: Vec<NgramSummaryNode>,
}

impl NgramCounts {
	/// Creates a new counter for windows of `n` tokens.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn new(n: usize) -> Result<Self, String> {
		if n < 2 {
			return Err("n must be >= 2".to_owned());
		}
		Ok(Self { n, next_seq: 0, nodes: HashMap::new() })
	}

	/// Tokenizes a document and accumulates all its windows of `n`
	/// contiguous tokens into the trie.
	///
	/// Windows never span documents and there is no boundary padding: a
	/// document with fewer than `n` tokens contributes nothing.
	pub fn add_document(&mut self, input: &str) {
		let tokens = tokenize(input);
		if tokens.len() < self.n {
			// Too short, no windows to count
			return;
		}

		let next_seq = &mut self.next_seq;
		for window in tokens.windows(self.n) {
			let mut level = &mut self.nodes;
			for token in window {
				let node = level.entry(token.clone()).or_insert_with(|| {
					let seq = *next_seq;
					*next_seq += 1;
					CountNode { token: token.clone(), count: 0, seq, next: HashMap::new() }
				});
				node.count += 1;
				level = &mut node.next;
			}
		}
	}

	/// Merges another counter into this one.
	///
	/// Counts for matching prefixes are summed; prefixes only seen by
	/// `other` are appended in `other`'s first-seen order, after
	/// everything this counter has already seen.
	///
	/// # Errors
	/// Returns an error if the counter orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.n != other.n {
			return Err("N mismatch".to_owned());
		}
		merge_level(&mut self.nodes, &other.nodes, &mut self.next_seq);
		Ok(())
	}

	/// Derives the final result from the accumulated counts.
	///
	/// Builds the descending-sorted view, takes the grand total from the
	/// top-level counts, and produces the two parallel outputs: the
	/// full-precision lookup table and the truncated, rounded summary.
	/// The trie itself is left untouched.
	pub fn to_data(&self) -> NgramData {
		let sorted = sort(&self.nodes);
		let total: usize = sorted.iter().map(|node| node.count).sum();
		NgramData {
			count: total,
			lookup: build_lookup(&self.nodes, self.n),
			summary: annotate(&sorted, total, true),
		}
	}
}

/// Counts all windows of `n` tokens across a batch of input strings and
/// returns the combined result.
///
/// This is the pipeline entry point: counts accumulate across the whole
/// batch into one trie, so the result reflects the union of all windows
/// from all inputs. Degenerate batches (empty, whitespace-only, or too
/// short for a single window) produce an empty result, never an error.
///
/// # Errors
/// Returns an error if `n < 2`.
pub fn count_ngrams<S: AsRef<str>>(inputs: &[S], n: usize) -> Result<NgramData, String> {
	let mut counts = NgramCounts::new(n)?;
	for input in inputs {
		counts.add_document(input.as_ref());
	}
	Ok(counts.to_data())
}

/// Recursively folds one trie level into another, preserving the
/// destination's first-seen order.
fn merge_level(
	into: &mut HashMap<String, CountNode>,
	from: &HashMap<String, CountNode>,
	next_seq: &mut usize,
) {
	let mut incoming: Vec<&CountNode> = from.values().collect();
	incoming.sort_by_key(|node| node.seq);

	for node in incoming {
		let entry = into.entry(node.token.clone()).or_insert_with(|| {
			let seq = *next_seq;
			*next_seq += 1;
			CountNode { token: node.token.clone(), count: 0, seq, next: HashMap::new() }
		});
		entry.count += node.count;
		merge_level(&mut entry.next, &node.next, next_seq);
	}
}
