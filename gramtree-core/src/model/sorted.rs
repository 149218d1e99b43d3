use std::collections::HashMap;

use super::counts::CountNode;

/// One level of the frequency-sorted view of the counting trie.
///
/// Same shape as the trie node, but siblings are held in an array sorted
/// by `count` descending rather than keyed by token. Derived, immutable
/// once built.
#[derive(Clone, Debug)]
pub struct SortedNgramCount {
	pub token: String,
	pub count: usize,
	pub next: Vec<SortedNgramCount>,
}

/// Produces the descending-by-count view of one trie level, recursively.
///
/// Siblings with equal counts keep their first-seen order: the level is
/// laid out in creation order first, then stably sorted by count. The
/// trie itself is never mutated.
pub(crate) fn sort(level: &HashMap<String, CountNode>) -> Vec<SortedNgramCount> {
	let mut nodes: Vec<&CountNode> = level.values().collect();
	nodes.sort_by_key(|node| node.seq);

	let mut sorted: Vec<SortedNgramCount> = nodes
		.into_iter()
		.map(|node| SortedNgramCount {
			token: node.token.clone(),
			count: node.count,
			next: sort(&node.next),
		})
		.collect();
	// Stable, so equal counts stay in first-seen order
	sorted.sort_by(|a, b| b.count.cmp(&a.count));
	sorted
}
