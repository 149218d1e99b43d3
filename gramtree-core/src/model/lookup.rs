use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::counts::CountNode;
use super::probabilities::annotate;
use super::sorted::sort;

/// Token-keyed view of the counting trie, for descending by exact token
/// rather than scanning.
pub type NgramLookupTable = HashMap<String, NgramLookupNode>;

/// One entry of the lookup table.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramLookupNode {
	pub token: String,
	pub count: usize,
	pub next: LookupNext,
}

/// What sits below a lookup entry: another token-keyed table at upper
/// levels, or the ranked leaf array at the final level.
///
/// Untagged, so a table serializes as a JSON object and the leaf level
/// as a JSON array, which is also unambiguous when reading back.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum LookupNext {
	Table(NgramLookupTable),
	Leaves(Vec<NgramLeaf>),
}

/// A ready-to-render entry at the final level of the lookup table,
/// annotated at full precision (no truncation, no rounding).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramLeaf {
	pub token: String,
	pub count: usize,
	pub prob: f64,
	pub cumprob: f64,
}

/// Builds the lookup table for one trie level.
///
/// Mirrors the token-keyed trie shape while more than two levels remain
/// below; at the second-to-last level, each node's children become a
/// flat, frequency-ranked leaf array instead of a further table. The
/// trie is read, never mutated.
pub(crate) fn build_lookup(level: &HashMap<String, CountNode>, remaining: usize) -> NgramLookupTable {
	let mut table = NgramLookupTable::with_capacity(level.len());
	for node in level.values() {
		let next = if remaining == 2 {
			LookupNext::Leaves(leaf_entries(&node.next))
		} else {
			LookupNext::Table(build_lookup(&node.next, remaining - 1))
		};
		table.insert(
			node.token.clone(),
			NgramLookupNode { token: node.token.clone(), count: node.count, next },
		);
	}
	table
}

/// Sorts and annotates a node's immediate children into the flat leaf
/// array used at the final level.
fn leaf_entries(level: &HashMap<String, CountNode>) -> Vec<NgramLeaf> {
	let total: usize = level.values().map(|node| node.count).sum();
	annotate(&sort(level), total, false)
		.into_iter()
		.map(|node| NgramLeaf {
			token: node.token,
			count: node.count,
			prob: node.prob,
			cumprob: node.cumprob,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(token: &str, count: usize, seq: usize, next: HashMap<String, CountNode>) -> CountNode {
		CountNode { token: token.to_owned(), count, seq, next }
	}

	fn level(nodes: Vec<CountNode>) -> HashMap<String, CountNode> {
		nodes.into_iter().map(|n| (n.token.clone(), n)).collect()
	}

	#[test]
	fn bigram_tables_hold_leaves_below_the_top_level() {
		let children = level(vec![
			node("sat", 2, 1, HashMap::new()),
			node("ate", 1, 2, HashMap::new()),
		]);
		let trie = level(vec![node("cat", 3, 0, children)]);

		let table = build_lookup(&trie, 2);
		assert_eq!(table["cat"].count, 3);

		let LookupNext::Leaves(leaves) = &table["cat"].next else {
			panic!("expected leaf entries one level below the top");
		};
		assert_eq!(leaves[0].token, "sat");
		assert!((leaves[0].prob - 2.0 / 3.0).abs() < 1e-12);
		assert!((leaves[1].cumprob - 1.0).abs() < 1e-12);
	}

	#[test]
	fn deeper_tables_stay_keyed_until_the_final_pair() {
		let grandchildren = level(vec![node("mat", 1, 2, HashMap::new())]);
		let children = level(vec![node("the", 1, 1, grandchildren)]);
		let trie = level(vec![node("on", 1, 0, children)]);

		let table = build_lookup(&trie, 3);
		let LookupNext::Table(after_on) = &table["on"].next else {
			panic!("expected a keyed table at the second level");
		};
		let LookupNext::Leaves(after_on_the) = &after_on["the"].next else {
			panic!("expected leaf entries at the final level");
		};
		assert_eq!(after_on_the[0].token, "mat");
		assert!((after_on_the[0].cumprob - 1.0).abs() < 1e-12);
	}

	#[test]
	fn leaves_are_never_truncated() {
		let children: HashMap<String, CountNode> = level(
			(0..40usize).map(|i| node(&format!("t{i}"), 1, i + 1, HashMap::new())).collect(),
		);
		let trie = level(vec![node("head", 40, 0, children)]);

		let table = build_lookup(&trie, 2);
		let LookupNext::Leaves(leaves) = &table["head"].next else {
			panic!("expected leaf entries");
		};
		assert_eq!(leaves.len(), 40);
	}
}
