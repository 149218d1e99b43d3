use serde::{Deserialize, Serialize};

use super::sorted::SortedNgramCount;

/// Maximum number of continuations kept per level in the summary view.
pub const SUMMARY_SIZE: usize = 15;

/// A frequency-sorted node annotated with probabilities.
///
/// `prob` is this node's share of its sibling group's total count;
/// `cumprob` is the running sum of `prob` over the preceding siblings in
/// sorted order, clamped to 1.0.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramSummaryNode {
	pub token: String,
	pub count: usize,
	pub prob: f64,
	pub cumprob: f64,
	pub next: Vec<NgramSummaryNode>,
}

/// Annotates a sorted sibling group with probabilities, recursively.
///
/// Each node's probability is its count over `sibling_total`; children
/// are annotated against *this node's own* count, not the root total.
/// The running cumulative probability resets per sibling group and is
/// clamped at 1.0 to absorb floating-point drift in the summation.
///
/// With `summary_mode` set, each sibling group is truncated to its first
/// `SUMMARY_SIZE` entries (the highest counts, since the input is sorted
/// descending) and the emitted probabilities are rounded to 3 decimal
/// places. The accumulation itself always runs at full precision.
pub(crate) fn annotate(
	nodes: &[SortedNgramCount],
	sibling_total: usize,
	summary_mode: bool,
) -> Vec<NgramSummaryNode> {
	let group = if summary_mode && nodes.len() > SUMMARY_SIZE {
		&nodes[..SUMMARY_SIZE]
	} else {
		nodes
	};

	let mut cumulative = 0.0_f64;
	let mut annotated = Vec::with_capacity(group.len());
	for node in group {
		let probability = node.count as f64 / sibling_total as f64;
		cumulative = (cumulative + probability).min(1.0);

		let (prob, cumprob) = if summary_mode {
			(round3(probability), round3(cumulative))
		} else {
			(probability, cumulative)
		};

		annotated.push(NgramSummaryNode {
			token: node.token.clone(),
			count: node.count,
			prob,
			cumprob,
			next: annotate(&node.next, node.count, summary_mode),
		});
	}
	annotated
}

fn round3(value: f64) -> f64 {
	(value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sorted(token: &str, count: usize, next: Vec<SortedNgramCount>) -> SortedNgramCount {
		SortedNgramCount { token: token.to_owned(), count, next }
	}

	#[test]
	fn probabilities_are_relative_to_the_sibling_group() {
		let group = vec![sorted("a", 3, vec![]), sorted("b", 1, vec![])];
		let annotated = annotate(&group, 4, false);

		assert!((annotated[0].prob - 0.75).abs() < 1e-12);
		assert!((annotated[0].cumprob - 0.75).abs() < 1e-12);
		assert!((annotated[1].prob - 0.25).abs() < 1e-12);
		assert!((annotated[1].cumprob - 1.0).abs() < 1e-12);
	}

	#[test]
	fn children_use_their_parents_count_as_denominator() {
		let group = vec![sorted(
			"head",
			4,
			vec![sorted("tail-a", 3, vec![]), sorted("tail-b", 1, vec![])],
		)];
		// Root denominator is deliberately larger than the head count
		let annotated = annotate(&group, 8, false);

		assert!((annotated[0].prob - 0.5).abs() < 1e-12);
		assert!((annotated[0].next[0].prob - 0.75).abs() < 1e-12);
		assert!((annotated[0].next[1].cumprob - 1.0).abs() < 1e-12);
	}

	#[test]
	fn cumulative_probability_never_exceeds_one() {
		let group: Vec<SortedNgramCount> =
			(0..100).map(|i| sorted(&format!("t{i}"), 1, vec![])).collect();
		let annotated = annotate(&group, 100, false);

		for node in &annotated {
			assert!(node.cumprob <= 1.0);
		}
		assert!((annotated.last().unwrap().cumprob - 1.0).abs() < 1e-9);
	}

	#[test]
	fn summary_mode_truncates_each_group_to_fifteen() {
		let group: Vec<SortedNgramCount> =
			(0..20usize).map(|i| sorted(&format!("t{i}"), 20 - i, vec![])).collect();

		let full = annotate(&group, 100, false);
		assert_eq!(full.len(), 20);

		let summary = annotate(&group, 100, true);
		assert_eq!(summary.len(), SUMMARY_SIZE);
		assert_eq!(summary[0].token, "t0");
		assert_eq!(summary[SUMMARY_SIZE - 1].token, "t14");
	}

	#[test]
	fn summary_mode_rounds_to_three_decimal_places() {
		let group = vec![sorted("a", 1, vec![]), sorted("b", 1, vec![]), sorted("c", 1, vec![])];
		let summary = annotate(&group, 3, true);

		// 1/3 rounds to 0.333, 2/3 to 0.667
		assert_eq!(summary[0].prob, 0.333);
		assert_eq!(summary[0].cumprob, 0.333);
		assert_eq!(summary[1].cumprob, 0.667);
		assert_eq!(summary[2].cumprob, 1.0);
	}
}
