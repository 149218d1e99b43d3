//! Top-level module for the n-gram counting system.
//!
//! This crate provides a multi-level n-gram frequency counter, including:
//! - Text tokenization and normalization (`tokenizer`)
//! - The frequency-counting trie and pipeline entry point (`counts`)
//! - The descending-sorted view (`sorted`)
//! - Probability annotation and the bounded summary view (`probabilities`)
//! - The token-keyed lookup table (`lookup`)

/// Tokenizer and normalizer.
///
/// Turns raw input strings into flat token sequences, applying fixed
/// sentence-boundary and contraction substitution rules.
pub mod tokenizer;

/// The frequency-counting trie (`NgramCounts`) and the `count_ngrams`
/// pipeline entry point.
///
/// Handles window accumulation across a batch of inputs, merging of
/// counters, and derivation of the final `NgramData` result.
pub mod counts;

/// Descending-by-count sorted view of the counting trie.
///
/// Pure recursive transform; never mutates the trie it reads.
pub mod sorted;

/// Probability annotation of sorted sibling groups.
///
/// Computes per-node and cumulative probabilities, with an optional
/// bounded-and-rounded summary mode for display.
pub mod probabilities;

/// Token-keyed lookup table.
///
/// Mirrors the trie shape for point queries, with ranked full-precision
/// leaf arrays at the final level.
pub mod lookup;
