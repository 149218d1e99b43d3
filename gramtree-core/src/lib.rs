//! N-gram frequency and probability tree library.
//!
//! This crate turns batches of raw text into nested n-gram frequency
//! structures, including:
//! - A fixed tokenizer with sentence-boundary and contraction handling
//! - A recursive frequency-counting trie with batch merging
//! - A descending-by-count sorted view of the trie
//! - Probability-annotated views: a full-precision lookup table and a
//!   bounded, rounded summary for display
//!
//! The whole pipeline is pure computation: no I/O, no shared state, no
//! background work. Each call builds its structures from scratch.

/// Core n-gram counting and derived views.
///
/// This module exposes the counting pipeline while keeping the internal
/// trie representation private.
pub mod model;
