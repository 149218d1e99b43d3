use std::sync::LazyLock;

use regex::Regex;

/// Canonical token representing a sentence-ending punctuation mark
/// (`.`, `!` or `?`).
pub const STOP_TOKEN: &str = "<STOP>";

/// Placeholder substituted for sentence-ending punctuation before word
/// tokenization. Made of word characters only, so the word tokenizer
/// passes it through as a token of its own.
const PUNCTUATION_PLACEHOLDER: &str = "xxxxxSTOPxxxxx";

/// Placeholder with a leading space, so it is detached from the word it
/// terminates regardless of how the punctuation was spaced.
const PUNCTUATION_PLACEHOLDER_PATTERN: &str = " xxxxxSTOPxxxxx";

/// Rendered form of a free-standing `s` produced by apostrophe splitting
/// (e.g. "it's" tokenizes to "it" followed by "s").
const APOSTROPHE_S: &str = "'s";

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
	// Static pattern, cannot fail to compile
	Regex::new(r"[.!?]").unwrap()
});

static WORD_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[^\p{L}\p{N}_]+").unwrap()
});

/// Tokenizes an input string into a flat sequence of normalized tokens.
///
/// The returned tokens are the keys of every tree built downstream, so
/// the normalization rules are fixed:
/// - Every `.`, `!` or `?` becomes its own `<STOP>` token.
/// - Words are split on runs of non-word characters (anything that is
///   not a letter, digit or underscore), discarding the separators.
/// - A free-standing `s` left behind by apostrophe splitting is rendered
///   as `'s`.
///
/// Empty or whitespace-only input yields an empty list. Input consisting
/// solely of sentence punctuation yields one `<STOP>` per mark.
pub fn tokenize(input: &str) -> Vec<String> {
	let replaced = PUNCTUATION.replace_all(input, PUNCTUATION_PLACEHOLDER_PATTERN);

	let mut tokens = Vec::new();
	for word in WORD_SEPARATORS.split(&replaced) {
		if word.is_empty() {
			continue;
		}
		if word == "s" {
			tokens.push(APOSTROPHE_S.to_owned());
		} else if word == PUNCTUATION_PLACEHOLDER {
			tokens.push(STOP_TOKEN.to_owned());
		} else if let Some(remainder) = word.strip_prefix(PUNCTUATION_PLACEHOLDER) {
			// The tokenizer glued the placeholder to adjacent text
			// (e.g. "!3" becomes "xxxxxSTOPxxxxx3")
			tokens.push(STOP_TOKEN.to_owned());
			tokens.push(remainder.to_owned());
		} else {
			tokens.push(word.to_owned());
		}
	}
	tokens
}
