use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a lowercase letter, digit, whitespace or hyphen.
static NON_TOKEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static token pattern"));

/// Tokens this short carry no signal ("a", "to", "js").
const MIN_TOKEN_LEN: usize = 3;

/// Normalize free text into matchable tokens.
///
/// Lowercases, blanks out punctuation (hyphens survive, so slugs stay whole),
/// splits on whitespace and drops tokens shorter than three characters. Order
/// and duplicates are preserved.
#[must_use]
pub fn normalize_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_TOKEN_CHARS.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
