//! Token normalizer
//!
//! Pipeline, in this exact order:
//! 1. Unicode lowercase
//! 2. NFD decompose and drop combining marks (accents)
//! 3. Strip one trailing `,` else `...` else `..` else `.`
//! 4. Strip one leading `(` and, independently, one trailing `)`
//! 5. If an apostrophe remains, keep the last apostrophe-separated segment
//!    of at least `MIN_TOKEN_LEN` chars (unsplit if none qualifies)
//!
//! Normalization is total: any input yields a (possibly empty) token.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Shortest token that can be indexed or looked up
pub const MIN_TOKEN_LEN: usize = 3;

/// Trailing punctuation, in priority order; at most one is stripped
const TRAILING_PUNCTUATION: [&str; 4] = [",", "...", "..", "."];

/// Lowercase and strip diacritics
///
/// This is the comparison form for substring tests on whole field values.
/// No punctuation is removed.
///
/// # Example
///
/// ```
/// use pantry_search::normalize::fold;
///
/// assert_eq!(fold("Crème Pâtissière"), "creme patissiere");
/// ```
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Canonicalize one raw word into a comparable token
///
/// # Example
///
/// ```
/// use pantry_search::normalize::normalize;
///
/// assert_eq!(normalize("Crème,"), "creme");
/// assert_eq!(normalize("(chaud)"), "chaud");
/// assert_eq!(normalize("l'huile"), "huile");
/// ```
pub fn normalize(word: &str) -> String {
    let folded = fold(word);

    let mut token = strip_trailing_punctuation(&folded);
    token = token.strip_prefix('(').unwrap_or(token);
    token = token.strip_suffix(')').unwrap_or(token);

    if token.contains('\'') {
        // last qualifying segment wins
        let mut chosen = token;
        for segment in token.split('\'') {
            if char_len(segment) >= MIN_TOKEN_LEN {
                chosen = segment;
            }
        }
        token = chosen;
    }

    token.to_string()
}

/// Split text on whitespace and normalize every word
///
/// Empty tokens (words made only of stripped punctuation) are kept so
/// callers see one token per word.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(normalize).collect()
}

/// Length in chars, the unit every length rule is expressed in
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[inline]
fn strip_trailing_punctuation(token: &str) -> &str {
    TRAILING_PUNCTUATION
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token)
}
