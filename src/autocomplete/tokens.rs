// file: src/autocomplete/tokens.rs
// description: word and phrase extraction for suggestion candidates
// reference: https://docs.rs/regex

use crate::search::Matcher;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // anything that is not a letter or digit in any script
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}]").expect("NON_WORD regex is valid");
}

/// Phrase windows span this many tokens.
pub const PHRASE_MIN_TOKENS: usize = 2;
pub const PHRASE_MAX_TOKENS: usize = 4;

/// Strip punctuation and symbols, keeping letters and digits.
pub fn clean_token(raw: &str) -> String {
    NON_WORD.replace_all(raw, "").into_owned()
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(clean_token)
        .filter(|token| !token.is_empty())
}

/// Whitespace tokens of at least `min_chars` characters that contain the query.
pub fn extract_tokens(text: &str, matcher: &dyn Matcher, min_chars: usize) -> Vec<String> {
    words(text)
        .filter(|token| token.chars().count() >= min_chars && matcher.is_match(token))
        .collect()
}

/// Forward windows of 2 to 4 tokens starting at every token that contains the
/// query.
pub fn extract_phrases(text: &str, matcher: &dyn Matcher) -> Vec<String> {
    let tokens: Vec<String> = words(text).collect();
    let mut phrases = Vec::new();

    for (start, token) in tokens.iter().enumerate() {
        if !matcher.is_match(token) {
            continue;
        }
        for size in PHRASE_MIN_TOKENS..=PHRASE_MAX_TOKENS {
            match tokens.get(start..start + size) {
                Some(window) => phrases.push(window.join(" ")),
                None => break,
            }
        }
    }

    phrases
}
