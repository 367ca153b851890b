//! Display-text normalization applied to user input before it reaches the model.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+").expect("valid word regex"));

/// Signature of a title/name normalizer pluggable into the store config.
pub type Normalizer = fn(&str) -> String;

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// Non-word characters (spaces, punctuation) are kept as-is.
pub fn capitalize_words(text: &str) -> String {
    WORD_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .into_owned()
}

/// Leaves input unchanged. Useful for hosts that normalize upstream.
pub fn identity(text: &str) -> String {
    text.to_string()
}
