//! Per-word converters and parameter metadata helpers.
//!
//! A builder calls its value converter and its IBL converter once for every search word. The
//! functions here are the built-in choices.

use std::sync::LazyLock;

use regex::Regex;

/// Boolean-mode operator characters, `@N` distance markers and backslash runs.
static IBL_METACHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[><~"+]+|@[0-9]+|\\+"#).expect("static pattern"));

/// Runs of wildcard markers.
static WILDCARD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*+").expect("static pattern"));

/// Binds the search word unchanged. The default value converter.
pub fn identity_value(word: &str) -> String {
    word.to_owned()
}

/// Converts a search word into a pattern for the SQL `LIKE` operator.
///
/// Escapes `\`, `%` and `_` with a backslash, turns the `*` wildcard into `%` and wraps the
/// result in `%...%` so the word matches anywhere in the column.
pub fn like_value(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    out.push('%');
    for ch in word.chars() {
        match ch {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '*' => out.push('%'),
            _ => out.push(ch),
        }
    }
    out.push('%');
    out
}

/// Removes characters that carry meaning in boolean-mode full-text syntax. The default IBL
/// converter.
pub fn strip_ibl(word: &str) -> String {
    IBL_METACHARACTERS.replace_all(word, "").into_owned()
}

/// Splits a word on wildcard runs, keeping empty fragments at the edges.
pub(crate) fn split_wildcards(word: &str) -> Vec<String> {
    WILDCARD_RUN.split(word).map(String::from).collect()
}

/// Repeats `type_tag` once for every bound parameter.
///
/// `count` is the number of values a build produced and `multiplier` the number of
/// placeholders the template has per word. Useful for drivers that take parameter types as a
/// separate array.
///
/// Returns None when `count * multiplier` overflows or the list cannot be allocated.
pub fn replicate_data_type<T: Clone>(
    count: usize,
    type_tag: T,
    multiplier: usize,
) -> Option<Vec<T>> {
    let len = count.checked_mul(multiplier)?;
    let mut tags = Vec::new();
    tags.try_reserve_exact(len).ok()?;
    tags.resize(len, type_tag);
    Some(tags)
}
