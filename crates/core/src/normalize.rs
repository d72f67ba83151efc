//! Title cleanup applied to every extracted movie title.
//!
//! Rules run in a fixed order, and the order is observable: an annotation that
//! itself ends in punctuation is removed after the trailing punctuation pass,
//! so it may leave a trailing non-word character behind.
//!
//! 1. strip a leading run of non-word characters
//! 2. strip a trailing run of non-word characters
//! 3. drop a `" //"` annotation and everything after it
//! 4. turn the right single quotation mark (U+2019) into an ASCII apostrophe

use regex::Regex;
use std::sync::LazyLock;

static LEADING_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\W+").unwrap());
static TRAILING_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+$").unwrap());
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s) //.*").unwrap());

const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Normalizes a single movie title.
///
/// # Example
///
/// ```rust
/// use marquee_core::normalize_title;
///
/// assert_eq!(normalize_title(" A movie"), "A movie");
/// assert_eq!(normalize_title("Another movie // with some following text"), "Another movie");
/// assert_eq!(normalize_title("The Apostrophe\u{2019}s Movie"), "The Apostrophe's Movie");
/// ```
pub fn normalize_title(title: &str) -> String {
    let title = LEADING_NON_WORD.replace(title, "");
    let title = TRAILING_NON_WORD.replace(&title, "");
    let title = ANNOTATION.replace(&title, "");
    title.replace(RIGHT_SINGLE_QUOTE, "'")
}

/// Normalizes every title, preserving order.
pub fn normalize_titles<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
    titles.iter().map(|t| normalize_title(t.as_ref())).collect()
}
