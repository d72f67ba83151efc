//! The user's interest filter.
//!
//! A [`MovieFilter`] is a set of literal, case-sensitive substrings. A title is
//! of interest when it contains at least one of them. An empty filter matches
//! nothing; callers that treat "no interests" as "keep everything" check
//! [`MovieFilter::is_empty`] first, as [`crate::Theater`] does.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of interest strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieFilter {
    interests: BTreeSet<String>,
}

impl MovieFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self { interests: BTreeSet::new() }
    }

    /// Add one interest string.
    pub fn add(&mut self, interest: impl Into<String>) {
        self.interests.insert(interest.into());
    }

    /// Remove the given interest strings, ignoring any that are absent.
    pub fn remove<I, S>(&mut self, interests: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for interest in interests {
            self.interests.remove(interest.as_ref());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.interests.len()
    }

    /// Iterate the interest strings in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.interests.iter().map(String::as_str)
    }

    /// Whether `title` contains any interest string.
    pub fn matches(&self, title: &str) -> bool {
        self.interests.iter().any(|interest| title.contains(interest.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for MovieFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { interests: iter.into_iter().map(Into::into).collect() }
    }
}

impl<S: Into<String>> Extend<S> for MovieFilter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.interests.extend(iter.into_iter().map(Into::into));
    }
}

/// Keeps the titles matching `filter`, preserving their order.
///
/// # Example
///
/// ```rust
/// use marquee_core::{MovieFilter, filter_titles};
///
/// let titles = ["A movie", "Another movie", "The Apostrophe's Movie"];
/// let filter: MovieFilter = ["other", "Movie"].into_iter().collect();
/// assert_eq!(filter_titles(&titles, &filter), vec!["Another movie", "The Apostrophe's Movie"]);
/// ```
pub fn filter_titles<S: AsRef<str>>(titles: &[S], filter: &MovieFilter) -> Vec<String> {
    titles
        .iter()
        .map(AsRef::as_ref)
        .filter(|title| filter.matches(title))
        .map(str::to_string)
        .collect()
}
