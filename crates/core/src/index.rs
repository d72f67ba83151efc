//! The aggregate index: movie title to the theaters showing it.
//!
//! Titles are merged by exact string equality after normalization, so two
//! theaters spelling a film differently produce two entries.

use std::collections::BTreeMap;
use std::fmt;

use crate::theater_list::TheaterListing;

/// Width of the title column in the rendered listing.
pub const TITLE_COLUMN_WIDTH: usize = 40;

/// Movie title to theater names, iterated in title order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl MovieIndex {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Appends `theater_name` to the entry of every title.
    ///
    /// Theater names accumulate in the order theaters are inserted.
    pub fn insert<S: AsRef<str>>(&mut self, theater_name: &str, titles: &[S]) {
        for title in titles {
            self.entries
                .entry(title.as_ref().to_string())
                .or_default()
                .push(theater_name.to_string());
        }
    }

    pub fn from_listings(listings: &[TheaterListing]) -> Self {
        let mut index = Self::new();
        for listing in listings {
            index.insert(&listing.theater_name, &listing.movies);
        }
        index
    }

    /// Theaters showing `title`, if any.
    pub fn theaters_for(&self, title: &str) -> Option<&[String]> {
        self.entries.get(title).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(title, theaters)| (title.as_str(), theaters.as_slice()))
    }
}

/// Renders a single index line: padded title, then comma joined theater names.
pub fn render_line(title: &str, theaters: &[String]) -> String {
    format!("{:<width$} {}", title, theaters.join(", "), width = TITLE_COLUMN_WIDTH)
}

impl fmt::Display for MovieIndex {
    /// Blank line, one line per title, blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (title, theaters) in self.iter() {
            writeln!(f, "{}", render_line(title, theaters))?;
        }
        writeln!(f)
    }
}
