//! Saving and restoring theater state.
//!
//! State is written as a versioned [`TheaterRecord`]. The record holds the
//! four configuration fields at the top level, the interest filter, and the
//! cached title list (`null` until the theater has produced one):
//!
//! ```json
//! {
//!   "version": 1,
//!   "site_url": "http://laurelhursttheater.com/",
//!   "theater_name": "Laurelhurst",
//!   "list_selector": "span.movieListing_title > a",
//!   "movie_filter": [],
//!   "movies": ["Alien", "Brazil"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::TheaterConfig;
use crate::filter::MovieFilter;
use crate::{MarqueeError, Result};

/// Current revision of the record layout.
pub const RECORD_VERSION: u32 = 1;

/// Portable snapshot of a theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterRecord {
    pub version: u32,
    #[serde(flatten)]
    pub config: TheaterConfig,
    #[serde(default)]
    pub movie_filter: MovieFilter,
    #[serde(default)]
    pub movies: Option<Vec<String>>,
}

impl TheaterRecord {
    pub fn new(config: TheaterConfig, movie_filter: MovieFilter, movies: Option<Vec<String>>) -> Self {
        Self { version: RECORD_VERSION, config, movie_filter, movies }
    }

    /// Rejects records written by a newer revision.
    pub fn check_version(&self) -> Result<()> {
        if self.version > RECORD_VERSION {
            return Err(MarqueeError::UnsupportedRecordVersion { found: self.version, supported: RECORD_VERSION });
        }
        Ok(())
    }
}

/// Somewhere theater records can be written to and read back from.
pub trait BlobStore {
    fn save(&self, record: &TheaterRecord, location: &Path) -> Result<()>;
    fn load(&self, location: &Path) -> Result<TheaterRecord>;
}

/// Stores each record as a pretty-printed JSON file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl BlobStore for JsonStore {
    fn save(&self, record: &TheaterRecord, location: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(record)?;
        fs::write(location, content)?;
        Ok(())
    }

    fn load(&self, location: &Path) -> Result<TheaterRecord> {
        if !location.exists() {
            return Err(MarqueeError::FileNotFound(location.to_path_buf()));
        }
        let content = fs::read_to_string(location)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// File name used for a theater's record, derived from its name.
///
/// ```rust
/// use marquee_core::store::record_file_name;
///
/// assert_eq!(record_file_name("Milwaukie Wunderland Cinema"), "milwaukie-wunderland-cinema.json");
/// ```
pub fn record_file_name(theater_name: &str) -> String {
    let mut slug = String::with_capacity(theater_name.len());
    for ch in theater_name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    format!("{}.json", slug.trim_matches('-'))
}
