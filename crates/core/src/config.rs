//! Theater configuration records and the files that hold them.
//!
//! A configuration file is a JSON document with a single `theaters` array:
//!
//! ```json
//! {
//!   "theaters": [
//!     {
//!       "site_url": "http://laketheatercafe.com/",
//!       "theater_name": "Lake Theater",
//!       "list_selector": "section#nowplaying p > span",
//!       "text_search": "Now Playing: (.+)$"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{MarqueeError, Result};

/// Declarative description of one theater site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterConfig {
    /// HTTP(S) URL or local file path of the listing page.
    pub site_url: String,
    /// Display name.
    pub theater_name: String,
    /// CSS selector for the nodes carrying titles.
    pub list_selector: String,
    /// Optional pattern whose first capture holds a `, ` separated title list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_search: Option<String>,
}

impl TheaterConfig {
    pub fn new(site_url: impl Into<String>, theater_name: impl Into<String>, list_selector: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            theater_name: theater_name.into(),
            list_selector: list_selector.into(),
            text_search: None,
        }
    }

    pub fn with_text_search(mut self, pattern: impl Into<String>) -> Self {
        self.text_search = Some(pattern.into());
        self
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<()> {
        if self.site_url.trim().is_empty() {
            return Err(MarqueeError::MissingField("site_url"));
        }
        if self.theater_name.trim().is_empty() {
            return Err(MarqueeError::MissingField("theater_name"));
        }
        if self.list_selector.trim().is_empty() {
            return Err(MarqueeError::MissingField("list_selector"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TheaterFile {
    theaters: Vec<TheaterConfig>,
}

/// Parses a configuration document from a string.
pub fn parse_theater_configs(content: &str) -> Result<Vec<TheaterConfig>> {
    let file: TheaterFile = serde_json::from_str(content).map_err(|e| MarqueeError::ConfigError(e.to_string()))?;
    Ok(file.theaters)
}

/// Reads a configuration file.
pub fn load_theater_configs<P: AsRef<Path>>(path: P) -> Result<Vec<TheaterConfig>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| MarqueeError::ConfigError(format!("Cannot open file {}: {}", path.display(), e)))?;

    let file: TheaterFile = serde_json::from_str(&content)
        .map_err(|e| MarqueeError::ConfigError(format!("{}: {}", path.display(), e)))?;
    Ok(file.theaters)
}

/// Writes a configuration file.
pub fn save_theater_configs<P: AsRef<Path>>(path: P, theaters: &[TheaterConfig]) -> Result<()> {
    let file = TheaterFile { theaters: theaters.to_vec() };
    let content = serde_json::to_string_pretty(&file)?;
    fs::write(path, content)?;
    Ok(())
}

/// Default configuration file location (~/.config/marquee/theaters.json)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("marquee").join("theaters.json"))
}

/// The built-in Portland-area theaters.
pub fn default_theaters() -> Vec<TheaterConfig> {
    vec![
        TheaterConfig::new(
            "http://laurelhursttheater.com/",
            "Laurelhurst",
            "div.movieListing_titleContainer > span.movieListing_title > a",
        ),
        TheaterConfig::new(
            "http://laketheatercafe.com/",
            "Lake Theater",
            "section#nowplaying > div.section-inner > div.section-content > p > span",
        )
        .with_text_search("Now Playing: (.+)$"),
        TheaterConfig::new(
            "http://www.academytheaterpdx.com/",
            "Academy Theater",
            "div.now_playing > section.board > ul > li > a",
        ),
        TheaterConfig::new(
            "http://pdx.livingroomtheaters.com/",
            "Living Room Theaters",
            "ul.movie_titles > li > a",
        ),
        TheaterConfig::new(
            "http://www.wunderlandgames.com/gettimes.asp?house=3054",
            "Milwaukie Wunderland Cinema",
            "a.a1title > b",
        ),
        // "Conent" is the site's own spelling.
        TheaterConfig::new(
            "https://ticketing.us.veezi.com/sessions/?siteToken=v0v9bscth4zdgv6ezczt5ecsjm",
            "Moreland Theater",
            "div#sessionsByFilmConent > div.film > div > h3.title",
        ),
    ]
}
