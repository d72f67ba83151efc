//! A single configured theater and its memoized movie list.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{Span, debug, error, info, info_span};

use crate::config::TheaterConfig;
use crate::extract::TitleExtractor;
use crate::fetch::SourceProvider;
use crate::filter::{MovieFilter, filter_titles};
use crate::normalize::normalize_title;
use crate::parse::Document;
use crate::store::{BlobStore, TheaterRecord};
use crate::Result;

/// Whether a theater has produced its movie list yet.
///
/// A computed list may be empty: the site listed nothing, the filter
/// excluded everything, or the markup no longer matched the configuration.
/// None of those trigger another fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MovieCache {
    #[default]
    Uncomputed,
    Computed(Vec<String>),
}

impl MovieCache {
    pub fn is_computed(&self) -> bool {
        matches!(self, MovieCache::Computed(_))
    }

    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            MovieCache::Uncomputed => None,
            MovieCache::Computed(movies) => Some(movies),
        }
    }
}

/// One theater site: its configuration, interest filter and cached titles.
///
/// # Example
///
/// ```rust
/// use marquee_core::{FileSource, Theater, TheaterConfig};
///
/// let dir = tempfile::TempDir::new().unwrap();
/// let page = dir.path().join("page.html");
/// std::fs::write(&page, "<ul><li>Brazil</li><li> Alien</li></ul>").unwrap();
///
/// let config = TheaterConfig::new(page.to_str().unwrap(), "Test Theater", "ul > li");
/// let mut theater = Theater::new(config).unwrap();
/// assert_eq!(theater.movies(&FileSource).unwrap(), ["Alien", "Brazil"]);
/// ```
#[derive(Debug, Clone)]
pub struct Theater {
    config: TheaterConfig,
    extractor: TitleExtractor,
    movie_filter: MovieFilter,
    cache: MovieCache,
    span: Span,
}

impl Theater {
    /// Builds a theater from its configuration.
    ///
    /// # Errors
    ///
    /// Malformed configuration is reported here rather than on first use:
    /// a blank required field, an invalid selector, or an invalid pattern.
    pub fn new(config: TheaterConfig) -> Result<Self> {
        config.validate()?;
        let extractor = TitleExtractor::new(&config.list_selector, config.text_search.as_deref())?;
        let span = info_span!("theater", name = %config.theater_name);

        Ok(Self { config, extractor, movie_filter: MovieFilter::new(), cache: MovieCache::Uncomputed, span })
    }

    pub fn config(&self) -> &TheaterConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.theater_name
    }

    pub fn site_url(&self) -> &str {
        &self.config.site_url
    }

    pub fn list_selector(&self) -> &str {
        &self.config.list_selector
    }

    pub fn text_search(&self) -> Option<&str> {
        self.config.text_search.as_deref()
    }

    pub fn movie_filter(&self) -> &MovieFilter {
        &self.movie_filter
    }

    /// Replaces the interest filter used the next time titles are produced.
    ///
    /// An already computed list is left as it is.
    pub fn set_movie_filter(&mut self, filter: MovieFilter) {
        self.movie_filter = filter;
    }

    /// The cached list, if one has been produced.
    pub fn cached_movies(&self) -> Option<&[String]> {
        self.cache.as_slice()
    }

    pub fn cache(&self) -> &MovieCache {
        &self.cache
    }

    /// Forgets the cached list so the next [`Theater::movies`] call fetches again.
    pub fn clear_cache(&mut self) {
        self.cache = MovieCache::Uncomputed;
    }

    /// Returns the theater's sorted, normalized titles.
    ///
    /// The first call fetches the page from `source` and extracts titles;
    /// later calls return the cached list without touching `source`.
    ///
    /// A selector or pattern that no longer matches the page is logged and
    /// produces an empty list. Failures to reach the page are returned.
    pub fn movies<S: SourceProvider + ?Sized>(&mut self, source: &S) -> Result<&[String]> {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.cache.is_computed() {
            debug!("skipping movie list generation, already cached");
        } else {
            let movies = self.generate(source)?;
            self.cache = MovieCache::Computed(movies);
        }

        Ok(self.cache.as_slice().unwrap_or_default())
    }

    fn generate<S: SourceProvider + ?Sized>(&self, source: &S) -> Result<Vec<String>> {
        info!(url = %self.config.site_url, "generating movie list");

        let html = source.fetch(&self.config.site_url)?;
        let document = Document::parse(&html)?;

        let raw = match self.extractor.extract(&document) {
            Ok(titles) => titles,
            Err(e) => {
                error!(error = %e, "error retrieving data for {} -- check configuration", self.config.theater_name);
                Vec::new()
            }
        };
        let unique: Vec<String> = raw.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        debug!(?unique, "extracted titles");

        let kept = if self.movie_filter.is_empty() {
            debug!("no user filter");
            unique
        } else {
            let filtered = filter_titles(&unique, &self.movie_filter);
            debug!(filter = ?self.movie_filter, ?filtered, "applied user filter");
            filtered
        };

        let titles: BTreeSet<String> = kept.iter().map(|title| normalize_title(title)).collect();
        Ok(titles.into_iter().collect())
    }

    /// Snapshot of the full state.
    pub fn to_record(&self) -> TheaterRecord {
        TheaterRecord::new(
            self.config.clone(),
            self.movie_filter.clone(),
            self.cache.as_slice().map(<[String]>::to_vec),
        )
    }

    /// Rebuilds a theater from a snapshot, cached list included.
    pub fn from_record(record: TheaterRecord) -> Result<Self> {
        record.check_version()?;
        let mut theater = Self::new(record.config)?;
        theater.movie_filter = record.movie_filter;
        theater.cache = match record.movies {
            Some(movies) => MovieCache::Computed(movies),
            None => MovieCache::Uncomputed,
        };
        Ok(theater)
    }

    pub fn save<B: BlobStore + ?Sized>(&self, store: &B, location: &Path) -> Result<()> {
        debug!(theater = %self.config.theater_name, location = %location.display(), "saving theater");
        store.save(&self.to_record(), location)
    }

    pub fn load<B: BlobStore + ?Sized>(store: &B, location: &Path) -> Result<Self> {
        debug!(location = %location.display(), "loading theater");
        Self::from_record(store.load(location)?)
    }
}

impl PartialEq for Theater {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.movie_filter == other.movie_filter && self.cache == other.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarqueeError;
    use crate::store::JsonStore;
    use std::cell::Cell;
    use std::collections::HashMap;
    use tempfile::TempDir;

    const SELECTOR: &str = "div.test_1 > div#test_2 > span";

    /// Serves fixed pages and counts fetches.
    #[derive(Default)]
    struct PageSource {
        pages: HashMap<String, String>,
        fetches: Cell<usize>,
    }

    impl PageSource {
        fn with_page(locator: &str, html: &str) -> Self {
            let mut pages = HashMap::new();
            pages.insert(locator.to_string(), html.to_string());
            Self { pages, fetches: Cell::new(0) }
        }
    }

    impl SourceProvider for PageSource {
        fn fetch(&self, locator: &str) -> Result<String> {
            self.fetches.set(self.fetches.get() + 1);
            self.pages
                .get(locator)
                .cloned()
                .ok_or_else(|| MarqueeError::FileNotFound(locator.into()))
        }
    }

    fn test_theater(text_search: Option<&str>) -> Theater {
        let mut config = TheaterConfig::new("http://testtheatersite.com/", "Test Theater", SELECTOR);
        config.text_search = text_search.map(str::to_string);
        Theater::new(config).unwrap()
    }

    fn listing(spans: &str) -> String {
        format!(r#"<html><body><div class="test_1"><div id="test_2">{}</div></div></body></html>"#, spans)
    }

    #[test]
    fn test_init() {
        let theater = test_theater(Some("Test (.+)$"));

        assert_eq!(theater.site_url(), "http://testtheatersite.com/");
        assert_eq!(theater.name(), "Test Theater");
        assert_eq!(theater.list_selector(), SELECTOR);
        assert_eq!(theater.text_search(), Some("Test (.+)$"));
        assert!(theater.movie_filter().is_empty());
        assert!(!theater.cache().is_computed());
    }

    #[test]
    fn test_movies_sorted_normalized_and_deduplicated() {
        let source = PageSource::with_page(
            "http://testtheatersite.com/",
            &listing("<span>Zardoz</span><span> Alien</span><span>Zardoz</span><span>Alien</span>"),
        );
        let mut theater = test_theater(None);

        assert_eq!(theater.movies(&source).unwrap(), ["Alien", "Zardoz"]);
    }

    #[test]
    fn test_titles_equal_after_normalization_listed_once() {
        let source = PageSource::with_page(
            "http://testtheatersite.com/",
            &listing("<span>*Alien*</span><span>Alien // 9:30pm</span><span>Brazil</span>"),
        );
        let mut theater = test_theater(None);

        assert_eq!(theater.movies(&source).unwrap(), ["Alien", "Brazil"]);
    }

    #[test]
    fn test_movies_fetched_once() {
        let source = PageSource::with_page("http://testtheatersite.com/", &listing("<span>Alien</span>"));
        let mut theater = test_theater(None);

        let first = theater.movies(&source).unwrap().to_vec();
        let second = theater.movies(&source).unwrap().to_vec();

        assert_eq!(first, second);
        assert_eq!(source.fetches.get(), 1);
    }

    #[test]
    fn test_empty_result_is_cached() {
        let source = PageSource::with_page("http://testtheatersite.com/", &listing("<span>Alien</span>"));
        let mut theater = test_theater(None);
        theater.set_movie_filter(["Brazil"].into_iter().collect());

        assert!(theater.movies(&source).unwrap().is_empty());
        assert!(theater.movies(&source).unwrap().is_empty());
        assert_eq!(source.fetches.get(), 1);
        assert_eq!(theater.cached_movies(), Some(&[][..]));
    }

    #[test]
    fn test_filter_applied() {
        let source = PageSource::with_page(
            "http://testtheatersite.com/",
            &listing("<span>A movie</span><span>Another movie</span><span>The Apostrophe\u{2019}s Movie</span>"),
        );
        let mut theater = test_theater(None);
        theater.set_movie_filter(["other", "Movie"].into_iter().collect());

        assert_eq!(theater.movies(&source).unwrap(), ["Another movie", "The Apostrophe's Movie"]);
    }

    #[test]
    fn test_text_search_theater() {
        let source = PageSource::with_page(
            "http://testtheatersite.com/",
            &listing("<span>Now Playing: Brazil // 7pm, Alien\u{2019}s Return</span>"),
        );
        let mut theater = test_theater(Some("Now Playing: (.+)$"));

        assert_eq!(theater.movies(&source).unwrap(), ["Alien's Return", "Brazil"]);
    }

    #[test]
    fn test_markup_mismatch_degrades_to_empty() {
        let source = PageSource::with_page("http://testtheatersite.com/", "<p>Site redesigned</p>");
        let mut theater = test_theater(None);

        assert!(theater.movies(&source).unwrap().is_empty());
        assert!(theater.cache().is_computed());
    }

    #[test]
    fn test_pattern_mismatch_degrades_to_empty() {
        let source = PageSource::with_page("http://testtheatersite.com/", &listing("<span>Closed today</span>"));
        let mut theater = test_theater(Some("Now Playing: (.+)$"));

        assert!(theater.movies(&source).unwrap().is_empty());
    }

    #[test]
    fn test_transport_failure_propagates() {
        let source = PageSource::default();
        let mut theater = test_theater(None);

        assert!(matches!(theater.movies(&source), Err(MarqueeError::FileNotFound(_))));
        assert!(!theater.cache().is_computed());
    }

    #[test]
    fn test_clear_cache_refetches() {
        let source = PageSource::with_page("http://testtheatersite.com/", &listing("<span>Alien</span>"));
        let mut theater = test_theater(None);

        theater.movies(&source).unwrap();
        theater.clear_cache();
        theater.movies(&source).unwrap();

        assert_eq!(source.fetches.get(), 2);
    }

    #[test]
    fn test_malformed_configuration() {
        let blank = TheaterConfig::new("", "Test Theater", SELECTOR);
        assert!(matches!(Theater::new(blank), Err(MarqueeError::MissingField("site_url"))));

        let bad_selector = TheaterConfig::new("page.html", "Test Theater", "div >> [");
        assert!(matches!(Theater::new(bad_selector), Err(MarqueeError::InvalidSelector { .. })));

        let bad_pattern = TheaterConfig::new("page.html", "Test Theater", SELECTOR).with_text_search("no group");
        assert!(matches!(Theater::new(bad_pattern), Err(MarqueeError::InvalidPattern { .. })));
    }

    #[test]
    fn test_each_theater_has_its_own_filter() {
        let mut first = test_theater(None);
        let second = test_theater(None);
        first.set_movie_filter(["Alien"].into_iter().collect());

        assert!(second.movie_filter().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test-theater.json");
        let source = PageSource::with_page("http://testtheatersite.com/", &listing("<span>Now Playing: Alien</span>"));
        let mut theater = test_theater(Some("Now Playing: (.+)$"));
        theater.movies(&source).unwrap();

        theater.save(&JsonStore, &path).unwrap();
        let mut loaded = Theater::load(&JsonStore, &path).unwrap();

        assert_eq!(loaded, theater);
        assert_eq!(loaded.site_url(), "http://testtheatersite.com/");
        assert_eq!(loaded.text_search(), Some("Now Playing: (.+)$"));
        assert_eq!(loaded.movies(&source).unwrap(), ["Alien"]);
        assert_eq!(source.fetches.get(), 1);
    }

    #[test]
    fn test_load_uncomputed_theater() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test-theater.json");
        let theater = test_theater(None);

        theater.save(&JsonStore, &path).unwrap();
        let loaded = Theater::load(&JsonStore, &path).unwrap();

        assert_eq!(loaded.cached_movies(), None);
    }
}
