//! An ordered collection of theaters.

use std::fmt;

use crate::Result;
use crate::config::TheaterConfig;
use crate::fetch::SourceProvider;
use crate::filter::MovieFilter;
use crate::theater::Theater;

/// One theater's titles, as produced by [`TheaterList::movies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheaterListing {
    pub theater_name: String,
    pub movies: Vec<String>,
}

impl fmt::Display for TheaterListing {
    /// Theater name followed by one indented line per title.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.theater_name)?;
        for movie in &self.movies {
            write!(f, "\n    {}", movie)?;
        }
        Ok(())
    }
}

/// Theaters in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TheaterList {
    theaters: Vec<Theater>,
}

impl TheaterList {
    pub fn new(theaters: Vec<Theater>) -> Self {
        Self { theaters }
    }

    /// Builds one theater per configuration record, failing on the first malformed one.
    pub fn from_configs<I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = TheaterConfig>,
    {
        let theaters = configs.into_iter().map(Theater::new).collect::<Result<Vec<_>>>()?;
        Ok(Self { theaters })
    }

    pub fn add_theater(&mut self, theater: Theater) {
        self.theaters.push(theater);
    }

    /// Removes the first theater with this name, keeping the others in order.
    pub fn remove_theater(&mut self, theater_name: &str) -> Option<Theater> {
        let index = self.theaters.iter().position(|t| t.name() == theater_name)?;
        Some(self.theaters.remove(index))
    }

    /// Theater names in list order.
    pub fn list_theaters(&self) -> Vec<String> {
        self.theaters.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.theaters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theaters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Theater> {
        self.theaters.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Theater> {
        self.theaters.iter_mut()
    }

    /// Gives every theater its own copy of `filter`.
    pub fn set_movie_filter(&mut self, filter: &MovieFilter) {
        for theater in &mut self.theaters {
            theater.set_movie_filter(filter.clone());
        }
    }

    /// Each theater's titles, in list order.
    ///
    /// Theaters are visited one at a time. The first unreachable source
    /// aborts the walk and its error is returned; theaters already visited
    /// keep their cached lists.
    pub fn movies<S: SourceProvider + ?Sized>(&mut self, source: &S) -> Result<Vec<TheaterListing>> {
        let mut listings = Vec::with_capacity(self.theaters.len());
        for theater in &mut self.theaters {
            let movies = theater.movies(source)?.to_vec();
            listings.push(TheaterListing { theater_name: theater.name().to_string(), movies });
        }
        Ok(listings)
    }
}

impl From<Vec<Theater>> for TheaterList {
    fn from(theaters: Vec<Theater>) -> Self {
        Self::new(theaters)
    }
}

impl<'a> IntoIterator for &'a TheaterList {
    type Item = &'a Theater;
    type IntoIter = std::slice::Iter<'a, Theater>;

    fn into_iter(self) -> Self::IntoIter {
        self.theaters.iter()
    }
}

impl<'a> IntoIterator for &'a mut TheaterList {
    type Item = &'a mut Theater;
    type IntoIter = std::slice::IterMut<'a, Theater>;

    fn into_iter(self) -> Self::IntoIter {
        self.theaters.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarqueeError;

    struct OnePage(&'static str);

    impl SourceProvider for OnePage {
        fn fetch(&self, locator: &str) -> Result<String> {
            if locator == "listing.html" {
                Ok(self.0.to_string())
            } else {
                Err(MarqueeError::FileNotFound(locator.into()))
            }
        }
    }

    fn config(name: &str) -> TheaterConfig {
        TheaterConfig::new("listing.html", name, "ul > li")
    }

    #[test]
    fn test_from_configs_keeps_order() {
        let list = TheaterList::from_configs(vec![config("B"), config("A"), config("C")]).unwrap();
        assert_eq!(list.list_theaters(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_from_configs_rejects_malformed() {
        let result = TheaterList::from_configs(vec![config("A"), TheaterConfig::new("listing.html", "B", "")]);
        assert!(matches!(result, Err(MarqueeError::MissingField("list_selector"))));
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = TheaterList::from_configs(vec![config("A"), config("B"), config("C")]).unwrap();

        let removed = list.remove_theater("B").unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(list.list_theaters(), vec!["A", "C"]);

        list.add_theater(removed);
        assert_eq!(list.list_theaters(), vec!["A", "C", "B"]);
        assert!(list.remove_theater("Z").is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_movies_per_theater() {
        let source = OnePage("<ul><li>Brazil</li><li>Alien</li></ul>");
        let mut list = TheaterList::from_configs(vec![config("A"), config("B")]).unwrap();
        list.set_movie_filter(&["Alien"].into_iter().collect());

        let listings = list.movies(&source).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].theater_name, "A");
        assert_eq!(listings[1].movies, vec!["Alien"]);
    }

    #[test]
    fn test_movies_propagates_transport_failure() {
        let source = OnePage("<ul><li>Alien</li></ul>");
        let unreachable = TheaterConfig::new("missing.html", "B", "ul > li");
        let mut list = TheaterList::from_configs(vec![config("A"), unreachable]).unwrap();

        assert!(list.movies(&source).is_err());
        assert_eq!(list.iter().next().unwrap().cached_movies(), Some(&["Alien".to_string()][..]));
    }

    #[test]
    fn test_listing_display() {
        let listing = TheaterListing { theater_name: "A".to_string(), movies: vec!["Alien".to_string(), "Brazil".to_string()] };
        assert_eq!(listing.to_string(), "A\n    Alien\n    Brazil");
    }
}
