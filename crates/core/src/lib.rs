pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod parse;
pub mod store;
pub mod theater;
pub mod theater_list;

pub use config::{
    TheaterConfig, default_config_path, default_theaters, load_theater_configs, parse_theater_configs,
    save_theater_configs,
};
pub use error::{ExtractError, MarqueeError, Result};
pub use extract::{TITLE_SEPARATOR, TitleExtractor, extract_titles};
pub use fetch::{FetchConfig, FileSource, SourceProvider, fetch_file, is_remote};
#[cfg(feature = "fetch")]
pub use fetch::{WebSource, fetch_url};
pub use filter::{MovieFilter, filter_titles};
pub use index::{MovieIndex, TITLE_COLUMN_WIDTH, render_line};
pub use normalize::{normalize_title, normalize_titles};
pub use parse::{Document, Element};
pub use store::{BlobStore, JsonStore, RECORD_VERSION, TheaterRecord};
pub use theater::{MovieCache, Theater};
pub use theater_list::{TheaterList, TheaterListing};
