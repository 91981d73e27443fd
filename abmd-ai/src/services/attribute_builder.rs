//! Shared attribute builder
//!
//! Shapes catalog book details into the album title and the attributes
//! shared by every track of the book (artists, series grouping, sort
//! name, identifiers).

use crate::config::AttributeOptions;
use crate::types::SharedAttributes;
use abmd_common::{Error, Result};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Catalog the attributes are sourced from
pub const DATA_SOURCE: &str = "Audible";

static SERIES_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d.\-]+").expect("series position pattern is valid"));

/// Series membership of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// Position as the catalog writes it ("8.5", "Book 2", "1-3"), if known
    #[serde(default)]
    pub position: Option<String>,
}

/// Book descriptor as decoded from the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDetails {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub narrators: Vec<String>,
    pub genres: Vec<String>,
    pub series: Option<Series>,
    pub summary: Option<String>,
    pub asin: Option<String>,
    pub region: Option<String>,
    pub album_url: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    /// "yyyy-mm-dd", optionally followed by a time
    pub release_date: Option<String>,
}

impl BookDetails {
    /// Parsed release date; None when absent or malformed
    pub fn release(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        match parse_release_date(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(title = %self.title, error = %e, "Ignoring release date");
                None
            }
        }
    }

    /// False only when the book has a release date after `today`
    pub fn is_released_by(&self, today: NaiveDate) -> bool {
        self.release().map_or(true, |date| date <= today)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Build the album title and shared attributes for a book
pub fn build_shared_attributes(
    book: &BookDetails,
    options: &AttributeOptions,
) -> (String, SharedAttributes) {
    let mut title = book.title.clone();
    let mut subtitle = book.subtitle.clone();
    let mut grouping = None;
    let series_position = book
        .series
        .as_ref()
        .and_then(|s| s.position.as_deref())
        .and_then(parse_series_position);

    let album_sort = match &book.series {
        Some(series) => {
            if let Some(position) = &series_position {
                let title_cruft = format!(", Book {}", position);
                if !options.keep_series_reference_in_title && title.ends_with(&title_cruft) {
                    debug!(cruft = %title_cruft, "Removing series reference from title");
                    title.truncate(title.len() - title_cruft.len());
                }
            }

            let mentions_series = subtitle.as_deref().is_some_and(|s| {
                let lowered = s.to_lowercase();
                lowered.contains(&series.name.to_lowercase()) && lowered.contains("book")
            });
            if !options.keep_series_reference_in_subtitle && mentions_series {
                debug!(subtitle = ?subtitle, "Subtitle only restates the series; dropping it");
                subtitle = None;
            }

            match &series_position {
                Some(position) => {
                    grouping = Some(format!("{}, Book #{}", series.name, position));
                    format!("{} {} - {}", series.name, position, title)
                }
                None => format!("{} - {}", series.name, title),
            }
        }
        None => match &subtitle {
            Some(subtitle) => format!("{} - {}", title, subtitle),
            None => title.clone(),
        },
    };

    let authors = book.authors.join(", ");
    let narrators = book.narrators.join(", ");
    let artist = if options.include_narrator_in_artists && !narrators.is_empty() {
        format!("{}, {}", authors, narrators)
    } else {
        authors.clone()
    };
    let release = book.release();

    let shared = SharedAttributes {
        artist: non_empty(artist),
        album_artist: non_empty(authors),
        composer: non_empty(narrators),
        genre: non_empty(book.genres.join("/")),
        grouping,
        album_sort: Some(album_sort),
        series_name: book.series.as_ref().map(|s| s.name.clone()),
        series_position,
        comments: book.summary.clone(),
        subtitle,
        asin: book.asin.clone(),
        catalognum: book.asin.clone(),
        album_url: book.album_url.clone(),
        region: book.region.clone(),
        data_source: Some(DATA_SOURCE.to_string()),
        language: book.language.clone(),
        label: book.publisher.clone(),
        year: release.map(|d| d.year()),
        month: release.map(|d| d.month()),
        day: release.map(|d| d.day()),
    };

    (title, shared)
}

/// First run of digits, dots and dashes in a raw series position
pub fn parse_series_position(raw: &str) -> Option<String> {
    SERIES_POSITION.find(raw).map(|m| m.as_str().to_string())
}

/// Parse the date part of a catalog release date
///
/// # Errors
/// `Error::Parse` if the first ten characters are not a `yyyy-mm-dd` date.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("Invalid release date '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookDetails {
        BookDetails {
            title: "The Way of Kings, Book 1".to_string(),
            subtitle: Some("The Stormlight Archive, Book 1".to_string()),
            authors: vec!["Brandon Sanderson".to_string()],
            narrators: vec!["Michael Kramer".to_string(), "Kate Reading".to_string()],
            genres: vec!["Fantasy".to_string(), "Epic".to_string()],
            series: Some(Series {
                name: "The Stormlight Archive".to_string(),
                position: Some("1".to_string()),
            }),
            asin: Some("B003P2WO5E".to_string()),
            release_date: Some("2010-08-31".to_string()),
            ..BookDetails::default()
        }
    }

    #[test]
    fn test_series_book_defaults() {
        let (title, shared) = build_shared_attributes(&book(), &AttributeOptions::default());
        assert_eq!(title, "The Way of Kings, Book 1");
        assert_eq!(
            shared.artist.as_deref(),
            Some("Brandon Sanderson, Michael Kramer, Kate Reading")
        );
        assert_eq!(shared.album_artist.as_deref(), Some("Brandon Sanderson"));
        assert_eq!(shared.composer.as_deref(), Some("Michael Kramer, Kate Reading"));
        assert_eq!(shared.genre.as_deref(), Some("Fantasy/Epic"));
        assert_eq!(
            shared.album_sort.as_deref(),
            Some("The Stormlight Archive 1 - The Way of Kings, Book 1")
        );
        assert_eq!(shared.grouping.as_deref(), Some("The Stormlight Archive, Book #1"));
        assert_eq!(shared.series_position.as_deref(), Some("1"));
        assert_eq!(shared.subtitle.as_deref(), Some("The Stormlight Archive, Book 1"));
        assert_eq!(shared.catalognum, shared.asin);
        assert_eq!(shared.data_source.as_deref(), Some("Audible"));
        assert_eq!((shared.year, shared.month, shared.day), (Some(2010), Some(8), Some(31)));
    }

    #[test]
    fn test_raw_series_position_is_normalized() {
        let details = BookDetails {
            title: "Edgedancer, Book 2.5".to_string(),
            series: Some(Series {
                name: "The Stormlight Archive".to_string(),
                position: Some("Book 2.5".to_string()),
            }),
            ..BookDetails::default()
        };
        let options = AttributeOptions {
            keep_series_reference_in_title: false,
            ..AttributeOptions::default()
        };
        let (title, shared) = build_shared_attributes(&details, &options);
        assert_eq!(title, "Edgedancer");
        assert_eq!(shared.series_position.as_deref(), Some("2.5"));
        assert_eq!(shared.grouping.as_deref(), Some("The Stormlight Archive, Book #2.5"));

        let unnumbered = BookDetails {
            series: Some(Series {
                name: "Cosmere".to_string(),
                position: Some("Prequel".to_string()),
            }),
            ..details
        };
        let (_, shared) = build_shared_attributes(&unnumbered, &options);
        assert_eq!(shared.series_position, None);
        assert_eq!(shared.grouping, None);
    }

    #[test]
    fn test_release_date_handling() {
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(book().is_released_by(today));

        let mut upcoming = book();
        upcoming.release_date = Some("2031-02-03T00:00:00Z".to_string());
        assert!(!upcoming.is_released_by(today));

        let mut malformed = book();
        malformed.release_date = Some("someday".to_string());
        assert!(malformed.is_released_by(today));
        let (_, shared) = build_shared_attributes(&malformed, &AttributeOptions::default());
        assert_eq!(shared.year, None);

        assert!(BookDetails::default().is_released_by(today));
    }

    #[test]
    fn test_series_references_removed() {
        let options = AttributeOptions {
            include_narrator_in_artists: false,
            keep_series_reference_in_title: false,
            keep_series_reference_in_subtitle: false,
        };
        let (title, shared) = build_shared_attributes(&book(), &options);
        assert_eq!(title, "The Way of Kings");
        assert_eq!(shared.subtitle, None);
        assert_eq!(shared.artist.as_deref(), Some("Brandon Sanderson"));
        assert_eq!(
            shared.album_sort.as_deref(),
            Some("The Stormlight Archive 1 - The Way of Kings")
        );
    }

    #[test]
    fn test_series_without_position() {
        let mut details = book();
        details.title = "Warbreaker".to_string();
        details.series = Some(Series {
            name: "Cosmere".to_string(),
            position: None,
        });
        let (_, shared) = build_shared_attributes(&details, &AttributeOptions::default());
        assert_eq!(shared.album_sort.as_deref(), Some("Cosmere - Warbreaker"));
        assert_eq!(shared.grouping, None);
    }

    #[test]
    fn test_standalone_book() {
        let details = BookDetails {
            title: "Project Hail Mary".to_string(),
            subtitle: Some("A Novel".to_string()),
            authors: vec!["Andy Weir".to_string()],
            ..BookDetails::default()
        };
        let (_, shared) = build_shared_attributes(&details, &AttributeOptions::default());
        assert_eq!(shared.album_sort.as_deref(), Some("Project Hail Mary - A Novel"));
        assert_eq!(shared.series_name, None);
        assert_eq!(shared.composer, None);
        assert_eq!(shared.artist.as_deref(), Some("Andy Weir"));

        let plain = BookDetails {
            title: "Dune".to_string(),
            ..BookDetails::default()
        };
        let (_, shared) = build_shared_attributes(&plain, &AttributeOptions::default());
        assert_eq!(shared.album_sort.as_deref(), Some("Dune"));
        assert_eq!(shared.artist, None);
    }

    #[test]
    fn test_parse_series_position() {
        assert_eq!(parse_series_position("Book 8.5").as_deref(), Some("8.5"));
        assert_eq!(parse_series_position("1-3").as_deref(), Some("1-3"));
        assert_eq!(parse_series_position("2"), Some("2".to_string()));
        assert_eq!(parse_series_position("Prequel"), None);
    }

    #[test]
    fn test_parse_release_date() {
        let date = parse_release_date("2019-05-07T00:00:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 5, 7).unwrap());
        assert_eq!(
            parse_release_date("2010-08-31").unwrap(),
            NaiveDate::from_ymd_opt(2010, 8, 31).unwrap()
        );
        assert!(matches!(parse_release_date("soon"), Err(Error::Parse(_))));
        assert!(parse_release_date("2019-13-01").is_err());
    }
}
