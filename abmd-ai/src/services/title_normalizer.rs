//! Book title normalization
//!
//! Decides whether a local album name plausibly refers to a catalog book
//! before any chapter alignment is attempted, and cleans album names into
//! catalog search queries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Similarity at or above which two normalized titles are treated as the
/// same book even when neither contains the other
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

static ABRIDGED_INDICATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((unabridged|abridged)\)").expect("abridged pattern is valid"));

static MEDIUM_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(CD|disc)\s*\d+").expect("medium marker pattern is valid"));

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, drop the abridged indicator and punctuation, collapse spaces
///
/// ```
/// use abmd_ai::services::normalize_book_title;
///
/// assert_eq!(normalize_book_title("  The Way of Kings (Unabridged) "), "the way of kings");
/// assert_eq!(normalize_book_title("Mistborn: The Final Empire"), "mistborn the final empire");
/// ```
pub fn normalize_book_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let without_indicator = ABRIDGED_INDICATOR.replace_all(&lowered, "");
    let without_punctuation = PUNCTUATION.replace_all(&without_indicator, "");
    collapse_whitespace(&without_punctuation)
}

/// Similarity of two normalized titles (0.0-1.0)
pub fn title_similarity(local_album: &str, remote_album: &str) -> f64 {
    strsim::normalized_levenshtein(
        &normalize_book_title(local_album),
        &normalize_book_title(remote_album),
    )
}

/// Whether a local album name plausibly names the remote book
///
/// True when either normalized title contains the other (lengths differ
/// when one side carries a subtitle or series), or when the two are
/// nearly identical. A title that normalizes to nothing never matches.
pub fn is_likely_match(local_album: &str, remote_album: &str) -> bool {
    let local = normalize_book_title(local_album);
    let remote = normalize_book_title(remote_album);

    if local.is_empty() || remote.is_empty() {
        return false;
    }

    if local.contains(&remote) || remote.contains(&local) {
        return true;
    }

    let similarity = strsim::normalized_levenshtein(&local, &remote);
    tracing::debug!(
        local = %local,
        remote = %remote,
        similarity,
        "Album name does not contain book title; using fuzzy similarity"
    );
    similarity >= FUZZY_MATCH_THRESHOLD
}

/// Strip medium markers ("CD1", "disc 2") and the abridged indicator from a
/// search query
pub fn clean_search_query(query: &str) -> String {
    let without_medium = MEDIUM_MARKER.replace_all(query, "");
    let without_indicator = ABRIDGED_INDICATOR.replace_all(&without_medium, "");
    collapse_whitespace(&without_indicator)
}
