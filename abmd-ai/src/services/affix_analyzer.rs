//! Affix Analyzer
//!
//! Finds the literal prefix and suffix shared by a batch of titles so that
//! book-specific boilerplate ("Chapter - ", " (Unabridged)") can be ignored
//! before titles are compared.
//!
//! Affixes are character-based: a prefix never ends in the middle of a
//! multi-byte code point.

use crate::types::AffixPair;

/// Minimum share of a batch that must keep a non-empty middle after
/// stripping for the batch's affixes to be used
pub const AFFIX_COMMONNESS_THRESHOLD: f64 = 0.75;

/// Longest prefix and suffix shared by every string.
///
/// Returns an empty pair for fewer than two strings. Prefix and suffix are
/// computed independently and may overlap inside the shortest string;
/// `strip_common_affixes` tolerates that.
pub fn find_common_affixes<S: AsRef<str>>(strings: &[S]) -> AffixPair {
    if strings.len() < 2 {
        return AffixPair::default();
    }

    let prefix = common_prefix(strings.iter().map(|s| s.as_ref().chars()));

    let reversed_suffix = common_prefix(strings.iter().map(|s| s.as_ref().chars().rev()));
    let suffix: String = reversed_suffix.chars().rev().collect();

    AffixPair { prefix, suffix }
}

/// Batch-level affixes used by the alignment strategies.
///
/// Same as [`find_common_affixes`], except that the pair is discarded when
/// fewer than `commonness` of the strings keep any content once stripped.
/// This catches degenerate batches such as `["Part", "Part 1", "Part 2"]`
/// where the "affix" is really one of the titles.
pub fn find_regular_affixes<S: AsRef<str>>(strings: &[S], commonness: f64) -> AffixPair {
    let affixes = find_common_affixes(strings);
    if affixes.is_empty() {
        return affixes;
    }

    let non_empty = strings
        .iter()
        .filter(|s| !strip_common_affixes(s.as_ref(), &affixes).is_empty())
        .count();
    let share = non_empty as f64 / strings.len() as f64;

    if share < commonness {
        tracing::debug!(
            prefix = %affixes.prefix,
            suffix = %affixes.suffix,
            share,
            "Discarding affixes that empty too many titles"
        );
        return AffixPair::default();
    }

    affixes
}

/// Remove anchored affixes from one token.
///
/// The prefix is removed only if it starts `token`; the suffix only if it
/// ends what remains. Affixes are matched as literal text. When the two
/// overlap in a short token the result degrades to an empty or partial
/// string, never an error.
pub fn strip_common_affixes<'a>(token: &'a str, affixes: &AffixPair) -> &'a str {
    let without_prefix = if affixes.prefix.is_empty() {
        token
    } else {
        token.strip_prefix(affixes.prefix.as_str()).unwrap_or(token)
    };

    if affixes.suffix.is_empty() {
        without_prefix
    } else {
        without_prefix
            .strip_suffix(affixes.suffix.as_str())
            .unwrap_or(without_prefix)
    }
}

/// Longest common prefix of several character streams
fn common_prefix<I, C>(streams: I) -> String
where
    I: Iterator<Item = C>,
    C: Iterator<Item = char>,
{
    let mut streams: Vec<C> = streams.collect();
    let mut prefix = String::new();

    loop {
        let mut current: Option<char> = None;
        for stream in streams.iter_mut() {
            match (stream.next(), current) {
                (None, _) => return prefix,
                (Some(c), None) => current = Some(c),
                (Some(c), Some(expected)) if c != expected => return prefix,
                _ => {}
            }
        }
        match current {
            Some(c) => prefix.push(c),
            None => return prefix,
        }
    }
}
