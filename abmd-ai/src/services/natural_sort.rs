//! Local Natural Sort
//!
//! Orders local tracks the way a person reads them: digit runs compare as
//! numbers ("track9" < "track10"), other runs compare case-insensitively.
//!
//! The comparison is a total order over (natural key, raw title,
//! identity), so the output does not depend on input order. Only items
//! equal in all three keep their input order.

use crate::types::LocalTrack;
use std::cmp::Ordering;

/// One run of a title
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk<'a> {
    /// Digit run with leading zeros removed (never empty; "0" for all-zero)
    Number(&'a str),
    /// Non-digit run, lowercased
    Text(String),
}

impl Ord for Chunk<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Compare by magnitude without parsing: more digits is larger
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Chunk<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a title into digit and non-digit runs
fn chunks(title: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = title;

    while let Some(first) = rest.chars().next() {
        let is_digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != is_digit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);

        if is_digit {
            let trimmed = run.trim_start_matches('0');
            out.push(Chunk::Number(if trimmed.is_empty() { "0" } else { trimmed }));
        } else {
            out.push(Chunk::Text(run.to_lowercase()));
        }
        rest = tail;
    }

    out
}

/// Natural comparison of two titles (ignoring identity)
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    chunks(a).cmp(&chunks(b))
}

/// Full comparison used by [`natural_sort`]
fn track_cmp(a: &LocalTrack, b: &LocalTrack) -> Ordering {
    natural_cmp(&a.title, &b.title)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.identity.cmp(&b.identity))
}

/// Sort local tracks into natural title order
pub fn natural_sort(items: &[LocalTrack]) -> Vec<LocalTrack> {
    let mut sorted = items.to_vec();
    sorted.sort_by(track_cmp);
    sorted
}
