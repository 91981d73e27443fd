//! Test Helper Utilities
//!
//! Shared fixtures for testing abmd-ai

#![allow(dead_code)]

pub mod log_capture;

pub use log_capture::LogCapture;

use abmd_ai::types::{Alignment, LocalTrack, RemoteAlbum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Local tracks with the given titles; identity is "<index>-<title>"
pub fn locals(titles: &[&str]) -> Vec<LocalTrack> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| LocalTrack::new(*title, format!("{:03}-{}", i, title)).with_duration_ms(60_000))
        .collect()
}

/// Remote album with one-minute chapters
pub fn album(titles: &[&str]) -> RemoteAlbum {
    RemoteAlbum::from_chapters("Test Book", titles.iter().map(|t| (*t, 60_000)))
}

/// "{prefix}{n}" for n in range, as owned titles
pub fn numbered(prefix: &str, range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|n| format!("{}{}", prefix, n)).collect()
}

pub fn as_strs(titles: &[String]) -> Vec<&str> {
    titles.iter().map(String::as_str).collect()
}

/// Deterministic shuffle
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = items.to_vec();
    out.shuffle(&mut rng);
    out
}

/// Titles of an ordered alignment; panics on pass-through
pub fn ordered_titles(alignment: &Alignment) -> Vec<String> {
    match alignment {
        Alignment::Ordered(ordered) => ordered.tracks.iter().map(|t| t.local.title.clone()).collect(),
        Alignment::RemoteOrder { .. } => panic!("expected local ordering, got pass-through"),
    }
}

/// Sorted identity strings, for permutation checks
pub fn sorted_identities(tracks: &[LocalTrack]) -> Vec<String> {
    let mut ids: Vec<String> = tracks.iter().map(|t| t.identity.to_string()).collect();
    ids.sort();
    ids
}
