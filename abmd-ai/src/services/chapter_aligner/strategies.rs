//! Individual alignment strategies
//!
//! Each strategy is a pure function of its inputs and returns `None` when
//! it does not apply. Inputs are assumed validated by the chain.

use crate::services::affix_analyzer::{find_regular_affixes, strip_common_affixes};
use crate::services::natural_sort::natural_sort;
use crate::services::token_comparator::TokenComparator;
use crate::types::{AlignedTrack, Alignment, LocalTrack, OrderedTracks, RemoteAlbum, StrategyKind};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Digits at the very start, followed by a space, dash or underscore
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)[\s\-_]").expect("leading number pattern is valid"));

/// True when sorted values step by exactly one (no gaps, no duplicates)
fn is_contiguous(sorted: &[u64]) -> bool {
    sorted.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]))
}

/// Sort locals by a per-track number and require a contiguous run
fn order_by_numbers(
    strategy: StrategyKind,
    mut numbered: Vec<(u64, &LocalTrack)>,
) -> Option<Alignment> {
    numbered.sort_by_key(|(n, _)| *n);

    let numbers: Vec<u64> = numbered.iter().map(|(n, _)| *n).collect();
    if !is_contiguous(&numbers) {
        debug!(strategy = %strategy, numbers = ?numbers, "Numbers are not contiguous");
        return None;
    }

    let ordered = numbered.into_iter().map(|(_, local)| local.clone()).collect();
    Some(Alignment::Ordered(OrderedTracks::unassigned(strategy, ordered)))
}

/// Exactly one local file.
///
/// With exactly one remote chapter the file is tied to it and the
/// chapter's title is preferred at synthesis.
pub(super) fn single_item(locals: &[LocalTrack], remote: &RemoteAlbum) -> Option<Alignment> {
    let [only] = locals else {
        return None;
    };

    if remote.chapters.len() == 1 {
        return Some(Alignment::Ordered(OrderedTracks {
            strategy: StrategyKind::SingleItem,
            tracks: vec![AlignedTrack {
                local: only.clone(),
                chapter: Some(0),
            }],
            prefer_remote_titles: true,
        }));
    }

    Some(Alignment::Ordered(OrderedTracks::unassigned(
        StrategyKind::SingleItem,
        vec![only.clone()],
    )))
}

/// Every local has an embedded number and the numbers form a contiguous
/// run (any start). Positions are renumbered from 1 at synthesis.
pub(super) fn trusted_numbering(locals: &[LocalTrack]) -> Option<Alignment> {
    let numbered: Option<Vec<(u64, &LocalTrack)>> = locals
        .iter()
        .map(|local| local.ordinal_hint.map(|n| (u64::from(n), local)))
        .collect();

    order_by_numbers(StrategyKind::TrustedNumbering, numbered?)
}

/// Every title, once the batch's affixes are stripped, starts with a
/// number followed by a separator, and the numbers are contiguous.
///
/// A shared suffix is stripped too, so "01 - Book Title", "02 - Book Title"
/// reduce to bare digits and do not qualify here; natural sort usually
/// picks them up instead.
pub(super) fn leading_number(locals: &[LocalTrack], commonness: f64) -> Option<Alignment> {
    let titles: Vec<&str> = locals.iter().map(|l| l.title.as_str()).collect();
    let affixes = find_regular_affixes(&titles, commonness);

    let numbered: Option<Vec<(u64, &LocalTrack)>> = locals
        .iter()
        .map(|local| {
            let stripped = strip_common_affixes(&local.title, &affixes);
            let captures = LEADING_NUMBER.captures(stripped)?;
            let number = captures[1].parse::<u64>().ok()?;
            Some((number, local))
        })
        .collect();

    order_by_numbers(StrategyKind::LeadingNumber, numbered?)
}

/// Natural order of the local titles agrees with the catalog.
///
/// Locals are natural-sorted and compared position by position with the
/// remote chapters, each side stripped of its own affixes. If the average
/// distance is below `noise_threshold` the natural order is accepted:
/// with equal counts the remote order is trusted as-is (pass-through),
/// otherwise the natural-sorted locals are returned.
pub(super) fn natural_sort_fallback(
    locals: &[LocalTrack],
    remote: &RemoteAlbum,
    comparator: &TokenComparator,
    commonness: f64,
    noise_threshold: f64,
) -> Option<Alignment> {
    let sorted = natural_sort(locals);

    let local_titles: Vec<&str> = sorted.iter().map(|l| l.title.as_str()).collect();
    let remote_titles = remote.chapter_titles();
    let local_affixes = find_regular_affixes(&local_titles, commonness);
    let remote_affixes = find_regular_affixes(&remote_titles, commonness);

    let pairs = local_titles.len().min(remote_titles.len());
    if pairs == 0 {
        return None;
    }

    let total: u64 = local_titles
        .iter()
        .zip(remote_titles.iter())
        .map(|(local, chapter)| {
            u64::from(comparator.distance(
                strip_common_affixes(local, &local_affixes),
                strip_common_affixes(chapter, &remote_affixes),
                None,
            ))
        })
        .sum();
    let average = total as f64 / pairs as f64;

    debug!(
        average_distance = average,
        threshold = noise_threshold,
        pairs,
        "Natural order distance to remote chapters"
    );

    if average >= noise_threshold {
        return None;
    }

    if locals.len() == remote.chapters.len() {
        return Some(Alignment::remote_order(StrategyKind::NaturalSort, &sorted));
    }

    Some(Alignment::Ordered(OrderedTracks::unassigned(
        StrategyKind::NaturalSort,
        sorted,
    )))
}

/// Last resort: each local, in input order, takes the closest chapter not
/// yet taken. Ties go to the earliest chapter. Locals left over after the
/// chapters run out follow in input order with no chapter.
pub(super) fn greedy_nearest(
    locals: &[LocalTrack],
    remote: &RemoteAlbum,
    comparator: &TokenComparator,
    commonness: f64,
) -> Option<Alignment> {
    let local_titles: Vec<&str> = locals.iter().map(|l| l.title.as_str()).collect();
    let remote_titles = remote.chapter_titles();
    let local_affixes = find_regular_affixes(&local_titles, commonness);
    let remote_affixes = find_regular_affixes(&remote_titles, commonness);

    let stripped_chapters: Vec<&str> = remote_titles
        .iter()
        .map(|t| strip_common_affixes(t, &remote_affixes))
        .collect();

    // Working copy of which chapters are still free; the album is untouched
    let mut consumed = vec![false; stripped_chapters.len()];
    let mut assignments: Vec<(Option<usize>, usize)> = Vec::with_capacity(locals.len());

    for (input_index, title) in local_titles.iter().enumerate() {
        let stripped = strip_common_affixes(title, &local_affixes);

        let nearest = stripped_chapters
            .iter()
            .enumerate()
            .filter(|(j, _)| !consumed[*j])
            .map(|(j, chapter)| (comparator.distance(stripped, chapter, None), j))
            .min();

        let chapter = nearest.map(|(distance, j)| {
            consumed[j] = true;
            debug!(local = %title, chapter = %remote_titles[j], distance, "Greedy chapter assignment");
            j
        });
        assignments.push((chapter, input_index));
    }

    assignments.sort_by_key(|(chapter, input_index)| (chapter.unwrap_or(usize::MAX), *input_index));

    let tracks = assignments
        .into_iter()
        .map(|(chapter, input_index)| AlignedTrack {
            local: locals[input_index].clone(),
            chapter,
        })
        .collect();

    Some(Alignment::Ordered(OrderedTracks {
        strategy: StrategyKind::GreedyNearest,
        tracks,
        prefer_remote_titles: false,
    }))
}
