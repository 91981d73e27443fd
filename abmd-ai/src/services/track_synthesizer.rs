//! Track Synthesis
//!
//! Turns a winning alignment into the book's final track list. Each record
//! combines per-track data (title, duration) with the album's shared
//! attributes. Records are built fresh per track; the album is never
//! mutated.

use crate::error::SynthesisError;
use crate::types::{
    AlignedTrack, Alignment, FinalTrack, OrderedTracks, RemoteAlbum, Synthesis, SynthesisWarning,
    TrackIdentity,
};
use abmd_common::human_time::format_total_ms;
use tracing::{debug, warn};

/// Audiobooks are written as a single medium
const MEDIUM: u32 = 1;

/// Build final track records from an alignment
///
/// # Errors
/// `SynthesisError::LengthMismatch` when a pass-through alignment carries
/// a different number of locals than the album has chapters.
pub fn synthesize(alignment: &Alignment, remote: &RemoteAlbum) -> Result<Synthesis, SynthesisError> {
    match alignment {
        Alignment::Ordered(ordered) => Ok(synthesize_ordered(ordered, remote)),
        Alignment::RemoteOrder { locals, .. } => synthesize_remote_order(locals, remote),
    }
}

/// One record per local, in aligned order
fn synthesize_ordered(ordered: &OrderedTracks, remote: &RemoteAlbum) -> Synthesis {
    let total = ordered.tracks.len() as u32;

    let tracks: Vec<FinalTrack> = ordered
        .tracks
        .iter()
        .enumerate()
        .map(|(i, aligned)| final_from_local(i, total, aligned, ordered.prefer_remote_titles, remote))
        .collect();

    debug!(
        strategy = %ordered.strategy,
        tracks = tracks.len(),
        total_length = %format_total_ms(tracks.iter().map(|t| t.duration_ms)),
        "Synthesized tracks from local order"
    );

    Synthesis {
        tracks,
        warnings: Vec::new(),
    }
}

fn final_from_local(
    index: usize,
    total: u32,
    aligned: &AlignedTrack,
    prefer_remote_titles: bool,
    remote: &RemoteAlbum,
) -> FinalTrack {
    let chapter = aligned.chapter.and_then(|c| remote.chapters.get(c));

    let title = match chapter {
        Some(chapter) if prefer_remote_titles => chapter.title.clone(),
        _ => aligned.local.title.clone(),
    };

    FinalTrack {
        position: index as u32 + 1,
        total,
        title,
        duration_ms: aligned.local.duration_ms,
        identity: aligned.local.identity.clone(),
        source_chapter: chapter.map(|c| c.sequence_index),
        medium: MEDIUM,
        shared: remote.shared.clone(),
    }
}

/// Pass-through: one record per remote chapter, in catalog order
///
/// Chapter `i` takes its title and duration from the catalog and its
/// identity from `locals[i]`. Also used directly when no strategy applied
/// and the caller chose to trust the catalog.
pub fn synthesize_remote_order(
    locals: &[TrackIdentity],
    remote: &RemoteAlbum,
) -> Result<Synthesis, SynthesisError> {
    let chapters = remote.chapters.len();
    if locals.len() != chapters {
        return Err(SynthesisError::LengthMismatch {
            locals: locals.len(),
            chapters,
        });
    }

    let total = chapters as u32;
    let tracks: Vec<FinalTrack> = remote
        .chapters
        .iter()
        .zip(locals)
        .enumerate()
        .map(|(i, (chapter, identity))| FinalTrack {
            position: i as u32 + 1,
            total,
            title: chapter.title.clone(),
            duration_ms: chapter.duration_ms,
            identity: identity.clone(),
            source_chapter: Some(chapter.sequence_index),
            medium: MEDIUM,
            shared: remote.shared.clone(),
        })
        .collect();

    let mut warnings = Vec::new();
    if !remote.is_chapter_data_accurate {
        warn!(
            album = %remote.album,
            chapters,
            "Chapter data could be inaccurate; trusting remote order anyway"
        );
        warnings.push(SynthesisWarning::ApproximateChapterData);
    }

    debug!(
        tracks = tracks.len(),
        total_length = %format_total_ms(tracks.iter().map(|t| t.duration_ms)),
        "Synthesized tracks from remote chapter order"
    );

    Ok(Synthesis { tracks, warnings })
}
