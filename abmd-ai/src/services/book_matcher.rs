//! Book matcher
//!
//! End-to-end chapter reconciliation for one candidate book:
//! 1. Check that the local album name plausibly names the book
//! 2. Run the alignment chain
//! 3. Apply the unmatched policy when no strategy applies
//! 4. Synthesize the final track list

use crate::config::{AlignmentConfig, AttributeOptions, UnmatchedPolicy};
use crate::error::{MatchError, SynthesisError};
use crate::services::attribute_builder::{build_shared_attributes, BookDetails};
use crate::services::chapter_aligner::ChapterAligner;
use crate::services::natural_sort::natural_sort;
use crate::services::title_normalizer::{is_likely_match, normalize_book_title};
use crate::services::track_synthesizer::{synthesize, synthesize_remote_order};
use crate::types::{
    FinalTrack, LocalTrack, RemoteAlbum, StrategyKind, Synthesis, SynthesisWarning, TrackIdentity,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of matching local files against one catalog book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Catalog book title
    pub album: String,
    /// Winning strategy; None when the unmatched policy supplied the order
    pub strategy: Option<StrategyKind>,
    /// True when the catalog's chapter order was used as-is
    pub remote_order: bool,
    /// Number of chapters the catalog reports
    pub remote_chapter_count: usize,
    pub local_count: usize,
    pub warnings: Vec<SynthesisWarning>,
    pub tracks: Vec<FinalTrack>,
}

/// One book matching request, as read from a job file
#[derive(Debug, Clone, Deserialize)]
pub struct MatchJob {
    pub locals: Vec<LocalTrack>,
    pub remote: RemoteAlbum,
    /// Album name tagged on the local files
    #[serde(default)]
    pub local_album: Option<String>,
    /// Catalog book details; when present they replace `remote.shared`
    #[serde(default)]
    pub book: Option<BookDetails>,
}

/// Matches local files to one catalog book
#[derive(Debug, Clone, Default)]
pub struct BookMatcher {
    aligner: ChapterAligner,
}

impl BookMatcher {
    pub fn new(config: AlignmentConfig) -> Self {
        Self {
            aligner: ChapterAligner::new(config),
        }
    }

    /// Align and synthesize tracks for one candidate book
    ///
    /// `local_album` is the album name read from the local files; when
    /// given, it must plausibly name the catalog book. The check is skipped
    /// when either name normalizes to nothing.
    ///
    /// # Errors
    /// - `MatchError::UnlikelyCandidate` if the album name does not match
    /// - `MatchError::Align` for malformed input
    /// - `MatchError::Synthesis` when no strategy applied and the unmatched
    ///   policy cannot supply an order
    pub fn match_book(
        &self,
        locals: &[LocalTrack],
        remote: &RemoteAlbum,
        local_album: Option<&str>,
    ) -> Result<MatchReport, MatchError> {
        if let Some(local_album) = local_album {
            let untitled = normalize_book_title(local_album).is_empty()
                || normalize_book_title(&remote.album).is_empty();
            if untitled {
                debug!(
                    local = %local_album,
                    remote = %remote.album,
                    "Album name or book title is empty; skipping candidate check"
                );
            } else if !is_likely_match(local_album, &remote.album) {
                debug!(local = %local_album, remote = %remote.album, "Album is not a likely match");
                return Err(MatchError::UnlikelyCandidate {
                    local: local_album.to_string(),
                    remote: remote.album.clone(),
                });
            }
        }

        info!(
            "Attempting to match book: album {} with {} files to book {} with {} chapters",
            local_album.unwrap_or("<untagged>"),
            locals.len(),
            remote.album,
            remote.chapters.len()
        );

        let (strategy, remote_order, synthesis) = match self.aligner.align(locals, remote)? {
            Some(alignment) => (
                Some(alignment.strategy()),
                alignment.is_remote_order(),
                synthesize(&alignment, remote)?,
            ),
            None => (None, true, self.unmatched_fallback(locals, remote)?),
        };

        Ok(MatchReport {
            album: remote.album.clone(),
            strategy,
            remote_order,
            remote_chapter_count: remote.chapters.len(),
            local_count: locals.len(),
            warnings: synthesis.warnings,
            tracks: synthesis.tracks,
        })
    }

    /// Run a job: shape shared attributes from the book details (if any),
    /// then match
    ///
    /// # Errors
    /// As [`match_book`](Self::match_book), plus `MatchError::Unreleased`
    /// when the book's release date is after today.
    pub fn match_job(&self, job: MatchJob, attributes: &AttributeOptions) -> Result<MatchReport, MatchError> {
        self.match_job_on(job, attributes, Local::now().date_naive())
    }

    /// `match_job` with an explicit current date
    pub fn match_job_on(
        &self,
        job: MatchJob,
        attributes: &AttributeOptions,
        today: NaiveDate,
    ) -> Result<MatchReport, MatchError> {
        let mut remote = job.remote;
        if let Some(book) = &job.book {
            if !book.is_released_by(today) {
                let release_date = book.release().unwrap_or(today);
                info!(title = %book.title, %release_date, "Skipping book that is not released yet");
                return Err(MatchError::Unreleased {
                    title: book.title.clone(),
                    release_date,
                });
            }

            let (album, shared) = build_shared_attributes(book, attributes);
            if remote.album.is_empty() {
                remote.album = album;
            }
            remote.shared = shared;
        }

        self.match_book(&job.locals, &remote, job.local_album.as_deref())
    }

    /// Tracks to use when no strategy applied
    ///
    /// Under `RemoteOrder` the locals are paired with chapters in natural
    /// order.
    fn unmatched_fallback(
        &self,
        locals: &[LocalTrack],
        remote: &RemoteAlbum,
    ) -> Result<Synthesis, SynthesisError> {
        let local_count = locals.len();
        let chapter_count = remote.chapters.len();
        match self.aligner.config().unmatched_policy {
            UnmatchedPolicy::RemoteOrder if local_count == chapter_count => {
                warn!(
                    local_count,
                    chapter_count,
                    "No alignment strategy applied; falling back to remote chapter order"
                );
                let identities: Vec<TrackIdentity> =
                    natural_sort(locals).into_iter().map(|l| l.identity).collect();
                synthesize_remote_order(&identities, remote)
            }
            policy => {
                info!(local_count, chapter_count, policy = ?policy, "Book unmatched by chapters");
                Err(SynthesisError::Unmatched {
                    local_count,
                    chapter_count,
                })
            }
        }
    }
}
