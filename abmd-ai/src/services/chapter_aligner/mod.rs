//! Alignment Strategy Chain
//!
//! Puts a book's local files into book order by trying independent
//! heuristics in a fixed, configurable order. The first strategy that
//! returns a result wins; later strategies are never consulted.
//!
//! # Default Order
//! 1. **single_item** - exactly one local file
//! 2. **trusted_numbering** - contiguous embedded track numbers
//! 3. **leading_number** - every stripped title starts with a number
//! 4. **natural_sort** - natural order agrees with the catalog's titles;
//!    with equal counts this is a pass-through (`Alignment::RemoteOrder`)
//! 5. **greedy_nearest** - closest unconsumed chapter per file
//!
//! # Accuracy
//! `greedy_nearest` is a last resort. When titles carry little signal it
//! can produce an order that runs against the true book order. The chain
//! does not detect or report this.
//!
//! `leading_number` misses files whose titles share a suffix after the
//! number ("01 - Book Title", "02 - Book Title"): stripping leaves bare
//! digits with no separator.
//!
//! `Ok(None)` means no enabled strategy applied. The caller decides what
//! to do with an unmatched book; the chain never guesses.

use crate::config::AlignmentConfig;
use crate::error::{AlignError, AlignResult};
use crate::services::token_comparator::TokenComparator;
use crate::types::{Alignment, LocalTrack, RemoteAlbum, StrategyKind};
use std::collections::HashSet;
use tracing::{debug, info};

mod strategies;

/// Average stripped-title distance below which local natural order is
/// taken to agree with the catalog
pub const NOISE_THRESHOLD: f64 = 4.0;

/// Strategy chain
#[derive(Debug, Clone)]
pub struct ChapterAligner {
    config: AlignmentConfig,
    comparator: TokenComparator,
}

impl Default for ChapterAligner {
    fn default() -> Self {
        Self::new(AlignmentConfig::default())
    }
}

impl ChapterAligner {
    /// Create aligner from configuration
    pub fn new(config: AlignmentConfig) -> Self {
        let comparator = TokenComparator::with_digit_cost(config.digit_edit_cost);
        Self { config, comparator }
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Run the chain
    ///
    /// # Errors
    /// Returns `AlignError` for malformed input (see [`validate_inputs`]) or
    /// when the configuration leaves no strategy enabled.
    pub fn align(&self, locals: &[LocalTrack], remote: &RemoteAlbum) -> AlignResult<Option<Alignment>> {
        validate_inputs(locals, remote)?;

        let strategies = self.config.effective_strategies();
        if strategies.is_empty() {
            return Err(AlignError::NoStrategiesEnabled);
        }

        debug!(
            locals = locals.len(),
            chapters = remote.chapters.len(),
            strategies = ?strategies,
            "Aligning local tracks with remote chapters"
        );

        for kind in strategies {
            match self.run_strategy(kind, locals, remote) {
                Some(alignment) => {
                    info!(
                        strategy = %kind,
                        remote_order = alignment.is_remote_order(),
                        "Alignment strategy matched"
                    );
                    return Ok(Some(alignment));
                }
                None => debug!(strategy = %kind, "Alignment strategy not applicable"),
            }
        }

        info!(
            locals = locals.len(),
            chapters = remote.chapters.len(),
            "No alignment strategy applied"
        );
        Ok(None)
    }

    /// Run one strategy in isolation (no input validation)
    pub fn run_strategy(
        &self,
        kind: StrategyKind,
        locals: &[LocalTrack],
        remote: &RemoteAlbum,
    ) -> Option<Alignment> {
        let commonness = self.config.affix_commonness_threshold;
        match kind {
            StrategyKind::SingleItem => strategies::single_item(locals, remote),
            StrategyKind::TrustedNumbering => strategies::trusted_numbering(locals),
            StrategyKind::LeadingNumber => strategies::leading_number(locals, commonness),
            StrategyKind::NaturalSort => strategies::natural_sort_fallback(
                locals,
                remote,
                &self.comparator,
                commonness,
                self.config.noise_threshold,
            ),
            StrategyKind::GreedyNearest => {
                strategies::greedy_nearest(locals, remote, &self.comparator, commonness)
            }
        }
    }
}

/// Check the input contract shared by every strategy
///
/// - at least one local track
/// - at least one remote chapter
/// - chapter sequence indices are 1, 2, 3, ... in list order
/// - no two locals share an identity
pub fn validate_inputs(locals: &[LocalTrack], remote: &RemoteAlbum) -> AlignResult<()> {
    if locals.is_empty() {
        return Err(AlignError::NoLocalTracks);
    }

    if remote.chapters.is_empty() {
        return Err(AlignError::EmptyRemoteChapters {
            local_count: locals.len(),
        });
    }

    for (position, chapter) in remote.chapters.iter().enumerate() {
        let expected = position as u32 + 1;
        if chapter.sequence_index != expected {
            return Err(AlignError::InvalidChapterSequence {
                position,
                expected,
                found: chapter.sequence_index,
            });
        }
    }

    let mut seen = HashSet::with_capacity(locals.len());
    for local in locals {
        if !seen.insert(&local.identity) {
            return Err(AlignError::DuplicateIdentity(local.identity.to_string()));
        }
    }

    Ok(())
}

/// Run the default chain
pub fn align(locals: &[LocalTrack], remote: &RemoteAlbum) -> AlignResult<Option<Alignment>> {
    ChapterAligner::default().align(locals, remote)
}
