//! Core Types for ABMD-AI
//!
//! Data model shared by the chapter reconciliation services:
//! - **Inputs:** `LocalTrack` (one per local audio file), `RemoteAlbum`
//!   with its ordered `RemoteChapter` list
//! - **Intermediate:** `AffixPair`, `Alignment`
//! - **Output:** `FinalTrack`
//!
//! All inputs are read-only for the duration of one alignment attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Inputs
// ============================================================================

/// Stable identity of a local file (usually its path)
///
/// Opaque to the alignment core; only compared for equality and used as
/// the last natural-sort tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackIdentity(pub String);

impl TrackIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local audio file stand-in awaiting chapter metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTrack {
    /// Title read from the file's tags (or derived from its file name)
    pub title: String,
    /// Embedded track number, if any
    #[serde(default)]
    pub ordinal_hint: Option<u32>,
    /// Stable identity used to map results back to files
    pub identity: TrackIdentity,
    /// Length of the file's audio
    #[serde(default)]
    pub duration_ms: u64,
}

impl LocalTrack {
    /// Create local track without ordinal hint or duration
    pub fn new(title: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ordinal_hint: None,
            identity: TrackIdentity::new(identity),
            duration_ms: 0,
        }
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal_hint = Some(ordinal);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// One chapter from the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteChapter {
    pub title: String,
    pub duration_ms: u64,
    /// 1-based position in book order
    pub sequence_index: u32,
}

impl RemoteChapter {
    pub fn new(title: impl Into<String>, duration_ms: u64, sequence_index: u32) -> Self {
        Self {
            title: title.into(),
            duration_ms,
            sequence_index,
        }
    }
}

/// Attributes identical across every track of one book
///
/// Every field is optional; absent values are simply not written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedAttributes {
    /// Authors, optionally followed by narrators
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    /// Narrators
    pub composer: Option<String>,
    /// Genres joined with "/"
    pub genre: Option<String>,
    /// Content group, e.g. "Series, Book #2"
    pub grouping: Option<String>,
    pub album_sort: Option<String>,
    pub series_name: Option<String>,
    pub series_position: Option<String>,
    /// Book summary
    pub comments: Option<String>,
    pub subtitle: Option<String>,
    pub asin: Option<String>,
    pub catalognum: Option<String>,
    pub album_url: Option<String>,
    pub region: Option<String>,
    pub data_source: Option<String>,
    pub language: Option<String>,
    /// Publisher
    pub label: Option<String>,
    /// Release date parts
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Book descriptor from the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAlbum {
    /// Book title
    #[serde(default)]
    pub album: String,
    /// Chapters in authoritative book order
    pub chapters: Vec<RemoteChapter>,
    /// False when the catalog warns its chapter breakdown may not match a
    /// real audio split
    #[serde(default = "default_true")]
    pub is_chapter_data_accurate: bool,
    #[serde(default)]
    pub shared: SharedAttributes,
}

fn default_true() -> bool {
    true
}

impl RemoteAlbum {
    /// Build album from chapter titles and lengths, numbering from 1
    pub fn from_chapters<I, S>(album: impl Into<String>, chapters: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let chapters = chapters
            .into_iter()
            .enumerate()
            .map(|(i, (title, duration_ms))| RemoteChapter::new(title, duration_ms, i as u32 + 1))
            .collect();

        Self {
            album: album.into(),
            chapters,
            is_chapter_data_accurate: true,
            shared: SharedAttributes::default(),
        }
    }

    pub fn chapter_titles(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.title.as_str()).collect()
    }
}

// ============================================================================
// Intermediate
// ============================================================================

/// Literal prefix and suffix shared by a batch of strings
///
/// Derived per comparison batch; never reused across collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffixPair {
    pub prefix: String,
    pub suffix: String,
}

impl AffixPair {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// Alignment heuristics, in default chain order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Exactly one local file
    SingleItem,
    /// Contiguous embedded track numbers
    TrustedNumbering,
    /// Number at the start of every stripped title
    LeadingNumber,
    /// Natural order agrees with the catalog's chapter titles
    NaturalSort,
    /// Closest remaining chapter title per file (last resort)
    GreedyNearest,
}

impl StrategyKind {
    /// Default chain order
    pub const DEFAULT_ORDER: [StrategyKind; 5] = [
        StrategyKind::SingleItem,
        StrategyKind::TrustedNumbering,
        StrategyKind::LeadingNumber,
        StrategyKind::NaturalSort,
        StrategyKind::GreedyNearest,
    ];

    /// Config / log name
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::SingleItem => "single_item",
            StrategyKind::TrustedNumbering => "trusted_numbering",
            StrategyKind::LeadingNumber => "leading_number",
            StrategyKind::NaturalSort => "natural_sort",
            StrategyKind::GreedyNearest => "greedy_nearest",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::DEFAULT_ORDER
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown alignment strategy: {:?}", s))
    }
}

/// One local track in its aligned position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedTrack {
    pub local: LocalTrack,
    /// Index into `RemoteAlbum::chapters` when the strategy tied this file
    /// to a specific chapter
    pub chapter: Option<usize>,
}

/// Locals reordered into book order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedTracks {
    pub strategy: StrategyKind,
    /// A permutation of the input locals
    pub tracks: Vec<AlignedTrack>,
    /// Use the tied chapter's title instead of the local title
    pub prefer_remote_titles: bool,
}

impl OrderedTracks {
    /// Ordering with no chapter ties
    pub fn unassigned(strategy: StrategyKind, locals: Vec<LocalTrack>) -> Self {
        Self {
            strategy,
            tracks: locals
                .into_iter()
                .map(|local| AlignedTrack { local, chapter: None })
                .collect(),
            prefer_remote_titles: false,
        }
    }
}

/// Outcome of a successful strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alignment {
    /// Local tracks reordered (a permutation of the input)
    Ordered(OrderedTracks),
    /// Pass-through: trust the remote chapter order as-is
    RemoteOrder {
        strategy: StrategyKind,
        /// Local identities in natural order; entry `i` is the file for
        /// chapter `i`
        locals: Vec<TrackIdentity>,
    },
}

impl Alignment {
    pub fn strategy(&self) -> StrategyKind {
        match self {
            Alignment::Ordered(ordered) => ordered.strategy,
            Alignment::RemoteOrder { strategy, .. } => *strategy,
        }
    }

    pub fn is_remote_order(&self) -> bool {
        matches!(self, Alignment::RemoteOrder { .. })
    }

    /// Pass-through for locals already in chapter order
    pub fn remote_order<'a>(
        strategy: StrategyKind,
        locals: impl IntoIterator<Item = &'a LocalTrack>,
    ) -> Self {
        Alignment::RemoteOrder {
            strategy,
            locals: locals.into_iter().map(|l| l.identity.clone()).collect(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Final per-file track record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalTrack {
    /// 1-based position in book order
    pub position: u32,
    /// Total tracks in the book
    pub total: u32,
    pub title: String,
    pub duration_ms: u64,
    /// Local file this record belongs to
    pub identity: TrackIdentity,
    /// Sequence index of the remote chapter this record was built from
    pub source_chapter: Option<u32>,
    pub medium: u32,
    pub shared: SharedAttributes,
}

/// Caller-visible, non-fatal synthesis findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisWarning {
    /// Remote order was trusted but the catalog flags its chapter data as
    /// possibly inaccurate
    ApproximateChapterData,
}

/// Synthesized track list plus warnings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    pub tracks: Vec<FinalTrack>,
    pub warnings: Vec<SynthesisWarning>,
}
