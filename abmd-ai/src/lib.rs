//! abmd-ai library interface
//!
//! Reconciles a book's local audio files with the chapter list of a remote
//! catalog entry. Entry points:
//! - [`services::align`] puts local tracks into book order
//! - [`services::synthesize`] builds the final per-file track records
//! - [`services::BookMatcher`] runs both for one candidate book
//!
//! Every operation is a pure, synchronous function of its inputs.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::config::{AiConfig, AlignmentConfig, AttributeOptions, UnmatchedPolicy};
pub use crate::error::{AlignError, AlignResult, MatchError, SynthesisError};
pub use crate::types::{
    AffixPair, Alignment, FinalTrack, LocalTrack, RemoteAlbum, RemoteChapter, SharedAttributes,
    StrategyKind, Synthesis, SynthesisWarning, TrackIdentity,
};
