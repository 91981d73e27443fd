//! Chapter reconciliation services
//!
//! Leaf-first: affix analysis and token comparison feed the natural sort
//! and the alignment chain; synthesis turns a winning alignment into final
//! tracks. The title normalizer, attribute builder and book matcher wrap
//! the core for one candidate book.

pub mod affix_analyzer;
pub mod attribute_builder;
pub mod book_matcher;
pub mod chapter_aligner;
pub mod natural_sort;
pub mod title_normalizer;
pub mod token_comparator;
pub mod track_synthesizer;

pub use affix_analyzer::{find_common_affixes, find_regular_affixes, strip_common_affixes};
pub use attribute_builder::{
    build_shared_attributes, parse_release_date, parse_series_position, BookDetails, Series,
};
pub use book_matcher::{BookMatcher, MatchJob, MatchReport};
pub use chapter_aligner::{align, validate_inputs, ChapterAligner};
pub use natural_sort::{natural_cmp, natural_sort};
pub use title_normalizer::{clean_search_query, is_likely_match, normalize_book_title};
pub use token_comparator::{specialised_distance, TokenComparator, TokenDistance};
pub use track_synthesizer::{synthesize, synthesize_remote_order};
