//! Configuration for abmd-ai
//!
//! Converts the optional `[alignment]` and `[attributes]` TOML sections
//! from `abmd_common::config::TomlConfig` into validated settings with
//! compiled defaults for anything not set.

use crate::services::affix_analyzer::AFFIX_COMMONNESS_THRESHOLD;
use crate::services::chapter_aligner::NOISE_THRESHOLD;
use crate::services::token_comparator::DIGIT_EDIT_COST;
use crate::types::StrategyKind;
use abmd_common::config::{AlignmentSection, AttributeSection, TomlConfig};
use abmd_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the book matcher does when no strategy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Reject the candidate book
    Reject,
    /// Trust remote order, but only when counts match
    RemoteOrder,
}

impl FromStr for UnmatchedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "reject" => Ok(UnmatchedPolicy::Reject),
            "remote_order" => Ok(UnmatchedPolicy::RemoteOrder),
            other => Err(Error::Config(format!(
                "Invalid unmatched_policy '{}' (expected \"reject\" or \"remote_order\")",
                other
            ))),
        }
    }
}

/// Alignment chain settings
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Strategies tried in order; first success wins
    pub strategies: Vec<StrategyKind>,
    /// When false, `TrustedNumbering` is skipped even if listed
    pub trust_local_numbering: bool,
    /// Average title distance below which natural order is trusted
    pub noise_threshold: f64,
    /// Minimum share of titles that must keep content after affix stripping
    pub affix_commonness_threshold: f64,
    /// Cost of an edit touching a digit
    pub digit_edit_cost: u32,
    pub unmatched_policy: UnmatchedPolicy,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::DEFAULT_ORDER.to_vec(),
            trust_local_numbering: true,
            noise_threshold: NOISE_THRESHOLD,
            affix_commonness_threshold: AFFIX_COMMONNESS_THRESHOLD,
            digit_edit_cost: DIGIT_EDIT_COST,
            unmatched_policy: UnmatchedPolicy::Reject,
        }
    }
}

impl AlignmentConfig {
    /// Strategies that will actually run, in order
    pub fn effective_strategies(&self) -> Vec<StrategyKind> {
        self.strategies
            .iter()
            .copied()
            .filter(|s| self.trust_local_numbering || *s != StrategyKind::TrustedNumbering)
            .collect()
    }

    /// Build from the `[alignment]` section, defaulting unset fields
    pub fn from_section(section: &AlignmentSection) -> Result<Self> {
        let defaults = Self::default();

        let strategies = match &section.strategies {
            Some(names) => parse_strategies(names)?,
            None => defaults.strategies,
        };

        let noise_threshold = section.noise_threshold.unwrap_or(defaults.noise_threshold);
        if !noise_threshold.is_finite() || noise_threshold < 0.0 {
            return Err(Error::Config(format!(
                "noise_threshold must be a non-negative number, got {}",
                noise_threshold
            )));
        }

        let affix_commonness_threshold = section
            .affix_commonness_threshold
            .unwrap_or(defaults.affix_commonness_threshold);
        if !(0.0..=1.0).contains(&affix_commonness_threshold) {
            return Err(Error::Config(format!(
                "affix_commonness_threshold must be within 0.0-1.0, got {}",
                affix_commonness_threshold
            )));
        }

        let digit_edit_cost = section.digit_edit_cost.unwrap_or(defaults.digit_edit_cost);
        if digit_edit_cost == 0 {
            return Err(Error::Config("digit_edit_cost must be at least 1".to_string()));
        }

        let unmatched_policy = match &section.unmatched_policy {
            Some(s) => s.parse()?,
            None => defaults.unmatched_policy,
        };

        Ok(Self {
            strategies,
            trust_local_numbering: section
                .trust_local_numbering
                .unwrap_or(defaults.trust_local_numbering),
            noise_threshold,
            affix_commonness_threshold,
            digit_edit_cost,
            unmatched_policy,
        })
    }
}

fn parse_strategies(names: &[String]) -> Result<Vec<StrategyKind>> {
    let mut strategies = Vec::with_capacity(names.len());
    for name in names {
        let kind: StrategyKind = name.parse().map_err(Error::Config)?;
        if strategies.contains(&kind) {
            return Err(Error::Config(format!("Strategy '{}' listed twice", kind)));
        }
        strategies.push(kind);
    }
    Ok(strategies)
}

/// Shared attribute shaping options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOptions {
    /// Append narrators to the artist field
    pub include_narrator_in_artists: bool,
    /// Keep a trailing ", Book N" in the album title
    pub keep_series_reference_in_title: bool,
    /// Keep a subtitle that only restates the series
    pub keep_series_reference_in_subtitle: bool,
}

impl Default for AttributeOptions {
    fn default() -> Self {
        Self {
            include_narrator_in_artists: true,
            keep_series_reference_in_title: true,
            keep_series_reference_in_subtitle: true,
        }
    }
}

impl AttributeOptions {
    pub fn from_section(section: &AttributeSection) -> Self {
        let defaults = Self::default();
        Self {
            include_narrator_in_artists: section
                .include_narrator_in_artists
                .unwrap_or(defaults.include_narrator_in_artists),
            keep_series_reference_in_title: section
                .keep_series_reference_in_title
                .unwrap_or(defaults.keep_series_reference_in_title),
            keep_series_reference_in_subtitle: section
                .keep_series_reference_in_subtitle
                .unwrap_or(defaults.keep_series_reference_in_subtitle),
        }
    }
}

/// All abmd-ai settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiConfig {
    pub log_level: String,
    pub alignment: AlignmentConfig,
    pub attributes: AttributeOptions,
}

impl AiConfig {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        Ok(Self {
            log_level: config.logging.level.clone(),
            alignment: AlignmentConfig::from_section(&config.alignment)?,
            attributes: AttributeOptions::from_section(&config.attributes),
        })
    }
}
