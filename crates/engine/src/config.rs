//! Engine configuration.
//!
//! Every tunable of the scoring pass lives here so one dataset can be
//! scored under different mixes without touching code. Missing fields in a
//! deserialized config fall back to the defaults.

use crate::error::{EngineError, Result};
use data_loader::{MAX_RATING, MIN_RATING, RatingValue};
use pipeline::stages::{BoostMode, DEFAULT_BETA};
use pipeline::{DEFAULT_ALPHA, DEFAULT_CONTENT_SCALE, DEFAULT_STOPWORDS};
use serde::{Deserialize, Serialize};
use sources::{DEFAULT_LIKED_THRESHOLD, DEFAULT_NEIGHBORS, TagWeighting};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// CF weight in the hybrid mix, in [0, 1]
    pub alpha: f32,
    /// Boost per prompt-matching tag, >= 0
    pub beta: f32,
    pub boost_mode: BoostMode,
    /// Neighbourhood size K for CF
    pub neighbors: usize,
    /// Minimum rating for an item to feed the CB profile
    pub liked_threshold: RatingValue,
    /// Multiplier that puts CB cosines on the rating scale
    pub content_scale: f32,
    pub tag_weighting: TagWeighting,
    /// Result count when the caller doesn't pass one
    pub default_top_n: usize,
    /// Drop items with neither CF nor CB signal instead of ranking them last
    pub drop_zero_signal: bool,
    /// Words ignored when parsing prompts
    pub stopwords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            boost_mode: BoostMode::default(),
            neighbors: DEFAULT_NEIGHBORS,
            liked_threshold: DEFAULT_LIKED_THRESHOLD,
            content_scale: DEFAULT_CONTENT_SCALE,
            tag_weighting: TagWeighting::default(),
            default_top_n: 5,
            drop_zero_signal: false,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_boost_mode(mut self, mode: BoostMode) -> Self {
        self.boost_mode = mode;
        self
    }

    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn with_liked_threshold(mut self, threshold: RatingValue) -> Self {
        self.liked_threshold = threshold;
        self
    }

    pub fn with_content_scale(mut self, scale: f32) -> Self {
        self.content_scale = scale;
        self
    }

    pub fn with_tag_weighting(mut self, weighting: TagWeighting) -> Self {
        self.tag_weighting = weighting;
        self
    }

    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn with_drop_zero_signal(mut self, drop: bool) -> Self {
        self.drop_zero_signal = drop;
        self
    }

    pub fn with_stopwords<I, S>(mut self, stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = stopwords.into_iter().map(Into::into).collect();
        self
    }

    /// Reject values the scoring formulas aren't defined for
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(EngineError::InvalidConfig(msg));

        if !(0.0..=1.0).contains(&self.alpha) {
            return invalid(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return invalid(format!("beta must be finite and >= 0, got {}", self.beta));
        }
        if self.neighbors == 0 {
            return invalid("neighbors must be at least 1".to_string());
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.liked_threshold) {
            return invalid(format!(
                "liked_threshold must be in [{}, {}], got {}",
                MIN_RATING, MAX_RATING, self.liked_threshold
            ));
        }
        if !self.content_scale.is_finite() || self.content_scale < 0.0 {
            return invalid(format!(
                "content_scale must be finite and >= 0, got {}",
                self.content_scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.neighbors, 5);
        assert_eq!(config.liked_threshold, 4);
        assert_eq!(config.default_top_n, 5);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad = [
            EngineConfig::default().with_alpha(1.5),
            EngineConfig::default().with_alpha(f32::NAN),
            EngineConfig::default().with_beta(-0.1),
            EngineConfig::default().with_beta(f32::INFINITY),
            EngineConfig::default().with_neighbors(0),
            EngineConfig::default().with_liked_threshold(0),
            EngineConfig::default().with_liked_threshold(6),
            EngineConfig::default().with_content_scale(-1.0),
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(EngineError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{"alpha": 0.5, "boost_mode": "additive", "tag_weighting": "binary"}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.boost_mode, BoostMode::Additive);
        assert_eq!(config.tag_weighting, TagWeighting::Binary);
        assert_eq!(config.beta, DEFAULT_BETA);
        assert!(!config.stopwords.is_empty());
    }
}
