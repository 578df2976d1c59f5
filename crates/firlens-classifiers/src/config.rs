//! Configuration for training and scoring

use firlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Laplace smoothing constant
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,

    /// Lower bound applied to class priors
    #[serde(default = "default_prior_floor")]
    pub prior_floor: f64,

    /// Criminal-incident probability required when no violent-crime keyword is present
    #[serde(default = "default_min_fir_confidence")]
    pub min_fir_confidence: f64,

    /// Maximum number of stored complaints read per training run
    #[serde(default = "default_record_limit")]
    pub record_limit: usize,

    /// Upper bound on the record fetch; `None` waits indefinitely
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: default_smoothing_alpha(),
            prior_floor: default_prior_floor(),
            min_fir_confidence: default_min_fir_confidence(),
            record_limit: default_record_limit(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    /// Reject values that would break scoring
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_alpha.is_finite() && self.smoothing_alpha > 0.0) {
            return Err(Error::config(format!(
                "smoothing_alpha must be positive, got {}",
                self.smoothing_alpha
            )));
        }
        if !(self.prior_floor > 0.0 && self.prior_floor <= 0.5) {
            return Err(Error::config(format!(
                "prior_floor must be in (0, 0.5], got {}",
                self.prior_floor
            )));
        }
        if !(0.0..=1.0).contains(&self.min_fir_confidence) {
            return Err(Error::config(format!(
                "min_fir_confidence must be in [0, 1], got {}",
                self.min_fir_confidence
            )));
        }
        if self.record_limit == 0 {
            return Err(Error::config("record_limit must be at least 1"));
        }
        Ok(())
    }

    /// Fetch bound as a duration
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

fn default_smoothing_alpha() -> f64 {
    1.0
}

fn default_prior_floor() -> f64 {
    1e-6
}

fn default_min_fir_confidence() -> f64 {
    0.6
}

fn default_record_limit() -> usize {
    2000
}

fn default_fetch_timeout_secs() -> Option<u64> {
    Some(30)
}
