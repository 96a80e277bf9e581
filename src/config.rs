use serde::{Deserialize, Serialize};

use crate::error::{VoronoiError, VoronoiResult};
use crate::geometry::{Tolerance, DEFAULT_EPSILON};

/// Settings for building a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Margin added around the drawing surface on every side.
    pub padding: f64,
    /// Relative epsilon for all approximate comparisons.
    pub epsilon: f64,
    /// Site jitter, in multiples of `epsilon` times the largest coordinate.
    pub jitter_scale: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            epsilon: DEFAULT_EPSILON,
            jitter_scale: 100.0,
        }
    }
}

impl DiagramConfig {
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn tolerance(&self) -> VoronoiResult<Tolerance> {
        Tolerance::new(self.epsilon)
    }

    pub fn validate(&self) -> VoronoiResult<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(VoronoiError::InvalidPadding { padding: self.padding });
        }
        self.tolerance()?;
        if !self.jitter_scale.is_finite() || self.jitter_scale < 0.0 {
            return Err(VoronoiError::Config(format!(
                "jitter_scale must be finite and non-negative, got {}",
                self.jitter_scale
            )));
        }
        Ok(())
    }
}

/// Settings for rounding cell corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    pub enabled: bool,
    /// Maximum distance from a corner at which the rounding curve starts.
    pub max_smoothing: f64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_smoothing: 40.0,
        }
    }
}

impl RoundingConfig {
    pub fn validate(&self) -> VoronoiResult<()> {
        if !self.max_smoothing.is_finite() || self.max_smoothing < 0.0 {
            return Err(VoronoiError::InvalidRoundingDistance { distance: self.max_smoothing });
        }
        Ok(())
    }

    /// Distance actually used for rounding; zero when rounding is switched off.
    pub fn effective_distance(&self) -> f64 {
        if self.enabled && self.max_smoothing > 0.0 { self.max_smoothing } else { 0.0 }
    }
}
