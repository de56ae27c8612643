use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shape parameters of a Beta(alpha, beta) shock distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaShape {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaShape {
    pub fn new(alpha: f64, beta: f64) -> Self {
        BetaShape { alpha, beta }
    }

    /// Mean of the distribution: alpha / (alpha + beta)
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn validate(&self, which: &'static str) -> Result<(), ConfigError> {
        if !(self.alpha.is_finite() && self.beta.is_finite())
            || self.alpha <= 0.0
            || self.beta <= 0.0
        {
            return Err(ConfigError::InvalidShape {
                which,
                alpha: self.alpha,
                beta: self.beta,
                reason: "shape parameters must be finite and positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BetaShape {
    fn default() -> Self {
        BetaShape::new(5.0, 1.0)
    }
}

/// Parameters of the entry-exit model and of the backward search
///
/// Fixed for the lifetime of one sampler; every draw from that sampler
/// uses the same threshold and shock laws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Productivity below which an incumbent exits (x)
    pub exit_threshold: f64,
    /// Survival shock law for incumbents
    pub incumbent_shape: BetaShape,
    /// Productivity law for new entrants
    pub entrant_shape: BetaShape,
    /// First horizon tried
    pub base_horizon: usize,
    /// Horizon growth after each failed round
    pub horizon_increment: usize,
    /// Hard bound on the horizon, and on the shock buffers
    pub max_depth: usize,
}

impl ModelParams {
    /// Baseline calibration: x = 0.35, Beta(5, 1) shocks for both laws
    pub fn baseline() -> Self {
        ModelParams {
            exit_threshold: 0.35,
            incumbent_shape: BetaShape::default(),
            entrant_shape: BetaShape::default(),
            base_horizon: 100,
            horizon_increment: 50,
            max_depth: 5000,
        }
    }

    /// Baseline with a different exit threshold
    pub fn with_threshold(exit_threshold: f64) -> Self {
        ModelParams {
            exit_threshold,
            ..Self::baseline()
        }
    }

    /// Check the parameters can drive a sampler
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exit_threshold.is_finite() || self.exit_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.exit_threshold));
        }
        self.incumbent_shape.validate("incumbent")?;
        self.entrant_shape.validate("entrant")?;

        if self.base_horizon < 2 {
            return Err(ConfigError::InvalidHorizon(format!(
                "base_horizon must be at least 2, got {}",
                self.base_horizon
            )));
        }
        if self.horizon_increment == 0 {
            return Err(ConfigError::InvalidHorizon(
                "horizon_increment must be positive".to_string(),
            ));
        }
        if self.max_depth < self.base_horizon {
            return Err(ConfigError::InvalidHorizon(format!(
                "max_depth ({}) is below base_horizon ({})",
                self.max_depth, self.base_horizon
            )));
        }
        Ok(())
    }

    /// Number of rounds a sampler attempts before giving up
    pub fn max_rounds(&self) -> usize {
        let span = self.max_depth - self.base_horizon;
        1 + span.div_ceil(self.horizon_increment)
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_valid() {
        let params = ModelParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.exit_threshold, 0.35);
        assert_eq!(params.base_horizon, 100);
        assert_eq!(params.horizon_increment, 50);
        assert_eq!(params.max_depth, 5000);
    }

    #[test]
    fn beta_mean() {
        let shape = BetaShape::new(5.0, 1.0);
        assert!((shape.mean() - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(BetaShape::new(2.0, 2.0).mean(), 0.5);
    }

    #[test]
    fn threshold_bounds() {
        // Zero and values above one are legitimate extreme cases
        assert!(ModelParams::with_threshold(0.0).validate().is_ok());
        assert!(ModelParams::with_threshold(1.5).validate().is_ok());

        assert!(matches!(
            ModelParams::with_threshold(-0.1).validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert!(matches!(
            ModelParams::with_threshold(f64::NAN).validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn rejects_bad_shapes() {
        let params = ModelParams {
            entrant_shape: BetaShape::new(0.0, 1.0),
            ..Default::default()
        };
        match params.validate() {
            Err(ConfigError::InvalidShape { which, .. }) => assert_eq!(which, "entrant"),
            other => panic!("Expected InvalidShape, got {:?}", other),
        }

        let params = ModelParams {
            incumbent_shape: BetaShape::new(5.0, f64::INFINITY),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_bad_horizons() {
        let zero_increment = ModelParams {
            horizon_increment: 0,
            ..Default::default()
        };
        assert!(zero_increment.validate().is_err());

        let depth_too_small = ModelParams {
            max_depth: 50,
            ..Default::default()
        };
        assert!(depth_too_small.validate().is_err());

        let tiny_base = ModelParams {
            base_horizon: 1,
            ..Default::default()
        };
        assert!(tiny_base.validate().is_err());
    }

    #[test]
    fn max_rounds_counts_capped_final_round() {
        // 100, 150, ..., 5000
        assert_eq!(ModelParams::baseline().max_rounds(), 99);

        // 100, 150, 175 (last step clamped to the bound)
        let params = ModelParams {
            max_depth: 175,
            ..Default::default()
        };
        assert_eq!(params.max_rounds(), 3);

        let single = ModelParams {
            max_depth: 100,
            ..Default::default()
        };
        assert_eq!(single.max_rounds(), 1);
    }
}
