//! Screener configuration

use crate::error::{Result, ScreenError};
use serde::{Deserialize, Serialize};

/// Weights applied to the 1/3/6 month returns in the momentum blend.
///
/// Weights do not have to sum to one; scoring renormalises over whichever
/// horizons are actually available per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumWeights {
    pub w1m: f64,
    pub w3m: f64,
    pub w6m: f64,
}

impl Default for MomentumWeights {
    fn default() -> Self {
        Self {
            w1m: 1.0 / 3.0,
            w3m: 1.0 / 3.0,
            w6m: 1.0 / 3.0,
        }
    }
}

impl MomentumWeights {
    /// Create a new weight set
    pub fn new(w1m: f64, w3m: f64, w6m: f64) -> Self {
        Self { w1m, w3m, w6m }
    }

    /// Sum of all three weights
    pub fn sum(&self) -> f64 {
        self.w1m + self.w3m + self.w6m
    }
}

/// Configuration for a screening run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Momentum blend weights
    pub weights: MomentumWeights,
    /// Minimum AUM in EUR for a dedup winner (0 disables the floor)
    pub aum_floor: f64,
    /// ATR multiple for the trailing exit level, typically 3 to 5
    pub atr_multiplier: f64,
    /// Annualised risk-free rate used by the below-cash filter
    pub risk_free_rate: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            weights: MomentumWeights::default(),
            aum_floor: 100_000_000.0,
            atr_multiplier: 4.0,
            risk_free_rate: 0.035,
        }
    }
}

impl ScreenConfig {
    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (label, value) in [("w1m", w.w1m), ("w3m", w.w3m), ("w6m", w.w6m)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScreenError::InvalidConfig(format!(
                    "momentum weight {} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }
        if w.sum() <= 0.0 {
            return Err(ScreenError::InvalidConfig(
                "momentum weights must not all be zero".to_string(),
            ));
        }
        if !self.aum_floor.is_finite() || self.aum_floor < 0.0 {
            return Err(ScreenError::InvalidConfig(format!(
                "aum_floor must be a non-negative number, got {}",
                self.aum_floor
            )));
        }
        if !self.atr_multiplier.is_finite() || self.atr_multiplier <= 0.0 {
            return Err(ScreenError::InvalidConfig(format!(
                "atr_multiplier must be a positive number, got {}",
                self.atr_multiplier
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ScreenError::InvalidConfig(format!(
                "risk_free_rate must be a number, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.aum_floor, 100_000_000.0);
        assert_eq!(config.atr_multiplier, 4.0);
        assert_eq!(config.risk_free_rate, 0.035);
        assert!((config.weights.sum() - 1.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = ScreenConfig::default();
        config.weights.w3m = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let mut config = ScreenConfig::default();
        config.weights = MomentumWeights::new(0.0, 0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_atr_multiplier() {
        let mut config = ScreenConfig::default();
        config.atr_multiplier = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_floor() {
        let mut config = ScreenConfig::default();
        config.aum_floor = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_uneven_weights_are_valid() {
        let mut config = ScreenConfig::default();
        config.weights = MomentumWeights::new(0.2, 0.3, 0.5);
        assert!(config.validate().is_ok());
    }
}
