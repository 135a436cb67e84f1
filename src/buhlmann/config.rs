//! Gradient-factor configuration for the Bühlmann ZHL-16C engine.

use crate::common::error::ConfigValidationErr;

/// `(low_gf, high_gf)` as fractions in `0..=1`, conventionally written `30/70` etc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuhlmannConfig {
    pub low_gf: f64,
    pub high_gf: f64,
}

impl Default for BuhlmannConfig {
    fn default() -> Self {
        Self {
            low_gf: 0.3,
            high_gf: 0.7,
        }
    }
}

impl BuhlmannConfig {
    pub fn with_gradient_factors(
        mut self,
        low_gf: f64,
        high_gf: f64,
    ) -> Result<Self, ConfigValidationErr<'static>> {
        if !(0.0..=1.0).contains(&low_gf) {
            return Err(ConfigValidationErr {
                field: "low_gf",
                reason: "must be between 0 and 1",
            });
        }
        if !(0.0..=1.0).contains(&high_gf) {
            return Err(ConfigValidationErr {
                field: "high_gf",
                reason: "must be between 0 and 1",
            });
        }
        if low_gf > high_gf {
            return Err(ConfigValidationErr {
                field: "low_gf",
                reason: "must not exceed high_gf",
            });
        }
        self.low_gf = low_gf;
        self.high_gf = high_gf;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_30_70() {
        let config = BuhlmannConfig::default();
        assert_eq!(config.low_gf, 0.3);
        assert_eq!(config.high_gf, 0.7);
    }

    #[test]
    fn rejects_inverted_gradient_factors() {
        let err = BuhlmannConfig::default()
            .with_gradient_factors(0.8, 0.5)
            .unwrap_err();
        assert_eq!(err.field, "low_gf");
    }

    #[test]
    fn accepts_conservative_values() {
        let config = BuhlmannConfig::default()
            .with_gradient_factors(0.2, 0.8)
            .unwrap();
        assert_eq!(config.high_gf, 0.8);
    }
}
