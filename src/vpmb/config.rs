//! Conservatism configuration for the VPM-B engine.

use crate::common::error::ConfigValidationErr;

/// VPM-B's public tuning knob: a conservatism level `0..=4`, mapped internally onto
/// a per-level critical-radius multiplier, mirroring how [`crate::buhlmann::BuhlmannConfig`]
/// hides raw M-value deltas behind gradient factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VpmBConfig {
    pub conservatism_level: u8,
    /// Whether the critical-volume algorithm iterates to convergence (`true`) or
    /// stops after a single pass through the critical-volume loop (`false`).
    pub critical_volume_algorithm: bool,
}

impl Default for VpmBConfig {
    fn default() -> Self {
        Self {
            conservatism_level: 2,
            critical_volume_algorithm: true,
        }
    }
}

impl VpmBConfig {
    pub fn with_conservatism_level(
        mut self,
        level: u8,
    ) -> Result<Self, ConfigValidationErr<'static>> {
        if level > 4 {
            return Err(ConfigValidationErr {
                field: "conservatism_level",
                reason: "must be between 0 and 4",
            });
        }
        self.conservatism_level = level;
        Ok(self)
    }

    pub fn with_critical_volume_algorithm(mut self, enabled: bool) -> Self {
        self.critical_volume_algorithm = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_level_2_with_cva_on() {
        let config = VpmBConfig::default();
        assert_eq!(config.conservatism_level, 2);
        assert!(config.critical_volume_algorithm);
    }

    #[test]
    fn rejects_level_above_4() {
        let err = VpmBConfig::default().with_conservatism_level(5).unwrap_err();
        assert_eq!(err.field, "conservatism_level");
    }
}
