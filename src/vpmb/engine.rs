//! The VPM-B engine: sixteen compound compartments tracking bubble crushing history,
//! feeding an iterative fixed-point ceiling and the critical-volume loop's state.

use alloc::vec::Vec;

use crate::buhlmann::zhl_values::{HE_A, HE_B, HE_HALF_LIFE, N2_A, N2_B, N2_HALF_LIFE, N_COMPARTMENTS};
use crate::common::deco_engine::DecompressionEngine;
use crate::common::depth::Depth;
use crate::common::dive_step::DiveStep;
use crate::common::error::DiveError;
use crate::common::time::Time;
use crate::vpmb::compartment::{VpmBCompartment, VpmBCompoundCompartment};
use crate::vpmb::config::VpmBConfig;

/// Critical radius, cm, for nitrogen/helium nuclei before conservatism scaling.
const BASE_CRITICAL_RADIUS_N2: f64 = 0.55;
const BASE_CRITICAL_RADIUS_HE: f64 = 0.45;
/// Per-`conservatism_level` critical-radius multiplier.
const CONSERVATISM_MULTIPLIERS: [f64; 5] = [1.0, 1.05, 1.12, 1.22, 1.35];

/// Ceiling's fixed-point search gives up and reports non-convergence past this.
const CEILING_ITERATION_CAP: u32 = 1000;
const CEILING_CONVERGENCE_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug)]
pub struct VpmBEngine {
    compartments: Vec<VpmBCompoundCompartment>,
    critical_volume_algorithm: bool,
    first_stop: Option<Depth>,
    start_of_deco_zone: Option<Depth>,
    time_start_of_deco_zone: Option<Time>,
    deco_phase_volume_time: Time,
}

impl VpmBEngine {
    pub fn new(config: VpmBConfig) -> Self {
        let multiplier = CONSERVATISM_MULTIPLIERS[config.conservatism_level as usize];
        let n2_radius = BASE_CRITICAL_RADIUS_N2 * multiplier;
        let he_radius = BASE_CRITICAL_RADIUS_HE * multiplier;
        let compartments = (0..N_COMPARTMENTS)
            .map(|i| {
                VpmBCompoundCompartment::new(
                    VpmBCompartment::new(
                        crate::common::gas::Gas::Nitrogen,
                        N2_A[i],
                        N2_B[i],
                        N2_HALF_LIFE[i],
                        n2_radius,
                    ),
                    VpmBCompartment::new(
                        crate::common::gas::Gas::Helium,
                        HE_A[i],
                        HE_B[i],
                        HE_HALF_LIFE[i],
                        he_radius,
                    ),
                )
            })
            .collect();
        Self {
            compartments,
            critical_volume_algorithm: config.critical_volume_algorithm,
            first_stop: None,
            start_of_deco_zone: None,
            time_start_of_deco_zone: None,
            deco_phase_volume_time: Time::zero(),
        }
    }

    pub fn compartments(&self) -> &[VpmBCompoundCompartment] {
        &self.compartments
    }

    pub fn critical_volume_algorithm(&self) -> bool {
        self.critical_volume_algorithm
    }

    pub fn start_of_deco_zone(&self) -> Option<Depth> {
        self.start_of_deco_zone
    }

    pub fn set_start_of_deco_zone(&mut self, depth: Depth) {
        self.start_of_deco_zone = Some(depth);
    }

    pub fn time_start_of_deco_zone(&self) -> Option<Time> {
        self.time_start_of_deco_zone
    }

    pub fn set_time_start_of_deco_zone(&mut self, time: Time) {
        self.time_start_of_deco_zone = Some(time);
    }

    pub fn deco_phase_volume_time(&self) -> Time {
        self.deco_phase_volume_time
    }

    pub fn set_deco_phase_volume_time(&mut self, time: Time) {
        self.deco_phase_volume_time = time;
    }

    /// Regenerate every compartment's critical radius over a dive that lasted
    /// `dive_duration`.
    pub fn nuclear_regeneration(&mut self, dive_duration: Time) {
        for compartment in self.compartments.iter_mut() {
            compartment.nitrogen_mut().nuclear_regeneration(dive_duration.as_seconds());
            compartment.helium_mut().nuclear_regeneration(dive_duration.as_seconds());
        }
    }

    /// Update every compartment's desaturation time from the critical-volume loop's
    /// latest `deco_phase_volume_time`.
    pub fn update_desaturation_times(&mut self) {
        let seconds = self.deco_phase_volume_time.as_seconds();
        for compartment in self.compartments.iter_mut() {
            compartment.update_desaturation_times(seconds);
        }
    }

    /// Maximum `tolerated_ambient_pressure` across all compartments, clamped to >= 0.
    fn max_tolerated_ambient_pressure(&self, depth: Depth) -> Result<f64, DiveError> {
        let mut max = f64::NEG_INFINITY;
        for compartment in &self.compartments {
            let p = compartment.tolerated_ambient_pressure(self.first_stop, depth)?;
            let p = p.max(0.0);
            if p > max {
                max = p;
            }
        }
        Ok(max)
    }
}

impl DecompressionEngine for VpmBEngine {
    fn apply_dive_step(&mut self, step: &DiveStep) -> Result<(), DiveError> {
        for compartment in self.compartments.iter_mut() {
            compartment.apply_dive_step(step)?;
        }
        Ok(())
    }

    fn undo_last_step(&mut self) {
        for compartment in self.compartments.iter_mut() {
            compartment.undo_last_step();
        }
    }

    /// Fixed-point ascent ceiling: iterate `p <- max_compartment.tolerated_ambient_pressure(p)`
    /// from `p = depth/10 + 1` until it settles within 0.01 bar, capped at 1000 passes.
    fn ceiling(&self, depth: Depth) -> Result<Depth, DiveError> {
        let mut pressure = depth.as_meters() / 10.0 + 1.0;
        for _ in 0..CEILING_ITERATION_CAP {
            let probe_depth = Depth::from_meters((pressure - 1.0) * 10.0);
            let next = self.max_tolerated_ambient_pressure(probe_depth)?;
            if (next - pressure).abs() <= CEILING_CONVERGENCE_TOLERANCE {
                return Ok(Depth::from_meters((next - 1.0) * 10.0));
            }
            pressure = next;
        }
        Err(DiveError::NonConvergent)
    }

    /// VPM-B never consults this independently of `ceiling` -- the critical-volume
    /// loop always walks stops down to the surface regardless, so this is simply
    /// whether the ceiling has already reached the surface.
    fn can_surface(&self, depth: Depth) -> Result<bool, DiveError> {
        Ok(self.ceiling(depth)?.as_meters() <= 0.0)
    }

    fn first_stop(&self) -> Option<Depth> {
        self.first_stop
    }

    fn set_first_stop(&mut self, first_stop: Option<Depth>) {
        self.first_stop = first_stop;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::gas::GasBlend;

    #[test]
    fn fresh_engine_has_no_ceiling() {
        let engine = VpmBEngine::new(VpmBConfig::default());
        assert_eq!(engine.ceiling(Depth::zero()).unwrap(), Depth::zero());
    }

    #[test]
    fn deep_long_dive_produces_a_ceiling() {
        let mut engine = VpmBEngine::new(VpmBConfig::default());
        let descent = DiveStep::new(
            Depth::zero(),
            Depth::from_meters(40.0),
            crate::common::time::Time::from_minutes(4.0),
            GasBlend::air(),
        );
        engine.apply_dive_step(&descent).unwrap();
        let hold = DiveStep::new(
            Depth::from_meters(40.0),
            Depth::from_meters(40.0),
            crate::common::time::Time::from_minutes(30.0),
            GasBlend::air(),
        );
        engine.apply_dive_step(&hold).unwrap();
        assert!(engine.ceiling(Depth::from_meters(40.0)).unwrap() > Depth::zero());
    }

    #[test]
    fn conservatism_level_scales_critical_radius() {
        let lax = VpmBEngine::new(VpmBConfig::default().with_conservatism_level(0).unwrap());
        let strict = VpmBEngine::new(VpmBConfig::default().with_conservatism_level(4).unwrap());
        assert!(
            lax.compartments()[0].nitrogen().adjusted_critical_radius()
                < strict.compartments()[0].nitrogen().adjusted_critical_radius()
        );
    }
}
