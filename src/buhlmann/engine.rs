//! The Bühlmann ZHL-16C engine: sixteen compartment pairs driven by a gradient-factor
//! ceiling ramp between the first stop and the surface.

use alloc::vec::Vec;

use crate::buhlmann::compartment::BuhlmannCompoundCompartment;
use crate::buhlmann::config::BuhlmannConfig;
use crate::buhlmann::zhl_values::{
    HE_A, HE_B, HE_HALF_LIFE, N2_A, N2_B, N2_HALF_LIFE, N_COMPARTMENTS,
};
use crate::common::deco_engine::DecompressionEngine;
use crate::common::depth::Depth;
use crate::common::dive_step::DiveStep;
use crate::common::error::DiveError;
use crate::common::gas::GasBlend;
use crate::common::time::Time;

/// No-decompression-limit search gives up and reports "effectively unlimited" past this.
const NDL_CUT_OFF_MINUTES: u8 = 99;

#[derive(Clone, Debug)]
pub struct BuhlmannEngine {
    compartments: Vec<BuhlmannCompoundCompartment>,
    low_gf: f64,
    high_gf: f64,
    first_stop: Option<Depth>,
}

impl BuhlmannEngine {
    pub fn new(config: BuhlmannConfig) -> Self {
        let compartments = (0..N_COMPARTMENTS)
            .map(|i| {
                BuhlmannCompoundCompartment::new(
                    (N2_A[i], N2_B[i], N2_HALF_LIFE[i]),
                    (HE_A[i], HE_B[i], HE_HALF_LIFE[i]),
                )
            })
            .collect();
        Self {
            compartments,
            low_gf: config.low_gf,
            high_gf: config.high_gf,
            first_stop: None,
        }
    }

    pub fn config(&self) -> BuhlmannConfig {
        BuhlmannConfig {
            low_gf: self.low_gf,
            high_gf: self.high_gf,
        }
    }

    /// Gradient factor at `depth`: `low_gf` at or below the first stop, ramping linearly
    /// up to `high_gf` at the surface. `low_gf` everywhere until a first stop is set.
    pub fn gf(&self, depth: Depth) -> f64 {
        match self.first_stop {
            None => self.low_gf,
            Some(first_stop) if first_stop.as_meters() <= 0.0 => self.high_gf,
            Some(first_stop) if depth >= first_stop => self.low_gf,
            Some(first_stop) => {
                (first_stop.as_meters() - depth.as_meters()) / first_stop.as_meters()
                    * (self.high_gf - self.low_gf)
                    + self.low_gf
            }
        }
    }

    fn ceilings(&self, depth: Depth) -> Vec<Depth> {
        let gf = self.gf(depth);
        self.compartments
            .iter()
            .map(|c| Depth::from_meters((c.pressure_limit(gf) * 10.0 - 10.0).max(0.0)))
            .collect()
    }

    /// No-decompression limit at `depth` breathing `gas`: minutes of holding before a
    /// ceiling appears, capped at [`NDL_CUT_OFF_MINUTES`].
    pub fn ndl(&self, depth: Depth, gas: GasBlend) -> Time {
        let interval = Time::from_minutes(1.0);
        let mut simulated = self.clone();
        for elapsed in 0..NDL_CUT_OFF_MINUTES {
            let step = DiveStep::new(depth, depth, interval, gas);
            simulated.apply_dive_step(&step).ok();
            let ceiling = simulated
                .ceiling(depth)
                .map(|c| c.as_meters())
                .unwrap_or(0.0);
            if ceiling > 0.0 {
                return interval * (elapsed + 1);
            }
        }
        interval * NDL_CUT_OFF_MINUTES
    }
}

impl DecompressionEngine for BuhlmannEngine {
    fn apply_dive_step(&mut self, step: &DiveStep) -> Result<(), DiveError> {
        for compartment in self.compartments.iter_mut() {
            compartment.apply_dive_step(step);
        }
        Ok(())
    }

    fn undo_last_step(&mut self) {
        for compartment in self.compartments.iter_mut() {
            compartment.undo_last_step();
        }
    }

    fn ceiling(&self, depth: Depth) -> Result<Depth, DiveError> {
        Ok(self
            .ceilings(depth)
            .into_iter()
            .fold(Depth::zero(), |a, b| if b > a { b } else { a }))
    }

    /// Whether the diver can head straight to the surface from `depth`.
    ///
    /// Uses `high_gf` directly rather than the depth-ramped [`Self::gf`] -- surfacing
    /// is only offered once no stop remains, at which point the ramp has already
    /// reached its top end.
    fn can_surface(&self, depth: Depth) -> Result<bool, DiveError> {
        let _ = depth;
        let ceiling = self
            .compartments
            .iter()
            .map(|c| c.pressure_limit(self.high_gf) * 10.0 - 10.0)
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(ceiling <= 0.0)
    }

    fn first_stop(&self) -> Option<Depth> {
        self.first_stop
    }

    fn set_first_stop(&mut self, first_stop: Option<Depth>) {
        self.first_stop = first_stop;
    }
}
