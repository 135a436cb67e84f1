//! VPM-B tissue compartments: a Bühlmann-style Schreiner tracker extended with
//! bubble crushing-pressure history and the allowable-gradient algebra that bounds
//! ascent instead of a raw M-value.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::cubic::solve_depressed_cubic;
use crate::common::depth::Depth;
use crate::common::dive_step::DiveStep;
use crate::common::error::DiveError;
use crate::common::gas::{Gas, GasBlend};
use crate::common::math_utils::{exp, ln, sqrt};
use crate::common::schreiner::{initial_inert_gas_pressure, schreiner_step, time_constant};

/// VPM-B water-vapor pressure, bar -- distinct from the Bühlmann engine's 0.0627.
pub(crate) const WATER_VAPOUR_PRESSURE: f64 = 0.0493;

/// Surface tension of a bubble skin, bar (γ in the VPM-B literature).
pub const SURFACE_TENSION_GAMMA: f64 = 0.18137175;
/// Skin compression surface tension, bar (γc).
pub const SKIN_COMPRESSION_GAMMA_C: f64 = 2.6040525;
/// Critical-volume parameter λ, bar-minutes.
pub const CRITICAL_VOLUME_LAMBDA: f64 = 199.58;
/// Nuclear-regeneration time constant, seconds (20160 hours).
pub const REGENERATION_TIME_CONSTANT: f64 = 20160.0 * 60.0;

/// One gas's tissue loading plus bubble-mechanics state in a VPM-B compartment.
#[derive(Clone, Debug, PartialEq)]
pub struct VpmBCompartment {
    gas: Gas,
    a: f64,
    b: f64,
    half_life: f64,
    inert_gas_pressure: f64,
    history: Vec<f64>,
    crushing_pressure_history: Vec<f64>,
    adjusted_critical_radius: f64,
    regenerated_radius: f64,
    adjusted_crushing_pressure: f64,
    desaturation_time: Option<f64>,
}

impl VpmBCompartment {
    pub fn new(gas: Gas, a: f64, b: f64, half_life: f64, critical_radius: f64) -> Self {
        let inert_gas_pressure = initial_inert_gas_pressure(gas, WATER_VAPOUR_PRESSURE);
        Self {
            gas,
            a,
            b,
            half_life,
            inert_gas_pressure,
            history: vec![inert_gas_pressure],
            crushing_pressure_history: vec![0.0],
            adjusted_critical_radius: critical_radius,
            regenerated_radius: critical_radius,
            adjusted_crushing_pressure: 0.0,
            desaturation_time: None,
        }
    }

    pub fn gas(&self) -> Gas {
        self.gas
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn inert_gas_pressure(&self) -> f64 {
        self.inert_gas_pressure
    }

    pub fn time_constant(&self) -> f64 {
        time_constant(self.half_life)
    }

    pub fn max_crushing_pressure(&self) -> f64 {
        self.crushing_pressure_history
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn regenerated_radius(&self) -> f64 {
        self.regenerated_radius
    }

    pub fn adjusted_critical_radius(&self) -> f64 {
        self.adjusted_critical_radius
    }

    pub fn desaturation_time(&self) -> Option<f64> {
        self.desaturation_time
    }

    pub fn set_desaturation_time(&mut self, value: f64) {
        self.desaturation_time = Some(value);
    }

    /// Initial allowable gradient from the bubble's present regenerated radius.
    pub fn initial_allowable_gradient(&self) -> f64 {
        2.0 * SURFACE_TENSION_GAMMA * (SKIN_COMPRESSION_GAMMA_C - SURFACE_TENSION_GAMMA)
            / (self.regenerated_radius * SKIN_COMPRESSION_GAMMA_C)
    }

    /// The allowable gradient at the bottom of the dive, folding in the critical-volume
    /// limit once a desaturation time from a prior critical-volume pass is known.
    pub fn bottom_allowable_gradient(&self) -> f64 {
        let Some(desaturation_time) = self.desaturation_time else {
            return self.initial_allowable_gradient();
        };
        let initial = self.initial_allowable_gradient();
        let b = initial
            + (CRITICAL_VOLUME_LAMBDA * SURFACE_TENSION_GAMMA)
                / (SKIN_COMPRESSION_GAMMA_C * desaturation_time);
        let c = SURFACE_TENSION_GAMMA * SURFACE_TENSION_GAMMA
            * CRITICAL_VOLUME_LAMBDA
            * self.adjusted_crushing_pressure
            / (SKIN_COMPRESSION_GAMMA_C * SKIN_COMPRESSION_GAMMA_C * desaturation_time);
        0.5 * (b + sqrt(b * b - 4.0 * c))
    }

    /// Allowable gradient at `depth`, below `first_stop` solved via the depressed cubic
    /// the critical-volume relationship reduces to; above it, equal to the bottom
    /// allowable gradient.
    pub fn allowable_gradient(
        &self,
        first_stop: Option<Depth>,
        depth: Depth,
    ) -> Result<f64, DiveError> {
        let bottom = self.bottom_allowable_gradient();
        match first_stop {
            None => Ok(bottom),
            Some(first_stop) => {
                let pressure = depth.as_meters() / 10.0 + 1.0;
                let first_stop_pressure = first_stop.as_meters() / 10.0 + 1.0;
                let b = bottom * bottom * bottom / (first_stop_pressure + bottom);
                let c = pressure * b;
                solve_depressed_cubic(b, c)
            }
        }
    }

    /// The ambient pressure at which a bubble skin under `crushing_onset_tension`
    /// is in gradient equilibrium -- the same cubic relationship
    /// [`Self::allowable_gradient`] inverts, with `crushing_onset_tension` substituted
    /// for the bottom allowable gradient.
    pub fn inner_pressure(
        &self,
        crushing_onset_tension: f64,
        first_stop: Option<Depth>,
        depth: Depth,
    ) -> Result<f64, DiveError> {
        match first_stop {
            None => Ok(crushing_onset_tension),
            Some(first_stop) => {
                let pressure = depth.as_meters() / 10.0 + 1.0;
                let first_stop_pressure = first_stop.as_meters() / 10.0 + 1.0;
                let b = crate::common::math_utils::powi(crushing_onset_tension, 3)
                    / (first_stop_pressure + crushing_onset_tension);
                let c = pressure * b;
                solve_depressed_cubic(b, c)
            }
        }
    }

    pub fn apply_dive_step(&mut self, step: &DiveStep) {
        self.inert_gas_pressure = schreiner_step(
            step,
            self.gas,
            WATER_VAPOUR_PRESSURE,
            self.half_life,
            self.inert_gas_pressure,
        );
        self.history.push(self.inert_gas_pressure);
    }

    pub fn undo_last_step(&mut self) {
        self.history.pop();
        self.inert_gas_pressure = *self
            .history
            .last()
            .expect("history never empties below its seed");
        self.crushing_pressure_history.pop();
    }

    fn push_crushing_pressure(&mut self, value: f64) {
        self.crushing_pressure_history.push(value);
    }

    /// Regenerate this compartment's critical radius over a dive lasting `dive_time`
    /// seconds, adjusting the crushing pressure so the critical-volume algorithm sees
    /// an equivalent un-regenerated history.
    pub fn nuclear_regeneration(&mut self, dive_time: f64) {
        let crushing_pressure = self.max_crushing_pressure();
        let ending_radius = 1.0
            / (crushing_pressure / (2.0 * (SKIN_COMPRESSION_GAMMA_C - SURFACE_TENSION_GAMMA))
                + 1.0 / self.adjusted_critical_radius);
        self.regenerated_radius = self.adjusted_critical_radius
            + (ending_radius - self.adjusted_critical_radius)
                * exp(-dive_time / REGENERATION_TIME_CONSTANT);
        let ratio = ending_radius * (self.adjusted_critical_radius - self.regenerated_radius)
            / (self.regenerated_radius * (self.adjusted_critical_radius - ending_radius));
        self.adjusted_crushing_pressure = crushing_pressure * ratio;
    }
}

/// Nitrogen/helium pair carrying the same bubble-mechanics bookkeeping as
/// [`VpmBCompartment`], plus the crushing-onset tension that tracks when a
/// compartment most recently transitioned into bubble-forming conditions.
#[derive(Clone, Debug, PartialEq)]
pub struct VpmBCompoundCompartment {
    nitrogen: VpmBCompartment,
    helium: VpmBCompartment,
    crushing_onset_tension_history: Vec<f64>,
}

/// Partial pressure of metabolic gases other than the tracked inert gases, bar.
pub const PRESSURE_OTHER_GASES: f64 = 0.1359888;
/// Gradient below which a compartment is impermeable to bubble growth, bar.
pub const GRADIENT_ONSET_OF_IMPERMEABILITY: f64 = 8.30865;

impl VpmBCompoundCompartment {
    pub fn new(nitrogen: VpmBCompartment, helium: VpmBCompartment) -> Self {
        Self {
            nitrogen,
            helium,
            crushing_onset_tension_history: vec![0.0],
        }
    }

    pub fn nitrogen(&self) -> &VpmBCompartment {
        &self.nitrogen
    }

    pub fn helium(&self) -> &VpmBCompartment {
        &self.helium
    }

    pub fn nitrogen_mut(&mut self) -> &mut VpmBCompartment {
        &mut self.nitrogen
    }

    pub fn helium_mut(&mut self) -> &mut VpmBCompartment {
        &mut self.helium
    }

    pub fn inert_gas_pressure(&self) -> f64 {
        self.nitrogen.inert_gas_pressure() + self.helium.inert_gas_pressure()
    }

    fn crushing_onset_tension(&self) -> f64 {
        *self.crushing_onset_tension_history.last().unwrap_or(&0.0)
    }

    /// Apply `step`, then update each sub-compartment's crushing-pressure history from
    /// the ambient pressure reached at the end of the step (`step.end_depth`, since a
    /// step always starts at the dive's current depth).
    pub fn apply_dive_step(&mut self, step: &DiveStep) -> Result<(), DiveError> {
        self.nitrogen.apply_dive_step(step);
        self.helium.apply_dive_step(step);

        let pressure = step.end_pressure();
        let tension = self.inert_gas_pressure() + PRESSURE_OTHER_GASES;
        let gradient = pressure - tension;

        if gradient <= GRADIENT_ONSET_OF_IMPERMEABILITY {
            self.nitrogen.push_crushing_pressure(gradient);
            self.helium.push_crushing_pressure(gradient);
            self.crushing_onset_tension_history.push(tension);
        } else {
            let onset_tension = self.crushing_onset_tension();
            self.crushing_onset_tension_history.push(onset_tension);
            if step.pressure_rate() <= 0.0 {
                let previous_n = *self
                    .nitrogen
                    .crushing_pressure_history
                    .last()
                    .unwrap_or(&0.0);
                let previous_he = *self.helium.crushing_pressure_history.last().unwrap_or(&0.0);
                self.nitrogen.push_crushing_pressure(previous_n);
                self.helium.push_crushing_pressure(previous_he);
            } else {
                let first_stop = None; // crushing accrues before a first stop exists
                let inner_n = self
                    .nitrogen
                    .inner_pressure(onset_tension, first_stop, step.end_depth)?;
                let inner_he = self
                    .helium
                    .inner_pressure(onset_tension, first_stop, step.end_depth)?;
                self.nitrogen.push_crushing_pressure(pressure - inner_n);
                self.helium.push_crushing_pressure(pressure - inner_he);
            }
        }
        Ok(())
    }

    pub fn undo_last_step(&mut self) {
        self.nitrogen.undo_last_step();
        self.helium.undo_last_step();
        self.crushing_onset_tension_history.pop();
    }

    pub fn allowable_gradient(
        &self,
        first_stop: Option<Depth>,
        depth: Depth,
    ) -> Result<f64, DiveError> {
        let n_gradient = self.nitrogen.allowable_gradient(first_stop, depth)?;
        let he_gradient = self.helium.allowable_gradient(first_stop, depth)?;
        let weighted = n_gradient * self.nitrogen.inert_gas_pressure()
            + he_gradient * self.helium.inert_gas_pressure();
        Ok(weighted / self.inert_gas_pressure())
    }

    pub fn tolerated_ambient_pressure(
        &self,
        first_stop: Option<Depth>,
        depth: Depth,
    ) -> Result<f64, DiveError> {
        let gradient = self.allowable_gradient(first_stop, depth)?;
        Ok(self.inert_gas_pressure() + PRESSURE_OTHER_GASES - gradient)
    }

    pub fn nuclear_regeneration(&mut self, dive_time: f64) {
        self.nitrogen.nuclear_regeneration(dive_time);
        self.helium.nuclear_regeneration(dive_time);
    }

    /// Update both sub-compartments' desaturation times from the surface-phase
    /// integral (Baker's NUMB implementation), given the critical-volume loop's
    /// most recent `deco_phase_volume_time` in seconds.
    pub fn update_desaturation_times(&mut self, deco_phase_volume_time: f64) {
        let inspired_n2 = (1.0 - WATER_VAPOUR_PRESSURE) * GasBlend::air().fraction(Gas::Nitrogen);

        let n2_pressure = self.nitrogen.inert_gas_pressure();
        let he_pressure = self.helium.inert_gas_pressure();

        let surface_phase = if n2_pressure > inspired_n2 {
            let numerator = (n2_pressure - inspired_n2) / self.nitrogen.time_constant()
                + (he_pressure - 0.0) / self.helium.time_constant();
            let denominator = (n2_pressure - inspired_n2) + he_pressure;
            numerator / denominator
        } else if n2_pressure <= inspired_n2 && (he_pressure + n2_pressure) >= inspired_n2 {
            let k_n2 = self.nitrogen.time_constant();
            let k_he = self.helium.time_constant();
            let decay_time_to_zero_gradient =
                1.0 / (k_n2 - k_he) * ln((inspired_n2 - n2_pressure) / he_pressure);

            let integral_gradient_x_time = he_pressure / k_he
                * (1.0 - exp(-k_he * decay_time_to_zero_gradient))
                + (n2_pressure - inspired_n2) / k_n2
                    * (1.0 - exp(-k_n2 * decay_time_to_zero_gradient));

            integral_gradient_x_time / (he_pressure + n2_pressure - inspired_n2)
        } else {
            0.0
        };

        let desaturation_time = deco_phase_volume_time / 60.0 + surface_phase;
        self.nitrogen.set_desaturation_time(desaturation_time);
        self.helium.set_desaturation_time(desaturation_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::depth::Depth;
    use crate::common::gas::GasBlend;
    use crate::common::time::Time;

    fn compound() -> VpmBCompoundCompartment {
        VpmBCompoundCompartment::new(
            VpmBCompartment::new(Gas::Nitrogen, 1.1696, 0.5578, 5.0, 0.55),
            VpmBCompartment::new(Gas::Helium, 1.6189, 0.4770, 1.88, 0.45),
        )
    }

    #[test]
    fn fresh_compartment_has_zero_crushing_pressure() {
        let c = compound();
        assert_eq!(c.nitrogen().max_crushing_pressure(), 0.0);
    }

    #[test]
    fn applying_a_descent_updates_crushing_pressure_history_len() {
        let mut c = compound();
        let step = DiveStep::new(
            Depth::zero(),
            Depth::from_meters(40.0),
            Time::from_minutes(4.0),
            GasBlend::air(),
        );
        c.apply_dive_step(&step).unwrap();
        assert_eq!(c.nitrogen().crushing_pressure_history.len(), 2);
    }

    #[test]
    fn undo_restores_inert_gas_pressure_and_crushing_history() {
        let mut c = compound();
        let step = DiveStep::new(
            Depth::zero(),
            Depth::from_meters(40.0),
            Time::from_minutes(4.0),
            GasBlend::air(),
        );
        let before = c.inert_gas_pressure();
        let before_len = c.nitrogen().crushing_pressure_history.len();
        c.apply_dive_step(&step).unwrap();
        c.undo_last_step();
        assert!((c.inert_gas_pressure() - before).abs() < 1e-12);
        assert_eq!(c.nitrogen().crushing_pressure_history.len(), before_len);
    }

    #[test]
    fn allowable_gradient_without_first_stop_is_bottom_gradient() {
        let c = compound();
        let gradient = c.allowable_gradient(None, Depth::from_meters(30.0)).unwrap();
        let bottom_n = c.nitrogen.bottom_allowable_gradient();
        let bottom_he = c.helium.bottom_allowable_gradient();
        let weighted = (bottom_n * c.nitrogen.inert_gas_pressure()
            + bottom_he * c.helium.inert_gas_pressure())
            / c.inert_gas_pressure();
        assert!((gradient - weighted).abs() < 1e-9);
    }
}
