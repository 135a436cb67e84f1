//! The dive ledger: an ordered, undoable log of [`DiveStep`]s fanned out to a
//! decompression engine and the auxiliary O2-toxicity/consumption trackers, plus the
//! ascent scheduler that turns a ceiling into a staged decompression profile.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::common::consumption::GasConsumptionModel;
use crate::common::deco_engine::{DecoEngine, DecompressionEngine};
use crate::common::depth::Depth;
use crate::common::dive_step::DiveStep;
use crate::common::error::DiveError;
use crate::common::gas::GasBlend;
use crate::common::math_utils::{ceil, floor};
use crate::common::ox_tox::{CnsOxToxicity, PulmonaryOxToxicity};
use crate::common::time::Time;

/// Default rate for `descend`/`ascend` convenience methods, meters/minute.
pub const DEFAULT_RATE: f64 = 10.0;
/// Rounding interval between decompression stops, meters.
const STOP_INTERVAL: f64 = 3.0;
/// Bisection starting window for `find_stop_length`, minutes.
const STOP_LENGTH_INITIAL_DT: f64 = 64.0;
/// `find_stop_length` stops refining once its window shrinks to this, minutes.
const STOP_LENGTH_MIN_DT: f64 = 1.0;
/// Iteration caps for the bisection-based sub-searches, mirroring `ceiling`'s cap.
const SEARCH_ITERATION_CAP: u32 = 1000;
/// Critical-volume loop converges once successive phase-volume times differ by less
/// than this, minutes.
const CVA_CONVERGENCE_TOLERANCE_MIN: f64 = 1.0;

/// One committed stop in a decompression schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompressionStop {
    pub depth: Depth,
    pub duration: Time,
    pub gas: GasBlend,
}

/// Where a Bühlmann schedule anchors `first_stop`, which in turn anchors the
/// gradient-factor ramp. VPM-B never reads this -- its first stop is re-derived from
/// the ceiling on every critical-volume-loop pass instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstStopAnchor {
    /// The exact (unrounded) ceiling at the moment decompression begins.
    CeilingAtStartOfDeco,
    /// That ceiling rounded up to the next multiple of the stop interval.
    RoundedCeilingAtStartOfDeco,
    /// The depth of the first stop actually committed to, once the rounding search
    /// settles.
    FirstActualStop,
}

/// Scheduler tuning that differs between the two decompression engines, mirroring the
/// original's differing per-model class-attribute defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerSettings {
    pub last_stop: Depth,
    pub first_stop_anchor: FirstStopAnchor,
    pub gas_switch_time: Time,
    pub include_ascent_to_stop_in_stop: bool,
    pub ascend_before_ceiling_check: bool,
    pub switch_only_at_required_stop: bool,
}

impl SchedulerSettings {
    pub fn buhlmann() -> Self {
        Self {
            last_stop: Depth::from_meters(6.0),
            first_stop_anchor: FirstStopAnchor::CeilingAtStartOfDeco,
            gas_switch_time: Time::from_minutes(1.0),
            include_ascent_to_stop_in_stop: true,
            ascend_before_ceiling_check: true,
            switch_only_at_required_stop: false,
        }
    }

    pub fn vpmb() -> Self {
        Self {
            last_stop: Depth::from_meters(6.0),
            first_stop_anchor: FirstStopAnchor::CeilingAtStartOfDeco,
            gas_switch_time: Time::zero(),
            include_ascent_to_stop_in_stop: true,
            ascend_before_ceiling_check: false,
            switch_only_at_required_stop: true,
        }
    }
}

/// A dive in progress: the step ledger, the decompression engine it drives, and the
/// auxiliary physiological-load trackers riding along on every step.
#[derive(Clone, Debug)]
pub struct Dive {
    steps: Vec<DiveStep>,
    decompression_steps: Vec<DiveStep>,
    in_decompression: bool,
    depth: Depth,
    duration: Time,
    bottom_gas: GasBlend,
    current_gas: GasBlend,
    deco_gases: Vec<(Depth, GasBlend)>,
    engine: DecoEngine,
    pulmonary: PulmonaryOxToxicity,
    cns: CnsOxToxicity,
    consumption: GasConsumptionModel,
    settings: SchedulerSettings,
}

impl Dive {
    pub fn new(engine: DecoEngine, bottom_gas: GasBlend) -> Self {
        let settings = match engine {
            DecoEngine::Buhlmann(_) => SchedulerSettings::buhlmann(),
            DecoEngine::VpmB(_) => SchedulerSettings::vpmb(),
        };
        Self {
            steps: Vec::new(),
            decompression_steps: Vec::new(),
            in_decompression: false,
            depth: Depth::zero(),
            duration: Time::zero(),
            bottom_gas,
            current_gas: bottom_gas,
            deco_gases: Vec::new(),
            engine,
            pulmonary: PulmonaryOxToxicity::default(),
            cns: CnsOxToxicity::default(),
            consumption: GasConsumptionModel::default(),
            settings,
        }
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    pub fn gas(&self) -> GasBlend {
        self.current_gas
    }

    pub fn steps(&self) -> &[DiveStep] {
        &self.steps
    }

    pub fn decompression_steps(&self) -> &[DiveStep] {
        &self.decompression_steps
    }

    pub fn in_decompression(&self) -> bool {
        self.in_decompression
    }

    pub fn engine(&self) -> &DecoEngine {
        &self.engine
    }

    pub fn pulmonary_oxygen_toxicity(&self) -> &PulmonaryOxToxicity {
        &self.pulmonary
    }

    pub fn cns_oxygen_toxicity(&self) -> &CnsOxToxicity {
        &self.cns
    }

    pub fn consumption(&self) -> &GasConsumptionModel {
        &self.consumption
    }

    /// Register a deco gas, usable at or below `max_operating_depth`.
    pub fn add_deco_gas(&mut self, max_operating_depth: Depth, gas: GasBlend) {
        self.deco_gases.push((max_operating_depth, gas));
    }

    pub fn scheduler_settings(&self) -> SchedulerSettings {
        self.settings
    }

    /// Override the scheduler's tuning (`last_stop`, `first_stop_anchor`,
    /// `gas_switch_time`, and the two scheduling-strategy flags) ahead of a call to
    /// [`Self::decompress`].
    pub fn set_scheduler_settings(&mut self, settings: SchedulerSettings) {
        self.settings = settings;
    }

    /// Convenience for the common case of only overriding the final stop depth.
    pub fn set_last_stop(&mut self, last_stop: Depth) {
        self.settings.last_stop = last_stop;
    }

    pub fn descend(&mut self, to: Depth) -> Result<(), DiveError> {
        self.descend_at_rate(to, DEFAULT_RATE)
    }

    pub fn descend_at_rate(&mut self, to: Depth, rate: f64) -> Result<(), DiveError> {
        self.travel_at_rate(to, rate)
    }

    pub fn ascend(&mut self, to: Depth) -> Result<(), DiveError> {
        self.ascend_at_rate(to, DEFAULT_RATE)
    }

    pub fn ascend_at_rate(&mut self, to: Depth, rate: f64) -> Result<(), DiveError> {
        self.travel_at_rate(to, rate)
    }

    fn travel_at_rate(&mut self, to: Depth, rate: f64) -> Result<(), DiveError> {
        if rate <= 0.0 || to == self.depth {
            return self.stay(0.0);
        }
        let minutes = (to.as_meters() - self.depth.as_meters()).abs() / rate;
        let step = DiveStep::new(self.depth, to, Time::from_minutes(minutes), self.current_gas);
        self.apply_step(step)
    }

    pub fn stay(&mut self, minutes: f64) -> Result<(), DiveError> {
        let step = DiveStep::new(
            self.depth,
            self.depth,
            Time::from_minutes(minutes),
            self.current_gas,
        );
        self.apply_step(step)
    }

    /// Switch to `gas` at the current depth, charging `switch_time` as a zero-rate step.
    pub fn switch_gas(&mut self, gas: GasBlend, switch_time: Time) -> Result<(), DiveError> {
        if !gas.approx_eq(&self.current_gas) {
            let allowed = self
                .deco_gases
                .iter()
                .any(|(depth, g)| g.approx_eq(&gas) && self.depth <= *depth);
            if !allowed && !gas.approx_eq(&self.bottom_gas) {
                return Err(DiveError::InvalidGasSwitch);
            }
        }
        let step = DiveStep::new(self.depth, self.depth, switch_time, gas);
        self.apply_step(step)?;
        self.current_gas = gas;
        Ok(())
    }

    /// Canonical appender: routes into `steps` or `decompression_steps` and fans the
    /// step out to every model.
    pub fn apply_step(&mut self, step: DiveStep) -> Result<(), DiveError> {
        self.engine.apply_dive_step(&step)?;
        self.pulmonary.apply_dive_step(&step);
        self.cns.apply_dive_step(&step);
        self.consumption.apply_dive_step(&step);

        self.depth = step.end_depth;
        self.duration += step.time;
        self.current_gas = step.gas;

        if self.in_decompression {
            self.decompression_steps.push(step);
        } else {
            self.steps.push(step);
        }
        Ok(())
    }

    pub fn undo_last_step(&mut self) -> Result<(), DiveError> {
        let popped = if self.in_decompression && !self.decompression_steps.is_empty() {
            self.decompression_steps.pop()
        } else {
            self.steps.pop()
        };
        let Some(step) = popped else {
            return Err(DiveError::Underflow);
        };

        self.engine.undo_last_step();
        self.pulmonary.undo_last_step();
        self.cns.undo_last_step();
        self.consumption.undo_last_step();

        self.depth = step.start_depth;
        self.duration = self.duration - step.time;
        self.current_gas = self
            .decompression_steps
            .last()
            .or(self.steps.last())
            .map(|s| s.gas)
            .unwrap_or(self.bottom_gas);
        Ok(())
    }

    pub fn undo_steps(&mut self, n: usize) -> Result<(), DiveError> {
        for _ in 0..n {
            self.undo_last_step()?;
        }
        Ok(())
    }

    /// Undo all decompression steps, clear `in_decompression`, and reset the engine's
    /// first stop -- the starting point for a fresh critical-volume loop pass.
    pub fn reset(&mut self) -> Result<(), DiveError> {
        while !self.decompression_steps.is_empty() {
            self.undo_last_step()?;
        }
        self.in_decompression = false;
        self.engine.set_first_stop(None);
        Ok(())
    }

    pub fn ceiling(&self) -> Result<Depth, DiveError> {
        self.engine.ceiling(self.depth)
    }

    pub fn can_surface(&self) -> Result<bool, DiveError> {
        self.engine.can_surface(self.depth)
    }

    /// The best registered deco gas usable at `depth`, if richer than the bottom gas.
    fn gas_for_depth(&self, depth: Depth) -> Option<GasBlend> {
        self.deco_gases
            .iter()
            .filter(|(switch_depth, _)| *switch_depth >= depth)
            .min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap())
            .map(|(_, gas)| *gas)
    }

    /// Whether a dive at `target` depth would be within the decompression ceiling.
    pub fn can_ascend(&mut self, target: Depth) -> Result<bool, DiveError> {
        if self.settings.ascend_before_ceiling_check {
            self.travel_at_rate(target, DEFAULT_RATE)?;
            let ceiling = self.engine.ceiling(target)?;
            self.undo_last_step()?;
            Ok(ceiling <= target)
        } else {
            let ceiling = self.engine.ceiling(self.depth)?;
            Ok(ceiling <= target)
        }
    }

    /// Ascend to `target`, switching to the best available deco gas along the way.
    /// Returns the committed steps so the caller can undo them as a unit.
    pub fn ascend_check_switch(&mut self, target: Depth) -> Result<Vec<DiveStep>, DiveError> {
        let in_decompression = self.in_decompression;
        let before = if in_decompression {
            self.decompression_steps.len()
        } else {
            self.steps.len()
        };

        if self.settings.switch_only_at_required_stop {
            self.travel_at_rate(target, DEFAULT_RATE)?;
            self.maybe_switch_gas(target)?;
        } else {
            loop {
                let next_switch = self
                    .deco_gases
                    .iter()
                    .filter(|(depth, _)| *depth < self.depth && *depth >= target)
                    .map(|(depth, _)| *depth)
                    .fold(None, |acc: Option<Depth>, d| {
                        Some(acc.map_or(d, |a| if d > a { d } else { a }))
                    });
                match next_switch {
                    None => break,
                    Some(switch_depth) => {
                        self.travel_at_rate(switch_depth, DEFAULT_RATE)?;
                        self.maybe_switch_gas(switch_depth)?;
                    }
                }
            }
            self.travel_at_rate(target, DEFAULT_RATE)?;
        }

        let ledger = if in_decompression {
            &self.decompression_steps
        } else {
            &self.steps
        };
        Ok(ledger[before..].to_vec())
    }

    fn maybe_switch_gas(&mut self, at_depth: Depth) -> Result<(), DiveError> {
        if let Some(gas) = self.gas_for_depth(at_depth) {
            if !gas.approx_eq(&self.current_gas) {
                self.switch_gas(gas, self.settings.gas_switch_time)?;
            }
        }
        Ok(())
    }

    /// `d - 3` rounded up to a multiple of 3 above `last_stop`, or 0 when `d <= last_stop`.
    fn next_stop_depth(&self, d: Depth) -> Depth {
        let last_stop = self.settings.last_stop.as_meters();
        if d.as_meters() <= last_stop {
            return Depth::zero();
        }
        let candidate = d.as_meters() - STOP_INTERVAL;
        if candidate < last_stop {
            return Depth::zero();
        }
        let rounded = ceil((candidate - last_stop) / STOP_INTERVAL) * STOP_INTERVAL + last_stop;
        Depth::from_meters(rounded)
    }

    /// Locate the first decompression stop by probing progressively shallower rounded
    /// ceilings until the rounding stabilizes.
    pub fn find_first_stop(&mut self) -> Result<(), DiveError> {
        let mut ceiling = self.ceiling()?.as_meters();
        let mut c = ceil(ceiling / STOP_INTERVAL) * STOP_INTERVAL;

        match self.settings.first_stop_anchor {
            FirstStopAnchor::CeilingAtStartOfDeco => {
                self.engine.set_first_stop(Some(Depth::from_meters(ceiling)));
            }
            FirstStopAnchor::RoundedCeilingAtStartOfDeco => {
                self.engine.set_first_stop(Some(Depth::from_meters(c)));
            }
            FirstStopAnchor::FirstActualStop => {}
        }

        for _ in 0..SEARCH_ITERATION_CAP {
            if !self.can_ascend(Depth::from_meters(c))? {
                break;
            }
            self.travel_at_rate(Depth::from_meters(c), DEFAULT_RATE)?;
            ceiling = self.ceiling()?.as_meters();
            self.undo_last_step()?;
            let next_c = ceil(ceiling / STOP_INTERVAL) * STOP_INTERVAL;
            if (next_c - c).abs() < 1e-9 {
                c = next_c;
                break;
            }
            c = next_c;
        }

        let rounded_first_stop = Depth::from_meters(c);
        let candidate = self.next_stop_depth(rounded_first_stop);
        let actual_first_stop = if self.can_ascend(candidate)? {
            self.ascend_check_switch(candidate)?;
            candidate
        } else {
            self.ascend_check_switch(rounded_first_stop)?;
            rounded_first_stop
        };

        if self.settings.first_stop_anchor == FirstStopAnchor::FirstActualStop {
            self.engine.set_first_stop(Some(actual_first_stop));
        }
        Ok(())
    }

    /// Bisection search for how long to hold at the current stop so ascent to the
    /// next stop stays within the ceiling.
    pub fn find_stop_length(&mut self, ascent_time_min: f64) -> Result<DecompressionStop, DiveError> {
        let depth = self.depth;
        let gas = self.current_gas;
        let mut dt = STOP_LENGTH_INITIAL_DT;
        let mut ts = -ascent_time_min;

        self.stay(ts + dt)?;
        let next = self.next_stop_depth(depth);

        for _ in 0..SEARCH_ITERATION_CAP {
            if dt <= STOP_LENGTH_MIN_DT {
                break;
            }
            if !self.can_ascend(next)? {
                self.undo_last_step()?;
                ts += dt;
                self.stay(ts + dt)?;
                continue;
            }
            self.undo_last_step()?;
            dt /= 2.0;
            self.stay(ts + dt)?;
        }

        if !self.can_ascend(next)? {
            self.undo_last_step()?;
            dt += 1.0;
            self.stay(ts + dt)?;
        }

        let total = if self.settings.include_ascent_to_stop_in_stop {
            ts + dt + ascent_time_min
        } else {
            ts + dt
        };
        Ok(DecompressionStop {
            depth,
            duration: Time::from_minutes(total.max(0.0)),
            gas,
        })
    }

    /// Drain the decompression profile into a committed list of stops, leaving
    /// `decompression_steps` populated with the steps that realize it.
    pub fn decompress(&mut self) -> Result<Vec<DecompressionStop>, DiveError> {
        match self.engine {
            DecoEngine::Buhlmann(_) => self.decompress_buhlmann(),
            DecoEngine::VpmB(_) => self.decompress_vpmb(),
        }
    }

    fn decompress_buhlmann(&mut self) -> Result<Vec<DecompressionStop>, DiveError> {
        self.in_decompression = true;
        let mut stops = Vec::new();

        if self.can_surface()? {
            self.ascend_check_switch(Depth::zero())?;
            return Ok(stops);
        }

        self.find_first_stop()?;

        let mut ascent_time = 0.0;
        while self.depth.as_meters() > 0.0 {
            let stop = self.find_stop_length(ascent_time)?;
            stops.push(stop);
            let next = self.next_stop_depth(self.depth);
            let committed = self.ascend_check_switch(next)?;
            ascent_time = committed.iter().map(|s| s.minutes()).sum();
        }
        Ok(stops)
    }

    fn decompress_vpmb(&mut self) -> Result<Vec<DecompressionStop>, DiveError> {
        let Some(vpmb) = self.engine.as_vpmb() else {
            unreachable!("decompress_vpmb called on a non-VPM-B engine")
        };
        let cva = vpmb.critical_volume_algorithm();

        let dive_duration = self.duration;
        if let Some(engine) = self.engine.as_vpmb_mut() {
            engine.nuclear_regeneration(dive_duration);
        }

        let start_of_deco_zone = self.calculate_start_of_deco_zone()?;
        if let Some(engine) = self.engine.as_vpmb_mut() {
            engine.set_start_of_deco_zone(start_of_deco_zone);
        }

        self.in_decompression = true;
        self.ascend_check_switch(start_of_deco_zone)?;
        let time_start_of_deco_zone = self.duration;
        if let Some(engine) = self.engine.as_vpmb_mut() {
            engine.set_time_start_of_deco_zone(time_start_of_deco_zone);
            engine.set_deco_phase_volume_time(Time::zero());
        }

        let mut last_phase_volume_time = 0.0;
        let mut stops = Vec::new();

        for _ in 0..SEARCH_ITERATION_CAP {
            if self.depth != start_of_deco_zone {
                self.ascend_check_switch(start_of_deco_zone)?;
            }

            let ceiling = self.ceiling()?.as_meters();
            let last_stop = self.settings.last_stop.as_meters();
            let first_stop_depth = if ceiling <= 0.0 {
                0.0
            } else {
                ceil((ceiling - last_stop) / STOP_INTERVAL) * STOP_INTERVAL + last_stop
            };

            if first_stop_depth > start_of_deco_zone.as_meters() {
                return Err(DiveError::StepTooLarge);
            }

            self.engine.set_first_stop(Some(Depth::from_meters(first_stop_depth)));

            if first_stop_depth == 0.0 {
                self.ascend_check_switch(Depth::zero())?;
                return Ok(stops);
            }

            stops.clear();
            let mut ascent_time = 0.0;
            let mut stop_depth = Depth::from_meters(first_stop_depth);
            loop {
                let committed = self.ascend_check_switch(stop_depth)?;
                ascent_time += committed.iter().map(|s| s.minutes()).sum::<f64>();
                if self.depth.as_meters() == 0.0 {
                    break;
                }
                let stop = self.find_stop_length(ascent_time - floor(ascent_time))?;
                stops.push(stop);
                stop_depth = self.next_stop_depth(self.depth);
                ascent_time = 0.0;
            }

            let phase_volume_time = (self.duration - time_start_of_deco_zone).as_minutes();
            if let Some(engine) = self.engine.as_vpmb_mut() {
                engine.set_deco_phase_volume_time(Time::from_minutes(phase_volume_time));
                engine.update_desaturation_times();
            }

            if !cva || (phase_volume_time - last_phase_volume_time).abs() <= CVA_CONVERGENCE_TOLERANCE_MIN
            {
                return Ok(stops);
            }
            last_phase_volume_time = phase_volume_time;
            self.reset()?;
            self.in_decompression = true;
        }
        Err(DiveError::NonConvergent)
    }

    /// Per-compartment bisection for the shallowest depth at which the leading
    /// compartment's inert-gas tension first exceeds ambient pressure.
    fn calculate_start_of_deco_zone(&mut self) -> Result<Depth, DiveError> {
        let Some(vpmb) = self.engine.as_vpmb() else {
            unreachable!("calculate_start_of_deco_zone called on a non-VPM-B engine")
        };
        let pressure_other_gases = crate::vpmb::compartment::PRESSURE_OTHER_GASES;
        let n_compartments = vpmb.compartments().len();

        let mut deepest = 0.0;
        for i in 0..n_compartments {
            let mut depth_change = self.depth.as_meters() / 2.0;
            let mut target_depth = self.depth.as_meters() - depth_change;
            while depth_change >= 0.01 {
                depth_change /= 2.0;
                let probe_target = Depth::from_meters(target_depth);
                let committed = self.ascend_check_switch(probe_target)?;

                let Some(vpmb) = self.engine.as_vpmb() else {
                    unreachable!()
                };
                let tension = vpmb.compartments()[i].inert_gas_pressure() + pressure_other_gases;
                let in_deco_zone = tension > target_depth / 10.0 + 1.0;

                self.undo_steps(committed.len())?;

                if in_deco_zone {
                    target_depth += depth_change;
                } else {
                    target_depth -= depth_change;
                }
            }
            if target_depth > deepest {
                deepest = target_depth;
            }
        }
        Ok(Depth::from_meters(deepest))
    }

    /// A fixed tabular rendering of the committed step ledger.
    pub fn markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("| Step | Depth | Duration | Runtime | Gas |\n");
        out.push_str("|---|---|---|---|---|\n");
        let mut runtime = Time::zero();
        for step in self.steps.iter().chain(self.decompression_steps.iter()) {
            runtime += step.time;
            let marker = if step.is_hold() {
                "\u{25a0}"
            } else if step.end_depth > step.start_depth {
                "\u{2798}"
            } else {
                "\u{279a}"
            };
            let gas_name = step.gas.short_name().unwrap_or_else(|_| String::from("?"));
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                marker,
                step.end_depth,
                format_hhmmss(step.time.as_seconds()),
                format_hhmmss(runtime.as_seconds()),
                gas_name,
            ));
        }
        out
    }
}

fn format_hhmmss(total_seconds: f64) -> String {
    let total_seconds = total_seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Rebuild `steps` as an equivalent sequence in which every step is at most
/// `interval_s` seconds long; the final remainder step holds the residual duration.
pub fn reinterpolate(steps: &[DiveStep], interval_s: f64) -> Vec<DiveStep> {
    let mut out = Vec::new();
    for step in steps {
        if step.time.as_seconds() <= interval_s || interval_s <= 0.0 {
            out.push(*step);
            continue;
        }
        let total_seconds = step.time.as_seconds();
        let mut elapsed = 0.0;
        while elapsed < total_seconds {
            let chunk = (total_seconds - elapsed).min(interval_s);
            let fraction_start = elapsed / total_seconds;
            let fraction_end = (elapsed + chunk) / total_seconds;
            let start_depth = step.start_depth
                + (step.end_depth - step.start_depth) * fraction_start;
            let end_depth = step.start_depth + (step.end_depth - step.start_depth) * fraction_end;
            out.push(DiveStep::new(
                start_depth,
                end_depth,
                Time::from_seconds(chunk),
                step.gas,
            ));
            elapsed += chunk;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buhlmann::{BuhlmannConfig, BuhlmannEngine};
    use crate::vpmb::{VpmBConfig, VpmBEngine};

    fn buhlmann_dive() -> Dive {
        Dive::new(
            DecoEngine::Buhlmann(BuhlmannEngine::new(BuhlmannConfig::default())),
            GasBlend::air(),
        )
    }

    #[test]
    fn descend_and_stay_update_depth_and_duration() {
        let mut dive = buhlmann_dive();
        dive.descend(Depth::from_meters(30.0)).unwrap();
        dive.stay(20.0).unwrap();
        assert_eq!(dive.depth(), Depth::from_meters(30.0));
        assert!(dive.duration().as_minutes() > 20.0);
    }

    #[test]
    fn undo_restores_prior_depth() {
        let mut dive = buhlmann_dive();
        dive.descend(Depth::from_meters(30.0)).unwrap();
        dive.undo_last_step().unwrap();
        assert_eq!(dive.depth(), Depth::zero());
    }

    #[test]
    fn undo_past_start_is_an_error() {
        let mut dive = buhlmann_dive();
        assert_eq!(dive.undo_last_step().unwrap_err(), DiveError::Underflow);
    }

    #[test]
    fn shallow_short_dive_can_surface_directly() {
        let mut dive = buhlmann_dive();
        dive.descend(Depth::from_meters(18.0)).unwrap();
        dive.stay(5.0).unwrap();
        assert!(dive.can_surface().unwrap());
    }

    #[test]
    fn deep_dive_requires_decompression_stops() {
        let mut dive = buhlmann_dive();
        dive.descend(Depth::from_meters(40.0)).unwrap();
        dive.stay(30.0).unwrap();
        let stops = dive.decompress().unwrap();
        assert!(!stops.is_empty());
        assert_eq!(dive.depth(), Depth::zero());
    }

    #[test]
    fn vpmb_deep_dive_produces_stops_and_surfaces() {
        let mut dive = Dive::new(
            DecoEngine::VpmB(VpmBEngine::new(VpmBConfig::default())),
            GasBlend::air(),
        );
        dive.descend(Depth::from_meters(45.0)).unwrap();
        dive.stay(25.0).unwrap();
        let stops = dive.decompress().unwrap();
        assert!(!stops.is_empty());
        assert_eq!(dive.depth(), Depth::zero());
    }

    #[test]
    fn reinterpolate_splits_long_steps() {
        let steps = vec![DiveStep::new(
            Depth::zero(),
            Depth::from_meters(30.0),
            Time::from_minutes(3.0),
            GasBlend::air(),
        )];
        let split = reinterpolate(&steps, 60.0);
        assert_eq!(split.len(), 3);
        assert!((split.iter().map(|s| s.time.as_seconds()).sum::<f64>() - 180.0).abs() < 1e-9);
    }
}
