//! Surface-volume gas consumption tracking, one ledger per gas blend used.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::dive_step::DiveStep;
use crate::common::gas::GasBlend;

/// Surface liters per minute breathed at 1 bar.
pub const DEFAULT_SAC: f64 = 20.0;

/// Consumption of every gas blend a dive has breathed, keyed by value equality.
#[derive(Clone, Debug)]
pub struct GasConsumptionModel {
    models: Vec<(GasBlend, SingleGasConsumptionModel)>,
}

impl Default for GasConsumptionModel {
    fn default() -> Self {
        Self { models: Vec::new() }
    }
}

impl GasConsumptionModel {
    pub fn apply_dive_step(&mut self, step: &DiveStep) {
        if !self.models.iter().any(|(gas, _)| gas.approx_eq(&step.gas)) {
            self.models
                .push((step.gas, SingleGasConsumptionModel::new(DEFAULT_SAC)));
        }
        for (gas, model) in self.models.iter_mut() {
            model.apply_dive_step(step, gas);
        }
    }

    pub fn undo_last_step(&mut self) {
        for (_, model) in self.models.iter_mut() {
            model.undo_last_step();
        }
    }

    /// Liters of `gas` consumed so far, 0 if never breathed.
    pub fn consumption(&self, gas: &GasBlend) -> f64 {
        self.models
            .iter()
            .find(|(g, _)| g.approx_eq(gas))
            .map(|(_, model)| model.consumption)
            .unwrap_or(0.0)
    }

    pub fn consumed_gases(&self) -> impl Iterator<Item = (&GasBlend, f64)> {
        self.models.iter().map(|(gas, model)| (gas, model.consumption))
    }
}

/// Consumption ledger for exactly one gas blend.
#[derive(Clone, Debug)]
pub struct SingleGasConsumptionModel {
    sac: f64,
    consumption: f64,
    history: Vec<f64>,
}

impl SingleGasConsumptionModel {
    pub fn new(sac: f64) -> Self {
        Self {
            sac,
            consumption: 0.0,
            history: vec![0.0],
        }
    }

    fn apply_dive_step(&mut self, step: &DiveStep, gas: &GasBlend) {
        if !gas.approx_eq(&step.gas) {
            self.history.push(self.consumption);
            return;
        }

        let mean_depth = (step.start_depth.as_meters() + step.end_depth.as_meters()) / 2.0;
        let pressure = mean_depth / 10.0 + 1.0;
        let z = gas.compressibility(pressure);
        let z1 = gas.compressibility(1.0);

        self.consumption += self.sac * step.minutes() * z / z1 * pressure;
        self.history.push(self.consumption);
    }

    fn undo_last_step(&mut self) {
        self.history.pop();
        self.consumption = *self.history.last().expect("history never empties below its seed");
    }
}
