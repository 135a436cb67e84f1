//! Bühlmann ZHL-16C tissue compartments: a pair of Schreiner-integrated inert-gas
//! trackers (nitrogen, helium) combined into one pressure-limit-bearing unit.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::dive_step::DiveStep;
use crate::common::gas::Gas;
use crate::common::schreiner::{initial_inert_gas_pressure, schreiner_step, time_constant};

pub(crate) const WATER_VAPOUR_PRESSURE: f64 = 0.0627;

/// A single gas's tissue loading in one Bühlmann compartment.
#[derive(Clone, Debug, PartialEq)]
pub struct BuhlmannCompartment {
    gas: Gas,
    a: f64,
    b: f64,
    half_life: f64,
    inert_gas_pressure: f64,
    history: Vec<f64>,
}

impl BuhlmannCompartment {
    pub fn new(gas: Gas, a: f64, b: f64, half_life: f64) -> Self {
        let inert_gas_pressure = initial_inert_gas_pressure(gas, WATER_VAPOUR_PRESSURE);
        Self {
            gas,
            a,
            b,
            half_life,
            inert_gas_pressure,
            history: vec![inert_gas_pressure],
        }
    }

    pub fn inert_gas_pressure(&self) -> f64 {
        self.inert_gas_pressure
    }

    pub fn time_constant(&self) -> f64 {
        time_constant(self.half_life)
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
    }
}

/// Nitrogen/helium pair tracked together, since a gradient-factor ceiling is computed
/// against their combined, inert-gas-pressure-weighted `a`/`b` coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct BuhlmannCompoundCompartment {
    nitrogen: BuhlmannCompartment,
    helium: BuhlmannCompartment,
    history: Vec<f64>,
}

impl BuhlmannCompoundCompartment {
    pub fn new(nitrogen: (f64, f64, f64), helium: (f64, f64, f64)) -> Self {
        let nitrogen = BuhlmannCompartment::new(Gas::Nitrogen, nitrogen.0, nitrogen.1, nitrogen.2);
        let helium = BuhlmannCompartment::new(Gas::Helium, helium.0, helium.1, helium.2);
        let mut compartment = Self {
            nitrogen,
            helium,
            history: Vec::new(),
        };
        let limit = compartment.pressure_limit(1.0);
        compartment.history.push(limit);
        compartment
    }

    pub fn apply_dive_step(&mut self, step: &DiveStep) {
        self.nitrogen.apply_dive_step(step);
        self.helium.apply_dive_step(step);
        self.history.push(self.pressure_limit(1.0));
    }

    pub fn undo_last_step(&mut self) {
        self.nitrogen.undo_last_step();
        self.helium.undo_last_step();
        self.history.pop();
    }

    pub fn inert_gas_pressure(&self) -> f64 {
        self.nitrogen.inert_gas_pressure() + self.helium.inert_gas_pressure()
    }

    fn a(&self) -> f64 {
        (self.nitrogen.a * self.nitrogen.inert_gas_pressure()
            + self.helium.a * self.helium.inert_gas_pressure())
            / self.inert_gas_pressure()
    }

    fn b(&self) -> f64 {
        (self.nitrogen.b * self.nitrogen.inert_gas_pressure()
            + self.helium.b * self.helium.inert_gas_pressure())
            / self.inert_gas_pressure()
    }

    /// Maximum tolerated inert-gas pressure at gradient factor `gradient_factor` (1.0 ==
    /// no gradient-factor relaxation, the raw Bühlmann M-value).
    pub fn pressure_limit(&self, gradient_factor: f64) -> f64 {
        (self.inert_gas_pressure() - self.a() * gradient_factor)
            / (gradient_factor / self.b() + 1.0 - gradient_factor)
    }
}
