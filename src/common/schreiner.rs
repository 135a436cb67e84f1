//! The Schreiner equation: closed-form inert-gas tension integration across a step
//! of constant ambient-pressure rate. Shared by the Bühlmann and VPM-B compartments,
//! which differ only in water-vapor pressure and the extra bookkeeping layered on top.

use crate::common::dive_step::DiveStep;
use crate::common::gas::{Gas, GasBlend};
use crate::common::math_utils::{exp, ln};

/// Inert-gas pressure a compartment starts a dive at, breathing air at the surface.
pub fn initial_inert_gas_pressure(gas: Gas, water_vapour_pressure: f64) -> f64 {
    GasBlend::air().fraction(gas) * (1.0 - water_vapour_pressure)
}

/// `half_life` in minutes, as Bühlmann/VPM-B tables give it.
pub fn time_constant(half_life: f64) -> f64 {
    ln(2.0) / half_life
}

/// Integrate `gas`'s inert-gas tension across `step`, starting from `current_pressure`.
pub fn schreiner_step(
    step: &DiveStep,
    gas: Gas,
    water_vapour_pressure: f64,
    half_life: f64,
    current_pressure: f64,
) -> f64 {
    let gas_fraction = step.gas.fraction(gas);
    let k = time_constant(half_life);
    let alveolar_pressure = gas_fraction * (step.start_pressure() - water_vapour_pressure);
    let rate = gas_fraction * step.pressure_rate();
    let duration = step.minutes();

    alveolar_pressure + rate * (duration - 1.0 / k)
        - (alveolar_pressure - current_pressure - rate / k) * exp(-k * duration)
}
