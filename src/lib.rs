#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

mod buhlmann;
mod common;
mod vpmb;

pub use buhlmann::{BuhlmannCompartment, BuhlmannCompoundCompartment, BuhlmannConfig, BuhlmannEngine};
pub use vpmb::{VpmBCompartment, VpmBCompoundCompartment, VpmBConfig, VpmBEngine};

pub use common::{
    reinterpolate, CnsCoeffRow, CnsOxToxicity, ConfigValidationErr, Cns, DecoEngine, DecompressionEngine,
    DecompressionStop, Depth, DepthType, Dive, DiveError, DiveStep, FirstStopAnchor, Gas, GasBlend,
    GasBlendError, GasConsumptionModel, GradientFactor, GradientFactors, Otu, Pressure, PulmonaryOxToxicity,
    SchedulerSettings, SingleGasConsumptionModel, Time, Unit, Units, CNS_COEFFICIENTS, DEFAULT_RATE,
    DEFAULT_SAC,
};

// Re-export Vec and vec macro from alloc for convenience
pub use alloc::vec;
pub use alloc::vec::Vec;
