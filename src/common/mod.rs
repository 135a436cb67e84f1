pub(crate) mod cns_table;
pub(crate) mod consumption;
pub(crate) mod cubic;
pub(crate) mod deco_engine;
pub(crate) mod depth;
pub(crate) mod dive;
pub(crate) mod dive_step;
pub(crate) mod error;
pub(crate) mod gas;
pub(crate) mod global_types;
pub(crate) mod math_utils;
pub(crate) mod ox_tox;
pub(crate) mod schreiner;
pub(crate) mod time;

pub use cns_table::{CnsCoeffRow, CNS_COEFFICIENTS};
pub use consumption::{GasConsumptionModel, SingleGasConsumptionModel, DEFAULT_SAC};
pub use deco_engine::{DecoEngine, DecompressionEngine};
pub use depth::{Depth, DepthType, Unit, Units};
pub use dive::{reinterpolate, DecompressionStop, Dive, FirstStopAnchor, SchedulerSettings, DEFAULT_RATE};
pub use dive_step::DiveStep;
pub use error::{ConfigValidationErr, DiveError, GasBlendError};
pub use time::Time;

pub use gas::{Gas, GasBlend};
pub use global_types::{Cns, GradientFactor, GradientFactors, Otu, Pressure};
pub use ox_tox::{CnsOxToxicity, PulmonaryOxToxicity};
