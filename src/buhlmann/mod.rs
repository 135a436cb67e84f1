//! The Bühlmann ZHL-16C gradient-factor decompression model.

pub(crate) mod compartment;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod zhl_values;

pub use compartment::{BuhlmannCompartment, BuhlmannCompoundCompartment};
pub use config::BuhlmannConfig;
pub use engine::BuhlmannEngine;
