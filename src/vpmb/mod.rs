//! The VPM-B (Varying Permeability Model) bubble model.

pub(crate) mod compartment;
pub(crate) mod config;
pub(crate) mod engine;

pub use compartment::{VpmBCompartment, VpmBCompoundCompartment};
pub use config::VpmBConfig;
pub use engine::VpmBEngine;
