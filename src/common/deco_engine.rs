//! The narrow contract both decompression engines (Bühlmann, VPM-B) implement, and
//! the tagged-variant dispatch over it that lets a [`crate::common::dive::Dive`] hold
//! either one without dynamic dispatch or a trait object.

use crate::buhlmann::BuhlmannEngine;
use crate::common::depth::Depth;
use crate::common::dive_step::DiveStep;
use crate::common::error::DiveError;
use crate::vpmb::VpmBEngine;

/// Operations a `Dive`'s scheduler drives every decompression engine through.
///
/// Matches the "dynamic model dispatch" design note: apply/undo a step, query a
/// ceiling and a can-surface verdict, and get/set the gradient-factor or
/// critical-volume-loop's shared `first_stop` depth.
pub trait DecompressionEngine {
    fn apply_dive_step(&mut self, step: &DiveStep) -> Result<(), DiveError>;
    fn undo_last_step(&mut self);
    fn ceiling(&self, depth: Depth) -> Result<Depth, DiveError>;
    fn can_surface(&self, depth: Depth) -> Result<bool, DiveError>;
    fn first_stop(&self) -> Option<Depth>;
    fn set_first_stop(&mut self, first_stop: Option<Depth>);
}

/// Either of the two supported decompression models, stored by value on a `Dive`.
#[derive(Clone, Debug)]
pub enum DecoEngine {
    Buhlmann(BuhlmannEngine),
    VpmB(VpmBEngine),
}

impl DecoEngine {
    pub fn as_buhlmann(&self) -> Option<&BuhlmannEngine> {
        match self {
            DecoEngine::Buhlmann(engine) => Some(engine),
            DecoEngine::VpmB(_) => None,
        }
    }

    pub fn as_vpmb(&self) -> Option<&VpmBEngine> {
        match self {
            DecoEngine::VpmB(engine) => Some(engine),
            DecoEngine::Buhlmann(_) => None,
        }
    }

    pub fn as_vpmb_mut(&mut self) -> Option<&mut VpmBEngine> {
        match self {
            DecoEngine::VpmB(engine) => Some(engine),
            DecoEngine::Buhlmann(_) => None,
        }
    }
}

impl DecompressionEngine for DecoEngine {
    fn apply_dive_step(&mut self, step: &DiveStep) -> Result<(), DiveError> {
        match self {
            DecoEngine::Buhlmann(engine) => engine.apply_dive_step(step),
            DecoEngine::VpmB(engine) => engine.apply_dive_step(step),
        }
    }

    fn undo_last_step(&mut self) {
        match self {
            DecoEngine::Buhlmann(engine) => engine.undo_last_step(),
            DecoEngine::VpmB(engine) => engine.undo_last_step(),
        }
    }

    fn ceiling(&self, depth: Depth) -> Result<Depth, DiveError> {
        match self {
            DecoEngine::Buhlmann(engine) => engine.ceiling(depth),
            DecoEngine::VpmB(engine) => engine.ceiling(depth),
        }
    }

    fn can_surface(&self, depth: Depth) -> Result<bool, DiveError> {
        match self {
            DecoEngine::Buhlmann(engine) => engine.can_surface(depth),
            DecoEngine::VpmB(engine) => engine.can_surface(depth),
        }
    }

    fn first_stop(&self) -> Option<Depth> {
        match self {
            DecoEngine::Buhlmann(engine) => engine.first_stop(),
            DecoEngine::VpmB(engine) => engine.first_stop(),
        }
    }

    fn set_first_stop(&mut self, first_stop: Option<Depth>) {
        match self {
            DecoEngine::Buhlmann(engine) => engine.set_first_stop(first_stop),
            DecoEngine::VpmB(engine) => engine.set_first_stop(first_stop),
        }
    }
}
