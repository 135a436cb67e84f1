//! A single leg of a dive: a linear depth change (or constant-depth hold) on one gas.

use crate::common::depth::Depth;
use crate::common::gas::GasBlend;
use crate::common::global_types::Pressure;
use crate::common::time::Time;

/// One append-only entry in a [`crate::common::dive::Dive`]'s step ledger.
///
/// A step is either a hold (`start_depth == end_depth`) or a constant-rate change
/// between the two depths over `time`; ambient pressure is assumed to vary linearly
/// with depth across the step, which is what lets tissue loading be integrated in
/// closed form (the Schreiner equation) rather than numerically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiveStep {
    pub start_depth: Depth,
    pub end_depth: Depth,
    pub time: Time,
    pub gas: GasBlend,
}

impl DiveStep {
    pub fn new(start_depth: Depth, end_depth: Depth, time: Time, gas: GasBlend) -> Self {
        Self {
            start_depth,
            end_depth,
            time,
            gas,
        }
    }

    pub fn depth_change(&self) -> Depth {
        self.end_depth - self.start_depth
    }

    pub fn is_hold(&self) -> bool {
        self.start_depth == self.end_depth
    }

    /// Absolute pressure at the start of the step, bar.
    pub fn start_pressure(&self) -> Pressure {
        1.0 + self.start_depth.as_meters() / 10.0
    }

    /// Absolute pressure at the end of the step, bar.
    pub fn end_pressure(&self) -> Pressure {
        1.0 + self.end_depth.as_meters() / 10.0
    }

    /// Signed rate of ambient pressure change, bar/min. Zero for a hold.
    pub fn pressure_rate(&self) -> f64 {
        if self.time.as_minutes() == 0.0 {
            return 0.0;
        }
        (self.end_pressure() - self.start_pressure()) / self.time.as_minutes()
    }

    pub fn minutes(&self) -> f64 {
        self.time.as_minutes()
    }
}
