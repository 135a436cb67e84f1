//! Pulmonary (OTU) and central nervous system (CNS) oxygen toxicity tracking.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::cns_table::{CnsCoeffRow, CNS_COEFFICIENTS};
use crate::common::dive_step::DiveStep;
use crate::common::gas::Gas;
use crate::common::math_utils::{ln, powf};

const CNS_LOW_PO2: f64 = 0.5;

/// Pulmonary oxygen toxicity, accumulated in oxygen tolerance units (OTUs).
///
/// Only the part of a step at `pO2 >= 0.5` contributes; a step whose `pO2` stays
/// below that threshold for its whole length is free.
#[derive(Clone, Debug, PartialEq)]
pub struct PulmonaryOxToxicity {
    otus: f64,
    history: Vec<f64>,
}

impl Default for PulmonaryOxToxicity {
    fn default() -> Self {
        Self {
            otus: 0.0,
            history: vec![0.0],
        }
    }
}

impl PulmonaryOxToxicity {
    pub fn otus(&self) -> f64 {
        self.otus
    }

    pub fn apply_dive_step(&mut self, step: &DiveStep) {
        let po2_initial = step.gas.partial_pressure(Gas::Oxygen, step.start_depth.as_meters());
        let po2_final = step.gas.partial_pressure(Gas::Oxygen, step.end_depth.as_meters());

        if po2_initial < CNS_LOW_PO2 && po2_final < CNS_LOW_PO2 {
            self.history.push(self.otus);
            return;
        }

        let (duration, po2_initial, po2_final) = if po2_initial < CNS_LOW_PO2 {
            let duration = (po2_final - CNS_LOW_PO2) / (po2_final - po2_initial) * step.minutes();
            (duration, CNS_LOW_PO2, po2_final)
        } else if po2_final < CNS_LOW_PO2 {
            let duration = (po2_initial - CNS_LOW_PO2) / (po2_initial - po2_final) * step.minutes();
            (duration, po2_initial, CNS_LOW_PO2)
        } else {
            (step.minutes(), po2_initial, po2_final)
        };

        let gain = if step.pressure_rate() == 0.0 {
            duration * powf(CNS_LOW_PO2 / (po2_initial - CNS_LOW_PO2), -5.0 / 6.0)
        } else {
            (3.0 / 11.0) * duration / (po2_final - po2_initial)
                * (powf((po2_final - CNS_LOW_PO2) / CNS_LOW_PO2, 11.0 / 6.0)
                    - powf((po2_initial - CNS_LOW_PO2) / CNS_LOW_PO2, 11.0 / 6.0))
        };

        self.otus += gain;
        self.history.push(self.otus);
    }

    pub fn undo_last_step(&mut self) {
        self.history.pop();
        self.otus = *self.history.last().expect("history never empties below its seed");
    }
}

/// Central nervous system oxygen toxicity, accumulated as a fraction of allowable
/// single-exposure dose (1.0 == 100%).
#[derive(Clone, Debug, PartialEq)]
pub struct CnsOxToxicity {
    fraction: f64,
    over_table: bool,
    table: &'static [CnsCoeffRow],
    history: Vec<f64>,
    over_table_history: Vec<bool>,
}

impl Default for CnsOxToxicity {
    fn default() -> Self {
        Self::with_table(&CNS_COEFFICIENTS)
    }
}

impl CnsOxToxicity {
    /// Build a tracker against a caller-supplied time-limit table, sorted ascending
    /// by `pO2_low`, in place of the built-in NOAA/Hamilton table.
    pub fn with_table(table: &'static [CnsCoeffRow]) -> Self {
        Self {
            fraction: 0.0,
            over_table: false,
            table,
            history: vec![0.0],
            over_table_history: vec![false],
        }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Sticky once set: this dive's pO2 exceeded the table's highest row at some step.
    pub fn over_table(&self) -> bool {
        self.over_table
    }

    pub fn apply_dive_step(&mut self, step: &DiveStep) {
        let po2_initial = step.gas.partial_pressure(Gas::Oxygen, step.start_depth.as_meters());
        let po2_final = step.gas.partial_pressure(Gas::Oxygen, step.end_depth.as_meters());

        let min_po2 = po2_initial.min(po2_final);
        let max_po2 = po2_initial.max(po2_final);

        let table_low = self.table[0].0;
        let table_high = self.table[self.table.len() - 1].1;
        let low_po2 = table_low.max(min_po2);

        if max_po2 > table_high {
            self.over_table = true;
        }

        if max_po2 <= table_low {
            self.history.push(self.fraction);
            self.over_table_history.push(self.over_table);
            return;
        }
        // pO2 above the table's top row is clamped to the top row's regime.
        let max_po2 = max_po2.min(table_high);

        if low_po2 == max_po2 {
            if let Some((_, _, slope, intercept)) = self
                .table
                .iter()
                .find(|(lo, hi, _, _)| *lo < low_po2 && low_po2 <= *hi)
                .copied()
            {
                let t_lim = slope * low_po2 + intercept;
                self.fraction += step.minutes() / t_lim;
            }
            self.history.push(self.fraction);
            self.over_table_history.push(self.over_table);
            return;
        }

        let time = step.minutes() * (max_po2 - low_po2) / (max_po2 - min_po2);

        let mut increment = 0.0;
        for (row_low, row_high, slope, intercept) in self.table.iter().copied() {
            let seg_low = low_po2.max(row_low).min(row_high);
            let seg_high = max_po2.max(row_low).min(row_high);
            let seg_time = time * (seg_high - seg_low) / (max_po2 - low_po2);

            if seg_time == 0.0 {
                continue;
            }
            let t_lim = slope * seg_low + intercept;
            let mk = slope * (seg_high - seg_low) / seg_time;
            increment += 1.0 / mk * (ln((t_lim + mk * seg_time).abs()) - ln(t_lim.abs()));
        }

        self.fraction += increment;
        self.history.push(self.fraction);
        self.over_table_history.push(self.over_table);
    }

    pub fn undo_last_step(&mut self) {
        self.history.pop();
        self.over_table_history.pop();
        self.fraction = *self.history.last().expect("history never empties below its seed");
        self.over_table = *self
            .over_table_history
            .last()
            .expect("history never empties below its seed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::depth::Depth;
    use crate::common::gas::GasBlend;
    use crate::common::time::Time;

    fn ean32() -> GasBlend {
        GasBlend::new(0.32, 0.68, 0.0).unwrap()
    }

    #[test]
    fn otus_zero_when_po2_stays_below_threshold() {
        let mut otox = PulmonaryOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(5.0),
            Depth::from_meters(5.0),
            Time::from_minutes(20.0),
            GasBlend::air(),
        );
        otox.apply_dive_step(&step);
        assert_eq!(otox.otus(), 0.0);
    }

    #[test]
    fn otus_accumulate_on_hold_at_depth() {
        let mut otox = PulmonaryOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(36.0),
            Depth::from_meters(36.0),
            Time::from_minutes(20.0),
            ean32(),
        );
        otox.apply_dive_step(&step);
        assert!(otox.otus() > 0.0);
    }

    #[test]
    fn otus_undo_restores_prior_value() {
        let mut otox = PulmonaryOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(36.0),
            Depth::from_meters(36.0),
            Time::from_minutes(20.0),
            ean32(),
        );
        otox.apply_dive_step(&step);
        let after = otox.otus();
        otox.apply_dive_step(&step);
        otox.undo_last_step();
        assert_eq!(otox.otus(), after);
    }

    #[test]
    fn cns_zero_below_table_floor() {
        let mut cns = CnsOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(1.0),
            Depth::from_meters(1.0),
            Time::from_minutes(10.0),
            GasBlend::air(),
        );
        cns.apply_dive_step(&step);
        assert_eq!(cns.fraction(), 0.0);
    }

    #[test]
    fn cns_accumulates_at_constant_depth() {
        let mut cns = CnsOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(36.0),
            Depth::from_meters(36.0),
            Time::from_minutes(20.0),
            ean32(),
        );
        cns.apply_dive_step(&step);
        assert!(cns.fraction() > 0.0);
    }

    #[test]
    fn cns_over_table_is_sticky() {
        let mut cns = CnsOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(70.0),
            Depth::from_meters(70.0),
            Time::from_minutes(5.0),
            GasBlend::air(),
        );
        assert!(!cns.over_table());
        cns.apply_dive_step(&step);
        assert!(cns.over_table());
        let shallow = DiveStep::new(
            Depth::from_meters(5.0),
            Depth::from_meters(5.0),
            Time::from_minutes(5.0),
            GasBlend::air(),
        );
        cns.apply_dive_step(&shallow);
        assert!(cns.over_table());
    }

    #[test]
    fn cns_undo_restores_prior_value() {
        let mut cns = CnsOxToxicity::default();
        let step = DiveStep::new(
            Depth::from_meters(36.0),
            Depth::from_meters(36.0),
            Time::from_minutes(20.0),
            ean32(),
        );
        cns.apply_dive_step(&step);
        let after = cns.fraction();
        cns.apply_dive_step(&step);
        cns.undo_last_step();
        assert_eq!(cns.fraction(), after);
    }
}
