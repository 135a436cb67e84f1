//! Inert/metabolic gas species and breathing-gas blends.

use alloc::format;
use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::error::GasBlendError;
use crate::common::global_types::Pressure;
use crate::common::math_utils::powi;

/// A maximum allowable inspired partial pressure of oxygen, bar.
pub const MAX_PO2: f64 = 1.6;
/// A minimum inspired partial pressure of oxygen below which hypoxia risk begins, bar.
pub const MIN_PO2: f64 = 0.16;
/// A maximum tolerated narcotic partial pressure (O2 + N2), bar.
pub const MAX_PNARC: f64 = 4.0;

const N_GASES: usize = 3;

/// A pure inert or metabolic gas species, with its virial equation-of-state coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gas {
    Oxygen,
    Nitrogen,
    Helium,
}

impl Gas {
    pub const ALL: [Gas; N_GASES] = [Gas::Oxygen, Gas::Nitrogen, Gas::Helium];

    pub fn name(&self) -> &'static str {
        match self {
            Gas::Oxygen => "oxygen",
            Gas::Nitrogen => "nitrogen",
            Gas::Helium => "helium",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            Gas::Oxygen => "O2",
            Gas::Nitrogen => "N2",
            Gas::Helium => "He",
        }
    }

    pub fn from_name(name: &str) -> Result<Gas, GasBlendError> {
        match name {
            "oxygen" => Ok(Gas::Oxygen),
            "nitrogen" => Ok(Gas::Nitrogen),
            "helium" => Ok(Gas::Helium),
            _ => Err(GasBlendError::UnknownGas),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Gas::Oxygen => 0,
            Gas::Nitrogen => 1,
            Gas::Helium => 2,
        }
    }

    /// The three virial coefficients `[c1, c2, c3]` such that
    /// `virial_m1(p) = sum(c_i * p^(i+1))`.
    pub fn virial_coefficients(&self) -> [f64; 3] {
        match self {
            Gas::Oxygen => [-7.18092073703e-04, 2.81852572808e-06, -1.50290620492e-09],
            Gas::Nitrogen => [-2.19260353292e-04, 2.92844845532e-06, -2.07613482075e-09],
            Gas::Helium => [4.87320026468e-04, -8.83632921053e-08, 5.33304543646e-11],
        }
    }

    pub fn virial_m1(&self, pressure: Pressure) -> f64 {
        self.virial_coefficients()
            .iter()
            .enumerate()
            .map(|(i, c)| c * powi(pressure, i as i32 + 1))
            .sum()
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A breathing gas mixture: a mole-fraction distribution over the known [`Gas`] species.
///
/// `sum(fractions) == 1` to within 1%; fractions are renormalized to sum exactly 1 on
/// construction, and a gas present with a non-positive fraction is dropped entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasBlend {
    fractions: [f64; N_GASES],
}

impl GasBlend {
    /// Construct from oxygen/nitrogen/helium fractions (any omitted gas is 0).
    pub fn new(oxygen: f64, nitrogen: f64, helium: f64) -> Result<Self, GasBlendError> {
        Self::from_fractions([oxygen, nitrogen, helium])
    }

    /// Construct from `(name, fraction)` pairs, failing on an unrecognized gas name.
    pub fn from_named(pairs: &[(&str, f64)]) -> Result<Self, GasBlendError> {
        let mut raw = [0.0; N_GASES];
        for (name, fraction) in pairs {
            let gas = Gas::from_name(name)?;
            raw[gas.index()] += fraction;
        }
        Self::from_fractions(raw)
    }

    fn from_fractions(raw: [f64; N_GASES]) -> Result<Self, GasBlendError> {
        let total: f64 = raw.iter().sum();
        if (total - 1.0).abs() >= 0.01 {
            return Err(GasBlendError::NonNormalBlend { sum: total });
        }
        let mut fractions = [0.0; N_GASES];
        for i in 0..N_GASES {
            if raw[i] > 0.0 {
                fractions[i] = raw[i] / total;
            }
        }
        Ok(Self { fractions })
    }

    pub fn air() -> Self {
        Self::new(0.2098, 0.7902, 0.0).expect("air fractions are normal")
    }

    /// Fraction of `gas` in the blend, 0 if absent.
    pub fn fraction(&self, gas: Gas) -> f64 {
        self.fractions[gas.index()]
    }

    pub fn is_nitrox(&self) -> bool {
        self.fraction(Gas::Helium) == 0.0
    }

    pub fn is_trimix(&self) -> bool {
        self.fraction(Gas::Helium) > 0.0 && self.fraction(Gas::Nitrogen) > 0.0
    }

    pub fn max_operating_depth(&self) -> f64 {
        self.max_operating_depth_at(MAX_PO2)
    }

    pub fn max_operating_depth_at(&self, max_po2: f64) -> f64 {
        (10.0 * (max_po2 / self.fraction(Gas::Oxygen) - 1.0)).max(0.0)
    }

    pub fn min_operating_depth(&self) -> f64 {
        self.min_operating_depth_at(MIN_PO2)
    }

    pub fn min_operating_depth_at(&self, min_po2: f64) -> f64 {
        (10.0 * (min_po2 / self.fraction(Gas::Oxygen) - 1.0)).max(0.0)
    }

    pub fn max_narcotic_depth(&self) -> f64 {
        self.max_narcotic_depth_at(MAX_PNARC)
    }

    pub fn max_narcotic_depth_at(&self, max_pnarc: f64) -> f64 {
        10.0 * (max_pnarc / (self.fraction(Gas::Oxygen) + self.fraction(Gas::Nitrogen)) - 1.0)
    }

    pub fn partial_pressure(&self, gas: Gas, depth: f64) -> f64 {
        (depth / 10.0 + 1.0) * self.fraction(gas)
    }

    pub fn compressibility(&self, pressure: Pressure) -> f64 {
        1.0 + Gas::ALL
            .iter()
            .map(|gas| self.fraction(*gas) * gas.virial_m1(pressure))
            .sum::<f64>()
    }

    /// Mole-fraction-weighted virial coefficients of the blend as a whole.
    pub fn virial_coefficients(&self) -> [f64; 3] {
        let mut out = [0.0; 3];
        for gas in Gas::ALL {
            let fraction = self.fraction(gas);
            if fraction == 0.0 {
                continue;
            }
            for (o, c) in out.iter_mut().zip(gas.virial_coefficients()) {
                *o += fraction * c;
            }
        }
        out
    }

    /// Whether two blends are the same mixture within the consumption model's 1e-4 tolerance.
    ///
    /// [`PartialEq`] on `GasBlend` is exact; this is the looser comparison the gas
    /// consumption model keys its per-gas ledgers by.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.fractions
            .iter()
            .zip(other.fractions.iter())
            .all(|(a, b)| (a - b).abs() < 1e-4)
    }

    /// The name used in `EAN{..}`/`Tx{../..}` short forms and the markdown table.
    pub fn short_name(&self) -> Result<String, GasBlendError> {
        let present: alloc::vec::Vec<Gas> =
            Gas::ALL.into_iter().filter(|g| self.fraction(*g) > 0.0).collect();

        if present.len() == 1 {
            return Ok(present[0].name().into());
        }

        let o2_pct = 100.0 * self.fraction(Gas::Oxygen);
        let n2_pct = 100.0 * self.fraction(Gas::Nitrogen);
        let he_pct = 100.0 * self.fraction(Gas::Helium);

        if (o2_pct - 21.0).abs() < 0.5 && (n2_pct - 79.0).abs() < 0.5 && he_pct == 0.0 {
            return Ok("air".into());
        }

        if self.is_nitrox() {
            return Ok(format!("EAN{o2_pct:.0}"));
        }

        if self.is_trimix() {
            return Ok(format!("Tx{o2_pct:.0}/{he_pct:.0}"));
        }

        Err(GasBlendError::UnknownBlendType)
    }
}

impl fmt::Display for GasBlend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gas blend")?;
        for gas in Gas::ALL {
            let fraction = self.fraction(gas);
            if fraction > 0.0 {
                writeln!(f, "  {}: {:.0}%", gas.name(), fraction * 100.0)?;
            }
        }
        Ok(())
    }
}
