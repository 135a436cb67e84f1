/// Absolute pressure in bar.
pub type Pressure = f64;

/// Central nervous system oxygen toxicity load, as a fraction (1.0 == 100%).
pub type Cns = f64;

/// Pulmonary oxygen toxicity units.
pub type Otu = f64;

/// A Bühlmann gradient factor, 0..1 (not the conventional 0..100 percentage).
pub type GradientFactor = f64;

/// `(low_gf, high_gf)`, the pair of gradient factors bounding the deco-zone ramp.
pub type GradientFactors = (GradientFactor, GradientFactor);
