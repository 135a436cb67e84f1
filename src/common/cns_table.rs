//! NOAA/Hamilton piecewise-linear CNS single-exposure time-limit table.

/// `(pO2_low, pO2_high, slope, intercept)`. Time limit in minutes at a given
/// `pO2` within `[pO2_low, pO2_high)` is `slope * pO2 + intercept`.
pub type CnsCoeffRow = (f64, f64, f64, f64);

pub const CNS_COEFFICIENTS: [CnsCoeffRow; 9] = [
    (0.5, 0.6, -1800.0, 1800.0),
    (0.6, 0.7, -1500.0, 1620.0),
    (0.7, 0.8, -1200.0, 1410.0),
    (0.8, 0.9, -900.0, 1170.0),
    (0.9, 1.0, -600.0, 900.0),
    (1.0, 1.1, -600.0, 900.0),
    (1.1, 1.2, -300.0, 570.0),
    (1.2, 1.5, -300.0, 570.0),
    (1.5, 1.6, -750.0, 1245.0),
];
