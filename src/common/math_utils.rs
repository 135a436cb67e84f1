//! Math utilities for std/no-std compatibility

#[cfg(feature = "no-std")]
use libm;

/// Absolute value for f64
#[inline]
pub fn abs(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.abs()
    }
    #[cfg(feature = "no-std")]
    {
        libm::fabs(val)
    }
}

/// Ceiling function for f64
#[inline]
pub fn ceil(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ceil()
    }
    #[cfg(feature = "no-std")]
    {
        libm::ceil(val)
    }
}

/// Floor function for f64
#[inline]
pub fn floor(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.floor()
    }
    #[cfg(feature = "no-std")]
    {
        libm::floor(val)
    }
}

/// Power function for f64
#[inline]
pub fn powf(base: f64, exp: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        base.powf(exp)
    }
    #[cfg(feature = "no-std")]
    {
        libm::pow(base, exp)
    }
}

/// Round function for f64
#[inline]
pub fn round(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.round()
    }
    #[cfg(feature = "no-std")]
    {
        libm::round(val)
    }
}

/// Natural exponential for f64
#[inline]
pub fn exp(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.exp()
    }
    #[cfg(feature = "no-std")]
    {
        libm::exp(val)
    }
}

/// Natural logarithm for f64
#[inline]
pub fn ln(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ln()
    }
    #[cfg(feature = "no-std")]
    {
        libm::log(val)
    }
}

/// Square root for f64
#[inline]
pub fn sqrt(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.sqrt()
    }
    #[cfg(feature = "no-std")]
    {
        libm::sqrt(val)
    }
}

/// Real cube root for f64, preserving the sign of the input
#[inline]
pub fn cbrt(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.cbrt()
    }
    #[cfg(feature = "no-std")]
    {
        libm::cbrt(val)
    }
}

/// Arc-cosine for f64
#[inline]
pub fn acos(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.acos()
    }
    #[cfg(feature = "no-std")]
    {
        libm::acos(val)
    }
}

/// Cosine for f64
#[inline]
pub fn cos(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.cos()
    }
    #[cfg(feature = "no-std")]
    {
        libm::cos(val)
    }
}

/// Integer power by repeated squaring, portable across std/no-std without an intrinsic.
#[inline]
pub fn powi(base: f64, exp: i32) -> f64 {
    if exp < 0 {
        return 1.0 / powi(base, -exp);
    }
    let mut result = 1.0;
    let mut base = base;
    let mut exp = exp as u32;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= base;
        }
        base *= base;
        exp >>= 1;
    }
    result
}
