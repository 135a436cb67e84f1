use core::fmt;

/// Errors raised constructing or printing a [`crate::common::gas::GasBlend`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GasBlendError {
    /// A gas name outside `{oxygen, nitrogen, helium}` was supplied.
    UnknownGas,
    /// Fractions summed to more than 1% away from 1.
    NonNormalBlend { sum: f64 },
    /// Printable form requested for a blend outside `{single gas, air, nitrox, trimix}`.
    ///
    /// Unreachable while only the three known gases exist, kept for parity with the
    /// taxonomy this crate's blend printer is modelled on.
    UnknownBlendType,
}

impl fmt::Display for GasBlendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasBlendError::UnknownGas => write!(f, "unknown gas"),
            GasBlendError::NonNormalBlend { sum } => {
                write!(f, "gas fractions should sum to 1 but instead sum to {sum}")
            }
            GasBlendError::UnknownBlendType => write!(f, "unknown blend type"),
        }
    }
}

impl core::error::Error for GasBlendError {}

/// Errors raised while driving a [`crate::common::dive::Dive`] or its decompression scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DiveError {
    /// VPM-B rounded the first stop below the start of the decompression zone.
    StepTooLarge,
    /// An iterative solver exceeded its iteration cap without converging.
    NonConvergent,
    /// The depressed-cubic allowable-gradient solver found more than one real root.
    MultipleRealRoots,
    /// `switch_gas` was asked for a gas not bound to any `deco_gases` depth at the current depth.
    InvalidGasSwitch,
    /// `undo_last_step`/`undo_steps` was asked to pop past the start of the dive.
    Underflow,
}

impl fmt::Display for DiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiveError::StepTooLarge => {
                write!(f, "step size is too large to decompress")
            }
            DiveError::NonConvergent => write!(f, "iterative solver did not converge"),
            DiveError::MultipleRealRoots => {
                write!(f, "allowable gradient cubic has more than one real root")
            }
            DiveError::InvalidGasSwitch => write!(f, "requested deco gas not available here"),
            DiveError::Underflow => write!(f, "cannot undo past the start of the dive"),
        }
    }
}

impl core::error::Error for DiveError {}

/// A rejected field on a decompression model's configuration builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigValidationErr<'a> {
    pub field: &'a str,
    pub reason: &'a str,
}

impl<'a> fmt::Display for ConfigValidationErr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl<'a> core::error::Error for ConfigValidationErr<'a> {}
