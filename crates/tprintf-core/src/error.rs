//! Fatal error conditions for the formatting engine.
//!
//! Only directive-level failures are fatal; capacity exhaustion is handled by
//! truncation and is never an error. Each variant carries the byte offset of
//! the `%` that introduced the offending directive so callers can point at
//! the failure position in the template.

use thiserror::Error;

/// A fatal condition detected while interpreting a format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The template ended in the middle of a directive (e.g. a bare trailing
    /// `%`, or `%5` with no conversion character).
    #[error("truncated directive starting at byte {at}")]
    TruncatedDirective { at: usize },

    /// The conversion character is outside the supported set.
    #[error("unsupported conversion 0x{conversion:02x} in directive at byte {at}")]
    UnsupportedConversion { conversion: u8, at: usize },

    /// The argument list was exhausted, or the next argument's type does not
    /// match what the directive requires. The underlying contract leaves this
    /// undefined; with a typed argument list the mismatch is detectable for
    /// free, so it is reported instead of producing garbage.
    #[error("argument {index} does not satisfy directive at byte {at} (expected {expected})")]
    ArgumentMismatch {
        index: usize,
        at: usize,
        expected: &'static str,
    },
}

impl FormatError {
    /// Byte offset of the directive that caused the failure.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::TruncatedDirective { at }
            | Self::UnsupportedConversion { at, .. }
            | Self::ArgumentMismatch { at, .. } => *at,
        }
    }
}
