//! Error types used throughout this library.

use std::error::Error;
use std::fmt;

/// Errors that can occur when creating a histogram.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CreationError {
    /// Lowest trackable value must be >= 1.
    LowIsZero,
    /// Lowest trackable value must be <= `u64::max_value() / 2` because the highest value is
    /// a `u64` and the lowest value must be no bigger than half the highest.
    LowExceedsMax,
    /// Highest trackable value must be >= 2 * lowest trackable value for some internal
    /// calculations to work out. In practice, high is typically much higher than 2 * low.
    HighLessThanTwiceLow,
    /// Number of significant digits must be in the range `[1, 5]`. It is capped at 5 because 5
    /// significant digits is already more than almost anyone needs, and memory usage scales
    /// exponentially as this increases.
    SigFigOutOfRange,
    /// Cannot represent sigfig worth of values beyond the lowest trackable value. Decrease the
    /// significant figures, lowest trackable value, or both.
    ///
    /// This could happen if low is very large (like 2^60) and sigfigs is 5, which requires 18
    /// additional bits, which would then require more bits than will fit in a u64. Specifically,
    /// the exponent of the largest power of two that is smaller than the lowest value and the bits
    /// needed to represent half of the sub-bucket count must sum to 61 or less.
    CannotRepresentSigFigBeyondLow,
    /// The `usize` type is too small to represent the desired configuration. Use fewer significant
    /// figures or a lower max.
    UsizeTypeTooSmall,
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            CreationError::LowIsZero => "lowest trackable value must be >= 1",
            CreationError::LowExceedsMax => {
                "lowest trackable value must be <= u64::max_value() / 2"
            }
            CreationError::HighLessThanTwiceLow => {
                "highest trackable value must be >= 2 * lowest trackable value"
            }
            CreationError::SigFigOutOfRange => "significant figures must be in [1, 5]",
            CreationError::CannotRepresentSigFigBeyondLow => {
                "cannot keep that many significant figures above the lowest trackable value"
            }
            CreationError::UsizeTypeTooSmall => "counts array length does not fit in a usize",
        };
        f.write_str(reason)
    }
}

impl Error for CreationError {}

/// Errors that can occur while recording a value and its associated count.
///
/// Both conditions are caller bugs rather than runtime conditions: the histogram never resizes,
/// so the range has to be chosen up front to cover every value that will be recorded.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum RecordError {
    /// The value to record is smaller than the configured lowest trackable value.
    ValueBelowLowest,
    /// The value to record maps to a slot beyond the end of the counts array. Configure a higher
    /// highest trackable value.
    ValueOutOfRange,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::ValueBelowLowest => {
                f.write_str("value is below the lowest trackable value")
            }
            RecordError::ValueOutOfRange => f.write_str("value is beyond the last slot"),
        }
    }
}

impl Error for RecordError {}
