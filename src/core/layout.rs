use std::convert::TryFrom;
use std::fmt;

use serde::Serialize;

use crate::errors::CreationError;

/// The largest shift a value in the lowest bucket may need, counting the unit magnitude and the
/// half-count magnitude. Keeps every `value_from_loc` shift inside a `u64`.
const MAX_UNIT_PLUS_HALF_COUNT_MAGNITUDE: u8 = 61;

/// The geometry of a histogram's counts array.
///
/// A `Layout` is derived once from the three configuration values (lowest trackable value,
/// highest trackable value and significant figures) and never changes afterwards. Everything the
/// histogram needs to turn a value into a slot index, or a slot index back into a value, lives
/// here.
///
/// Bucket `k` counts in steps of `2^(unit_magnitude + k)`. Only bucket 0 uses all
/// `sub_bucket_count` of its sub-buckets; from bucket 1 on, the bottom half would duplicate
/// values the lower buckets already hold more precisely, so only the top half gets slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub(crate) lowest_trackable_value: u64,
    pub(crate) highest_trackable_value: u64,
    pub(crate) significant_figures: u8,

    pub(crate) unit_magnitude: u8,

    pub(crate) sub_bucket_count: u32,
    pub(crate) sub_bucket_half_count: u32,
    pub(crate) sub_bucket_half_count_magnitude: u8,
    pub(crate) sub_bucket_mask: u64,

    pub(crate) leading_zero_count_base: u8,

    pub(crate) bucket_count: u8,
    pub(crate) counts_len: usize,
}

impl Layout {
    /// Derive the layout for the given bounds and precision.
    ///
    /// `low` is the lowest value that can be recorded and must be `>= 1`. It is internally
    /// rounded down to the nearest power of two to find the unit magnitude. `high` is the highest
    /// value to be tracked and must be `>= 2 * low`. `sigfig` is the number of significant
    /// decimal digits to which values are kept distinct, and must be in `[1, 5]`.
    ///
    /// Every invariant is checked here, before any counts are allocated.
    pub fn new(low: u64, high: u64, sigfig: u8) -> Result<Layout, CreationError> {
        if low < 1 {
            return Err(CreationError::LowIsZero);
        }
        if low > u64::max_value() / 2 {
            // avoid overflow in 2 * low
            return Err(CreationError::LowExceedsMax);
        }
        if high < 2 * low {
            return Err(CreationError::HighLessThanTwiceLow);
        }
        if sigfig < 1 || sigfig > 5 {
            return Err(CreationError::SigFigOutOfRange);
        }

        // Three digits needs unit resolution below 2 * 10^3 (1999 and 1998 differ in the fourth
        // digit); from 2000 on, a step of 2 still keeps three digits.
        let largest = 2 * 10_u32.pow(u32::from(sigfig));

        let unit_magnitude = (63 - low.leading_zeros()) as u8;

        // smallest power of two >= largest, so indexing stays a shift
        let sub_bucket_count_magnitude = (32 - (largest - 1).leading_zeros()) as u8;
        let sub_bucket_half_count_magnitude = sub_bucket_count_magnitude - 1;

        if unit_magnitude + sub_bucket_half_count_magnitude > MAX_UNIT_PLUS_HALF_COUNT_MAGNITUDE {
            return Err(CreationError::CannotRepresentSigFigBeyondLow);
        }

        let sub_bucket_count = 1_u32 << sub_bucket_count_magnitude;
        let sub_bucket_half_count = sub_bucket_count / 2;
        // at most 61 so won't overflow
        let sub_bucket_mask = (u64::from(sub_bucket_count) - 1) << unit_magnitude;

        let mut layout = Layout {
            lowest_trackable_value: low,
            highest_trackable_value: high,
            significant_figures: sigfig,

            unit_magnitude,

            sub_bucket_count,
            sub_bucket_half_count,
            sub_bucket_half_count_magnitude,
            sub_bucket_mask,

            // subtract the bits that would be used by the largest value in bucket 0.
            leading_zero_count_base: 64 - unit_magnitude - sub_bucket_half_count_magnitude - 1,

            bucket_count: 0,
            counts_len: 0,
        };

        layout.bucket_count = layout.buckets_to_cover(high);
        layout.counts_len = layout.num_bins(layout.bucket_count)?;
        Ok(layout)
    }

    /// The number of buckets needed for the top bucket to reach `value`.
    fn buckets_to_cover(&self, value: u64) -> u8 {
        // first value bucket 0 can't hold
        let mut limit = u64::from(self.sub_bucket_count) << self.unit_magnitude;

        let mut buckets = 1;
        while limit <= value {
            if limit > u64::max_value() / 2 {
                // one more bucket reaches past u64::max_value()
                return buckets + 1;
            }
            limit <<= 1;
            buckets += 1;
        }
        buckets
    }

    /// Slots for `buckets` buckets: half a bucket each, plus the bottom half of bucket 0.
    fn num_bins(&self, buckets: u8) -> Result<usize, CreationError> {
        (u64::from(buckets) + 1)
            .checked_mul(u64::from(self.sub_bucket_half_count))
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(CreationError::UsizeTypeTooSmall)
    }

    /// The configured lowest trackable value.
    pub fn lowest_trackable_value(&self) -> u64 {
        self.lowest_trackable_value
    }

    /// The configured highest trackable value.
    pub fn highest_trackable_value(&self) -> u64 {
        self.highest_trackable_value
    }

    /// The configured number of significant decimal digits.
    pub fn significant_figures(&self) -> u8 {
        self.significant_figures
    }

    /// `floor(log2(lowest_trackable_value))`: the shift of the smallest resolvable unit.
    pub fn unit_magnitude(&self) -> u8 {
        self.unit_magnitude
    }

    /// Number of linear sub-buckets in each bucket.
    pub fn sub_bucket_count(&self) -> u32 {
        self.sub_bucket_count
    }

    /// Half of `sub_bucket_count`; the number of slots each bucket after the first contributes.
    pub fn sub_bucket_half_count(&self) -> u32 {
        self.sub_bucket_half_count
    }

    /// `log2(sub_bucket_half_count)`.
    pub fn sub_bucket_half_count_magnitude(&self) -> u8 {
        self.sub_bucket_half_count_magnitude
    }

    /// Bitmask selecting the sub-bucket bits of a value,
    /// `(sub_bucket_count - 1) << unit_magnitude`.
    pub fn sub_bucket_mask(&self) -> u64 {
        self.sub_bucket_mask
    }

    /// Leading zeros of a value in bucket 0, used to find a value's bucket in constant time.
    pub fn leading_zero_count_base(&self) -> u8 {
        self.leading_zero_count_base
    }

    /// Number of doubling tiers needed to cover the highest trackable value.
    pub fn bucket_count(&self) -> u8 {
        self.bucket_count
    }

    /// Total number of counting slots, `(bucket_count + 1) * sub_bucket_half_count`.
    pub fn counts_len(&self) -> usize {
        self.counts_len
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "lowest_trackable_value: {}", self.lowest_trackable_value)?;
        writeln!(f, "highest_trackable_value: {}", self.highest_trackable_value)?;
        writeln!(f, "significant_figures: {}", self.significant_figures)?;
        writeln!(f, "unit_magnitude: {}", self.unit_magnitude)?;
        writeln!(f, "sub_bucket_count: {}", self.sub_bucket_count)?;
        writeln!(f, "sub_bucket_half_count: {}", self.sub_bucket_half_count)?;
        writeln!(f, "sub_bucket_half_count_magnitude: {}", self.sub_bucket_half_count_magnitude)?;
        writeln!(f, "sub_bucket_mask: {:#x}", self.sub_bucket_mask)?;
        writeln!(f, "leading_zero_count_base: {}", self.leading_zero_count_base)?;
        writeln!(f, "bucket_count: {}", self.bucket_count)?;
        write!(f, "counts_len: {}", self.counts_len)
    }
}
