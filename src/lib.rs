//! `hdrfixed` is a fixed-range HdrHistogram for Rust: it counts integer samples (latencies,
//! usually) over a range chosen up front, keeping a fixed number of significant decimal digits
//! for every value in that range.
//!
//! # Precision and memory
//!
//! A histogram configured for `[1, 3_600_000_000]` at 3 significant digits keeps every value
//! within about 0.1%. If the unit is microseconds, that is exact to the microsecond up to about
//! 2 milliseconds, within a millisecond up to a second, and within a few seconds at one hour.
//!
//! The counts array is sized once, from the range and precision alone, and never grows. There is
//! no auto-resizing, so the range has to cover every value that will be recorded. Recording a
//! sample computes its slot directly with a few bit operations; there is no searching.
//!
//! # Recording
//!
//! Build a histogram with `new_with_max`, `new_with_bounds` or from a [`Config`]. Raising the
//! lowest trackable value with `new_with_bounds` shrinks the counts array when the smallest
//! values don't need unit resolution.
//!
//! The histogram below counts values in the `[1..3600000]` range with 1% precision, enough to
//! track latencies from one millisecond up to one hour.
//!
//! ```
//! use hdrfixed::Histogram;
//! let mut hist = Histogram::<u64>::new_with_bounds(1, 60 * 60 * 1000, 2).unwrap();
//!
//! // samples can be recorded using .record, which will error if the value is too small or large
//! hist.record(54321).expect("value 54321 should be in range");
//!
//! // for ergonomics, samples can also be recorded with +=
//! // this call will panic if the value is out of range!
//! hist += 54321;
//!
//! // if the code that generates the values is subject to Coordinated Omission,
//! // the self-correcting record method should be used instead.
//! // for example, if the expected sampling interval is 10 msec:
//! hist.record_correct(54321, 10).expect("value 54321 should be in range");
//! ```
//!
//! The `u64` type parameter is the per-slot counter. A `u8`, `u16` or `u32` counter uses less
//! memory, and its slots saturate instead of wrapping.
//!
//! # Querying
//!
//! Totals, percentiles, the mean and the standard deviation can be read at any time:
//!
//! ```
//! use hdrfixed::Histogram;
//! let mut hist = Histogram::<u64>::new_with_max(60 * 60 * 1000, 2).unwrap();
//! hist += 1000;
//! println!("# of samples: {}", hist.len());
//! println!("99.9'th percentile: {}", hist.value_at_percentile(99.9));
//! println!("mean: {:?}", hist.mean());
//! ```
//!
//! Values reported by queries are never the raw recorded values: they are the lowest, highest or
//! median value of the slot a sample landed in, so that repeated queries against the same data
//! are stable. The one exception is `min`, which is kept exact.
//!
//! The traversal used by the queries is also available directly. `iter_recorded()` yields one
//! item for every non-empty slot, in ascending value order:
//!
//! ```
//! use hdrfixed::Histogram;
//! let hist = Histogram::<u64>::new_with_max(60 * 60 * 1000, 2).unwrap();
//! // ...
//! for v in hist.iter_recorded() {
//!     println!("{}'th percentile of data is {} with {} samples",
//!         v.percentile(), v.value_iterated_to(), v.count_at_value());
//! }
//! ```
//!
//! # Limitations and Caveats
//!
//! A number of HdrHistogram features are deliberately left out of this crate:
//!
//!  - Auto-resizing, and value shifting ("normalization").
//!  - Adding, subtracting or otherwise merging histograms.
//!  - Concurrency support. Use one histogram per thread, or wrap one in a lock.
//!  - Serialization and encoding/decoding of histogram contents. The layout and the
//!    configuration do implement `serde::Serialize`, and per-slot access is public, so an encoding
//!    can be built on top.

#![deny(
    missing_docs,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces,
    variant_size_differences
)]

use std::cmp;
use std::ops::AddAssign;

use tracing::{debug, trace};

pub mod config;
pub mod core;
pub mod errors;
pub mod iterators;

pub use crate::config::Config;
pub use crate::core::counter::*;
pub use crate::core::layout::Layout;
pub use crate::errors::*;

/// Sentinel for `min_value` before anything has been recorded.
const ORIGINAL_MIN: u64 = u64::max_value();
/// Sentinel for `max_value` before anything has been recorded.
const ORIGINAL_MAX: u64 = 0;

/// A fixed-range histogram of sample counts.
///
/// Values are grouped into slots whose width grows with the value, much like a float: a power of
/// two picks the bucket (the exponent) and a linear sub-bucket index picks the slot within it
/// (the mantissa). Every bucket after the first only needs its upper half, because the lower half
/// is already covered, at finer resolution, by the buckets below it.
///
/// With 2048 sub-buckets and a lowest trackable value of 1, the counts array is laid out as:
///
/// ```text
/// bucket 0: [0, 1, 2, ..., 2047]              (2048 slots, step 1)
/// bucket 1: [2048, 2050, ..., 4094]           (1024 slots, step 2)
/// bucket 2: [4096, 4100, ..., 8188]           (1024 slots, step 4)
/// ```
///
/// A histogram is either empty (nothing recorded, `min`/`max` report their sentinels) or
/// populated. `record` moves it from empty to populated, `reset` moves it back. The counts array
/// is allocated once, at construction, and is never resized.
#[derive(Debug, Clone)]
pub struct Histogram<T: Counter> {
    layout: Layout,

    max_value: u64,
    min_value: u64,

    total_count: u64,
    pub(crate) counts: Vec<T>,
}

// Construction

impl<T: Counter> Histogram<T> {
    /// Construct a `Histogram` given a known maximum value to be tracked, and a number of
    /// significant decimal digits. The histogram will be constructed to track values as low as 1.
    ///
    /// See [`new_with_bounds`](#method.new_with_bounds) for info on `high` and `sigfig`.
    pub fn new_with_max(high: u64, sigfig: u8) -> Result<Histogram<T>, CreationError> {
        Self::new_with_bounds(1, high, sigfig)
    }

    /// Construct a `Histogram` with known upper and lower bounds for recorded sample values.
    ///
    /// `low` is the lowest value that can be recorded by the histogram, and must be a positive
    /// integer that is >= 1. Providing a `low` is useful is situations where the units used for
    /// the histogram's values are much smaller that the minimal accuracy required. E.g. when
    /// tracking time values stated in nanosecond units, where the minimal accuracy required is a
    /// microsecond, the proper value for `low` would be 1000. Recording a value below `low` is an
    /// error.
    ///
    /// `high` is the highest value to be tracked by the histogram, and must be a
    /// positive integer that is `>= (2 * low)`.
    ///
    /// `sigfig` Specifies the number of significant figures to maintain. This is the number of
    /// significant decimal digits to which the histogram will maintain value resolution and
    /// separation. Must be in the range [1, 5].
    pub fn new_with_bounds(low: u64, high: u64, sigfig: u8) -> Result<Histogram<T>, CreationError> {
        Layout::new(low, high, sigfig).map(Self::from_layout)
    }

    /// Construct a `Histogram` from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Histogram<T>, CreationError> {
        config.layout().map(Self::from_layout)
    }

    /// Construct an empty `Histogram` with the same layout as `source`.
    pub fn new_from<F: Counter>(source: &Histogram<F>) -> Histogram<T> {
        Self::from_layout(source.layout)
    }

    fn from_layout(layout: Layout) -> Histogram<T> {
        debug!(
            lowest_trackable_value = layout.lowest_trackable_value,
            highest_trackable_value = layout.highest_trackable_value,
            significant_figures = layout.significant_figures,
            unit_magnitude = layout.unit_magnitude,
            sub_bucket_count = layout.sub_bucket_count,
            bucket_count = layout.bucket_count,
            counts_len = layout.counts_len,
            "Allocating histogram counts."
        );

        Histogram {
            layout,
            max_value: ORIGINAL_MAX,
            min_value: ORIGINAL_MIN,
            total_count: 0,
            counts: vec![T::zero(); layout.counts_len],
        }
    }
}

// accessors

impl<T: Counter> Histogram<T> {
    /// Get the derived bucket layout of this histogram.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the configuration this histogram was built from.
    pub fn config(&self) -> Config {
        Config::from(&self.layout)
    }

    /// Get the configured lowest trackable value.
    pub fn low(&self) -> u64 {
        self.layout.lowest_trackable_value
    }

    /// Get the configured highest trackable value.
    pub fn high(&self) -> u64 {
        self.layout.highest_trackable_value
    }

    /// Get the configured number of significant value digits.
    pub fn sigfig(&self) -> u8 {
        self.layout.significant_figures
    }

    /// Get the total number of samples recorded.
    pub fn len(&self) -> u64 {
        self.total_count
    }

    /// Returns true if this histogram has no recorded values.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Get the number of buckets used by the histogram to cover the highest trackable value.
    pub fn buckets(&self) -> u8 {
        self.layout.bucket_count
    }

    /// Get the number of distinct values (slots) in the counts array.
    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }

    /// Get the index of the last slot in the counts array.
    pub fn last_index(&self) -> usize {
        self.distinct_values() - 1
    }

    /// Find the slot index for `value`, or `None` if `value` lies beyond the last slot.
    pub fn index_for(&self, value: u64) -> Option<usize> {
        self.layout.index_for(value)
    }

    /// Get the lowest value that maps to the slot at `index`, or `None` if there is no such slot.
    pub fn value_for(&self, index: usize) -> Option<u64> {
        self.layout.value_for(index)
    }

    /// Get the count of recorded values in the slot at `index`, or `None` if there is no such
    /// slot.
    pub fn count_at_index(&self, index: usize) -> Option<T> {
        self.counts.get(index).cloned()
    }

    /// Get the count of recorded values at a specific value (to within the histogram resolution
    /// at the value level).
    ///
    /// The count is computed across values recorded in the histogram that are within the value
    /// range that is `>= lowest_equivalent(value)` and `<= highest_equivalent(value)`. Values
    /// beyond the last slot are clamped to it.
    pub fn count_at(&self, value: u64) -> T {
        let index = self.index_for(value).unwrap_or_else(|| self.last_index());
        self.counts[index]
    }
}

// equivalence

impl<T: Counter> Histogram<T> {
    /// Get the size (in value units) of the range of values that are equivalent to the given value
    /// within the histogram's resolution. Where "equivalent" means that value samples recorded for
    /// any two equivalent values are counted in a common total count.
    pub fn equivalent_range(&self, value: u64) -> u64 {
        self.layout.equivalent_range(value)
    }

    /// Get the lowest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn lowest_equivalent(&self, value: u64) -> u64 {
        self.layout.lowest_equivalent(value)
    }

    /// Get the highest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn highest_equivalent(&self, value: u64) -> u64 {
        self.layout.highest_equivalent(value)
    }

    /// Get a value that lies in the middle (rounded up) of the range of values equivalent the
    /// given value.
    pub fn median_equivalent(&self, value: u64) -> u64 {
        self.layout.median_equivalent(value)
    }

    /// Get the next value that is *not* equivalent to the given value within the histogram's
    /// resolution.
    pub fn next_non_equivalent(&self, value: u64) -> u64 {
        self.layout.next_non_equivalent(value)
    }

    /// Determine if two values are equivalent with the histogram's resolution.
    pub fn equivalent(&self, value1: u64, value2: u64) -> bool {
        self.layout.equivalent(value1, value2)
    }
}

// administrative

impl<T: Counter> Histogram<T> {
    /// Reset the contents and statistics of this histogram, preserving its layout and without
    /// reallocating.
    pub fn reset(&mut self) {
        trace!(total_count = self.total_count, "Resetting histogram.");

        for c in self.counts.iter_mut() {
            *c = T::zero();
        }
        self.total_count = 0;
        self.max_value = ORIGINAL_MAX;
        self.min_value = ORIGINAL_MIN;
    }
}

// recording

impl<T: Counter> AddAssign<u64> for Histogram<T> {
    /// Record a single sample, panicking if it is outside the trackable range.
    fn add_assign(&mut self, value: u64) {
        self.record(value).unwrap();
    }
}

impl<T: Counter> Histogram<T> {
    /// Record `value` in the histogram.
    ///
    /// Returns an error if `value` is below the lowest trackable value, or beyond the highest
    /// slot of the histogram.
    pub fn record(&mut self, value: u64) -> Result<(), RecordError> {
        self.record_n(value, T::one())
    }

    /// Record multiple samples for a value in the histogram, adding to the value's current count.
    ///
    /// `count` is the number of occurrences of this value to record. The slot count and the total
    /// count saturate instead of overflowing.
    ///
    /// Returns an error if `value` is below the lowest trackable value, or beyond the highest
    /// slot of the histogram.
    pub fn record_n(&mut self, value: u64, count: T) -> Result<(), RecordError> {
        if value < self.layout.lowest_trackable_value {
            return Err(RecordError::ValueBelowLowest);
        }
        let index = self
            .layout
            .index_for(value)
            .ok_or(RecordError::ValueOutOfRange)?;

        if count == T::zero() {
            return Ok(());
        }

        let slot = &mut self.counts[index];
        *slot = slot.saturating_add(count);
        self.total_count = self.total_count.saturating_add(count.as_u64());
        self.update_min_max(value);
        Ok(())
    }

    /// Record a value in the histogram while correcting for coordinated omission.
    ///
    /// See `record_n_correct` for further documentation.
    pub fn record_correct(&mut self, value: u64, interval: u64) -> Result<(), RecordError> {
        self.record_n_correct(value, T::one(), interval)
    }

    /// Record multiple values in the histogram while correcting for coordinated omission.
    ///
    /// To compensate for the loss of sampled values when a recorded value is larger than the
    /// expected interval between value samples, this method will auto-generate and record an
    /// additional series of decreasingly-smaller (down to `interval`) value records. Back-filled
    /// values that would fall below the lowest trackable value are not recorded.
    ///
    /// If `interval` is 0, no back-filling is done.
    pub fn record_n_correct(
        &mut self,
        value: u64,
        count: T,
        interval: u64,
    ) -> Result<(), RecordError> {
        self.record_n(value, count)?;
        if interval == 0 {
            return Ok(());
        }

        let floor = cmp::max(interval, self.layout.lowest_trackable_value);
        if value > interval {
            // only enter loop when calculations will stay non-negative
            let mut missing_value = value - interval;
            while missing_value >= floor {
                self.record_n(missing_value, count)?;
                missing_value -= interval;
            }
        }

        Ok(())
    }

    fn update_min_max(&mut self, value: u64) {
        if value > self.max_value {
            self.max_value = value;
        }
        if value < self.min_value {
            self.min_value = value;
        }
    }
}

// iterators

impl<T: Counter> Histogram<T> {
    /// Iterate through histogram values such that each slot with a non-zero count is yielded,
    /// in ascending value order.
    ///
    /// Each call starts a fresh traversal. The iterator stops as soon as every recorded sample
    /// has been accounted for, so the trailing empty slots are never visited.
    ///
    /// ```
    /// use hdrfixed::Histogram;
    ///
    /// let mut hist = Histogram::<u64>::new_with_max(10_000, 3).unwrap();
    /// hist += 100;
    /// hist += 500;
    /// hist += 800;
    /// hist += 850;
    ///
    /// let perc = hist.iter_recorded().map(|v| v.percentile()).collect::<Vec<_>>();
    /// assert_eq!(perc, vec![25.0, 50.0, 75.0, 100.0]);
    /// ```
    pub fn iter_recorded(&self) -> iterators::HistogramIterator<'_, T, iterators::recorded::Iter> {
        iterators::recorded::Iter::new(self)
    }

    /// Iterate through every slot of the histogram, including empty ones, in ascending value
    /// order.
    pub fn iter_all(&self) -> iterators::HistogramIterator<'_, T, iterators::all::Iter> {
        iterators::all::Iter::new(self)
    }
}

// minor data statistics

impl<T: Counter> Histogram<T> {
    /// Get the lowest recorded value level in the histogram.
    ///
    /// This is the exact value recorded, not an equivalent one. If the histogram has no recorded
    /// values, this is `u64::max_value()`.
    pub fn min(&self) -> u64 {
        if self.is_empty() {
            ORIGINAL_MIN
        } else {
            self.min_value
        }
    }

    /// Get the highest recorded value level in the histogram.
    ///
    /// This is the highest value equivalent to the largest value recorded, consistent with what
    /// `value_at_percentile(100.0)` reports. If the histogram has no recorded values, this is 0.
    pub fn max(&self) -> u64 {
        if self.is_empty() {
            ORIGINAL_MAX
        } else {
            self.highest_equivalent(self.max_value)
        }
    }
}

// major data statistics

impl<T: Counter> Histogram<T> {
    /// Get the computed mean value of all recorded values in the histogram.
    ///
    /// Each slot contributes its median equivalent value, weighted by its count. Returns `None`
    /// if nothing has been recorded.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let total = self.iter_recorded().fold(0.0_f64, |total, v| {
            let median = self.median_equivalent(v.value_iterated_from()) as f64;
            total + median * v.count_at_value().as_f64()
        });
        Some(total / self.total_count as f64)
    }

    /// Get the computed population standard deviation of all recorded values in the histogram,
    /// around the given `mean` (usually the result of `mean()`).
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn stdev(&self, mean: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let geom_dev_tot = self.iter_recorded().fold(0.0_f64, |gdt, v| {
            let dev = self.median_equivalent(v.value_iterated_from()) as f64 - mean;
            gdt + (dev * dev) * v.count_at_value().as_f64()
        });

        Some((geom_dev_tot / self.total_count as f64).sqrt())
    }

    /// Get the value at a given percentile.
    ///
    /// The value returned is the highest equivalent value of the first slot at which the
    /// cumulative count reaches `ceil(percentile / 100 * len())` samples, so that the given
    /// percentage of the recorded samples are smaller than or equivalent to it. At least the
    /// first recorded slot is always reached.
    ///
    /// Percentiles above 100 are treated as 100. Returns 0 if the histogram is empty.
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        if self.is_empty() {
            return 0;
        }

        // Truncate down to 100%
        let percentile = if percentile > 100.0 { 100.0 } else { percentile };

        // multiply before dividing so whole percentages of round totals stay exact
        let count_at_percentile = (percentile * self.total_count as f64 / 100.0).ceil();

        // Make sure we at least reach the first recorded entry
        let count_at_percentile = if count_at_percentile < 1.0 {
            1
        } else {
            count_at_percentile as u64
        };

        // saturated slot counts can leave the cumulative count short of the total
        self.iter_recorded()
            .find(|v| v.total_count_to_index() >= count_at_percentile)
            .map_or_else(|| self.max(), |v| v.value_iterated_to())
    }

    /// Get the percentile of samples at and below a given value.
    ///
    /// The percentile returned is the percentile of values recorded in the histogram that are
    /// smaller than or equivalent to the given value. Returns 100.0 if the histogram is empty.
    pub fn percentile_below(&self, value: u64) -> f64 {
        if self.is_empty() {
            return 100.0;
        }

        let target_index = self.index_for(value).unwrap_or_else(|| self.last_index());
        let total_to_current_index = self.counts[..=target_index]
            .iter()
            .fold(0_u64, |t, c| t.saturating_add(c.as_u64()));
        100.0 * total_to_current_index as f64 / self.total_count as f64
    }

    /// Get the count of recorded values within a range of value levels (inclusive to within the
    /// histogram's resolution).
    ///
    /// `low` gives the lower value bound on the range for which to provide the recorded count.
    /// Will be rounded down with `lowest_equivalent`. Similarly, `high` gives the higher value
    /// bound on the range, and will be rounded up with `highest_equivalent`. Bounds beyond the
    /// last slot are clamped to it.
    pub fn count_between(&self, low: u64, high: u64) -> u64 {
        let low_index = self.index_for(low).unwrap_or_else(|| self.last_index());
        let high_index = self.index_for(high).unwrap_or_else(|| self.last_index());
        if low_index > high_index {
            return 0;
        }
        self.counts[low_index..=high_index]
            .iter()
            .fold(0_u64, |t, c| t.saturating_add(c.as_u64()))
    }
}

#[path = "tests/tests.rs"]
#[cfg(test)]
mod tests;
