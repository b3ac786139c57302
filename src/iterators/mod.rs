//! Traversals over a histogram's counts array.
//!
//! Every query that needs to look at more than one slot (percentiles, mean, standard deviation)
//! is built on the single traversal defined here: a lazy walk over slot indices in ascending
//! order, which is also ascending value order. The walk is finite (it never goes past the last
//! slot) and restartable (each call to `Histogram::iter_recorded` starts over, and a
//! `HistogramIterator` can be cloned mid-way).
//!
//! Which slots are yielded is decided by a `PickyIterator`; see `recorded` and `all`.

use std::iter::FusedIterator;

use crate::core::counter::Counter;
use crate::Histogram;

/// An iterator that yields every slot, empty or not.
pub mod all;
/// An iterator that yields only slots with at least one sample.
pub mod recorded;

/// A trait for designing an subset iterator over values in a `Histogram`.
pub trait PickyIterator<T: Counter> {
    /// Should an item be yielded for the given index?
    fn pick(&mut self, index: usize, count_at_index: T) -> bool;
    /// Should we keep iterating even though all future indices are zeros?
    fn more(&mut self, index_to_pick: usize) -> bool;
}

/// `HistogramIterator` provides a base iterator for a `Histogram`.
///
/// It will iterate over all discrete slots in the histogram in ascending value order, and ask
/// the provided `PickyIterator` whether each one should be yielded.
#[derive(Debug, Clone)]
pub struct HistogramIterator<'a, T: 'a + Counter, P: PickyIterator<T>> {
    hist: &'a Histogram<T>,
    total_count_to_index: u64,
    current_index: usize,
    ended: bool,
    picker: P,
}

/// The value emitted at each step when iterating over a `Histogram`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationValue<T: Counter> {
    index: usize,
    value_iterated_from: u64,
    value_iterated_to: u64,
    percentile: f64,
    count_at_value: T,
    total_count_to_index: u64,
}

impl<T: Counter> IterationValue<T> {
    /// Create a new IterationValue.
    pub fn new(
        index: usize,
        value_iterated_from: u64,
        value_iterated_to: u64,
        percentile: f64,
        count_at_value: T,
        total_count_to_index: u64,
    ) -> IterationValue<T> {
        IterationValue {
            index,
            value_iterated_from,
            value_iterated_to,
            percentile,
            count_at_value,
            total_count_to_index,
        }
    }

    /// The index of the slot in the counts array.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The lowest value equivalent to this slot.
    pub fn value_iterated_from(&self) -> u64 {
        self.value_iterated_from
    }

    /// The highest value equivalent to this slot. This is what percentile queries report.
    pub fn value_iterated_to(&self) -> u64 {
        self.value_iterated_to
    }

    /// Percentage of all recorded samples that are at or below this slot, in `[0, 100]`.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Recorded count for values equivalent to this slot.
    pub fn count_at_value(&self) -> T {
        self.count_at_value
    }

    /// Cumulative count of all slots up to and including this one.
    pub fn total_count_to_index(&self) -> u64 {
        self.total_count_to_index
    }
}

impl<'a, T: Counter, P: PickyIterator<T>> HistogramIterator<'a, T, P> {
    fn new(h: &'a Histogram<T>, picker: P) -> HistogramIterator<'a, T, P> {
        HistogramIterator {
            hist: h,
            total_count_to_index: 0,
            current_index: 0,
            ended: false,
            picker,
        }
    }

    fn current(&self, index: usize, count: T) -> IterationValue<T> {
        let total = self.hist.len();
        let percentile = if total == 0 {
            100.0
        } else {
            100.0 * self.total_count_to_index as f64 / total as f64
        };
        let value = self.hist.layout().value_at_index(index);
        IterationValue::new(
            index,
            self.hist.lowest_equivalent(value),
            self.hist.highest_equivalent(value),
            percentile,
            count,
            self.total_count_to_index,
        )
    }
}

impl<'a, T: 'a, P> Iterator for HistogramIterator<'a, T, P>
where
    T: Counter,
    P: PickyIterator<T>,
{
    type Item = IterationValue<T>;

    fn next(&mut self) -> Option<Self::Item> {
        // Most of the slots (especially towards the end) will be zeros. Once we have accounted for
        // every recorded sample, we only keep going while the picker asks for more. A saturated
        // total can't tell us when that happens, so then the walk runs to the last slot.
        let total = self.hist.len();
        let total_is_exact = total != u64::max_value();
        while !self.ended {
            if self.current_index == self.hist.distinct_values() {
                self.ended = true;
                return None;
            }

            if total_is_exact
                && self.total_count_to_index >= total
                && !self.picker.more(self.current_index)
            {
                self.ended = true;
                return None;
            }

            let index = self.current_index;
            let count = self.hist.counts[index];
            self.current_index += 1;
            // saturating so a histogram with saturated slots still terminates cleanly
            self.total_count_to_index = self.total_count_to_index.saturating_add(count.as_u64());

            if self.picker.pick(index, count) {
                return Some(self.current(index, count));
            }
        }
        None
    }
}

impl<'a, T: 'a + Counter, P: PickyIterator<T>> FusedIterator for HistogramIterator<'a, T, P> {}
