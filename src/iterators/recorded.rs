use crate::core::counter::Counter;
use crate::iterators::{HistogramIterator, PickyIterator};
use crate::Histogram;

/// An iterator that will yield only bins with at least one sample.
#[derive(Debug, Clone, Copy)]
pub struct Iter;

impl Iter {
    /// Construct a new sampled iterator. See `Histogram::iter_recorded` for details.
    pub fn new<T: Counter>(hist: &Histogram<T>) -> HistogramIterator<'_, T, Iter> {
        HistogramIterator::new(hist, Iter)
    }
}

impl<T: Counter> PickyIterator<T> for Iter {
    fn pick(&mut self, _: usize, count_at_index: T) -> bool {
        count_at_index != T::zero()
    }

    fn more(&mut self, _: usize) -> bool {
        false
    }
}
