use crate::core::counter::Counter;
use crate::iterators::{HistogramIterator, PickyIterator};
use crate::Histogram;

/// An iterator that will yield every bin.
#[derive(Debug, Clone, Copy)]
pub struct Iter;

impl Iter {
    /// Construct a new full iterator. See `Histogram::iter_all` for details.
    pub fn new<T: Counter>(hist: &Histogram<T>) -> HistogramIterator<'_, T, Iter> {
        HistogramIterator::new(hist, Iter)
    }
}

impl<T: Counter> PickyIterator<T> for Iter {
    fn pick(&mut self, _: usize, _: T) -> bool {
        true
    }

    fn more(&mut self, _: usize) -> bool {
        true
    }
}
