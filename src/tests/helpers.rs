use crate::{Histogram, Layout};

pub fn histo64(low: u64, high: u64, sigfig: u8) -> Histogram<u64> {
    Histogram::<u64>::new_with_bounds(low, high, sigfig).unwrap()
}

pub fn layout(low: u64, high: u64, sigfig: u8) -> Layout {
    Layout::new(low, high, sigfig).unwrap()
}
