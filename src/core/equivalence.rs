use crate::core::layout::Layout;

// Two values are "equivalent" when samples recorded for either are counted in a common slot.

impl Layout {
    /// Get the size (in value units) of the range of values that are equivalent to the given value
    /// within the histogram's resolution.
    pub fn equivalent_range(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        // calculate distance to next value
        1_u64
            << (self.unit_magnitude
                + if sub_bucket_index >= self.sub_bucket_count {
                    bucket_index + 1
                } else {
                    bucket_index
                })
    }

    /// Get the lowest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn lowest_equivalent(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        self.value_from_loc(bucket_index, sub_bucket_index)
    }

    /// Get the highest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn highest_equivalent(&self, value: u64) -> u64 {
        // the top slot ends exactly at u64::max_value(), so this can't overflow
        self.lowest_equivalent(value) + (self.equivalent_range(value) - 1)
    }

    /// Get a value that lies in the middle (rounded up) of the range of values equivalent the
    /// given value.
    ///
    /// Note that the return value is capped at `u64::max_value()`.
    pub fn median_equivalent(&self, value: u64) -> u64 {
        // adding half of the range to the bottom of the range shouldn't overflow
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range(value) >> 1)
    }

    /// Get the next value that is *not* equivalent to the given value within the histogram's
    /// resolution.
    ///
    /// Note that the return value is capped at `u64::max_value()`.
    pub fn next_non_equivalent(&self, value: u64) -> u64 {
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range(value))
    }

    /// Determine if two values are equivalent with the histogram's resolution.
    pub fn equivalent(&self, value1: u64, value2: u64) -> bool {
        self.lowest_equivalent(value1) == self.lowest_equivalent(value2)
    }
}
