use crate::core::layout::Layout;

impl Layout {
    /// Returns the doubling tier that holds `value` at the finest available resolution.
    #[inline]
    pub fn bucket_for(&self, value: u64) -> u8 {
        // Each tier holds values up to twice as large as the one before, so the tier is how many
        // bits `value` has beyond the widest value of bucket 0. Or-ing in the mask gives every
        // value at least that many bits, which pins small values to bucket 0 and keeps the
        // subtraction from underflowing.
        self.leading_zero_count_base - (value | self.sub_bucket_mask).leading_zeros() as u8
    }

    /// Returns the linear position of `value` within the given bucket.
    ///
    /// In bucket 0 this is anywhere in `[0, sub_bucket_count)`. In every later bucket it is in
    /// the top half, since a value in the bottom half would have been placed one bucket lower.
    #[inline]
    pub fn sub_bucket_for(&self, value: u64, bucket_index: u8) -> u32 {
        (value >> (bucket_index + self.unit_magnitude)) as u32
    }

    /// Maps a (bucket, sub-bucket) pair to its offset in the flat counts array.
    ///
    /// The result may lie beyond `counts_len` for locations above the highest trackable value.
    #[inline]
    pub fn index_from_loc(&self, bucket_index: u8, sub_bucket_index: u32) -> usize {
        debug_assert!(sub_bucket_index < self.sub_bucket_count);
        debug_assert!(bucket_index == 0 || (sub_bucket_index >= self.sub_bucket_half_count));

        // Bucket k's used (top) half starts at slot (k + 1) * half_count. Bucket 0 also owns the
        // half_count slots below that, for its bottom half.
        let bucket_base_index =
            (usize::from(bucket_index) + 1) << self.sub_bucket_half_count_magnitude;

        // base >= half_count, so add before subtracting
        bucket_base_index + sub_bucket_index as usize - self.sub_bucket_half_count as usize
    }

    /// Returns the index in the counts array for `value`, or `None` if `value` is beyond the
    /// highest slot.
    #[inline]
    pub fn index_for(&self, value: u64) -> Option<usize> {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        let index = self.index_from_loc(bucket_index, sub_bucket_index);
        if index < self.counts_len {
            Some(index)
        } else {
            None
        }
    }

    /// Returns the lowest value that maps to the given index, or `None` if there is no such slot.
    ///
    /// This is the inverse of `index_for` up to equivalence.
    pub fn value_for(&self, index: usize) -> Option<u64> {
        if index < self.counts_len {
            Some(self.value_at_index(index))
        } else {
            None
        }
    }

    /// `value_for` for an index known to be in the counts array.
    pub(crate) fn value_at_index(&self, index: usize) -> u64 {
        debug_assert!(index < self.counts_len);

        // Every sub_bucket_half_count slots start a new bucket, but the first
        // 2 * sub_bucket_half_count slots all belong to bucket 0.
        let tier = index >> self.sub_bucket_half_count_magnitude;
        let offset = (index & (self.sub_bucket_half_count as usize - 1)) as u32;

        if tier == 0 {
            // bottom half of bucket 0
            self.value_from_loc(0, offset)
        } else {
            // tier <= bucket_count for any index below counts_len
            self.value_from_loc((tier - 1) as u8, offset + self.sub_bucket_half_count)
        }
    }

    /// Computes the lowest value of the given location.
    #[inline]
    pub fn value_from_loc(&self, bucket_index: u8, sub_bucket_index: u32) -> u64 {
        // Sum won't overflow; must be less than 64
        u64::from(sub_bucket_index) << (bucket_index + self.unit_magnitude)
    }
}
