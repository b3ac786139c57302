use num_traits as num;
use std::fmt;

/// The integer type stored in each slot of a histogram's counts array.
///
/// Narrower types trade memory for headroom: a slot stops growing once it reaches the type's
/// maximum. Queries read counts back through `as_u64` for cumulative totals and `as_f64` for the
/// mean and standard deviation.
pub trait Counter:
    num::Num
    + num::ToPrimitive
    + num::FromPrimitive
    + num::Saturating
    + Copy
    + PartialOrd<Self>
    + fmt::Debug
{
    /// The count as an `f64`, for weighted averages.
    fn as_f64(&self) -> f64;
    /// The count widened to a `u64`, for cumulative totals.
    fn as_u64(&self) -> u64;
}

macro_rules! lossless_counter {
    ($($t:ty),*) => {
        $(
            impl Counter for $t {
                #[inline]
                fn as_f64(&self) -> f64 {
                    f64::from(*self)
                }
                #[inline]
                fn as_u64(&self) -> u64 {
                    u64::from(*self)
                }
            }
        )*
    };
}

lossless_counter!(u8, u16, u32);

impl Counter for u64 {
    #[inline]
    fn as_f64(&self) -> f64 {
        // exact up to 2^53
        *self as f64
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        *self
    }
}
