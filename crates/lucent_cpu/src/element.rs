use std::ops::{Add, Mul, Neg, Sub};

/// Scalar element the kernels operate on.
pub trait Element:
    Copy + Send + Sync + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self> + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Element for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}
