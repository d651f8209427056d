//! Complex element type.
//!
//! Stored as an interleaved `(re, im)` pair of `f64`, matching the layout of
//! NumPy's `complex128`.

use lucent_cpu::Element;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex128 {
    pub re: f64,
    pub im: f64,
}

impl Complex128 {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `r * e^(iθ)`
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self {
            re: r * theta.cos(),
            im: r * theta.sin(),
        }
    }

    /// `e^(iθ)` for real `θ`.
    #[inline]
    pub fn cis(theta: f64) -> Self {
        Self::from_polar(1.0, theta)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// `|z|² = re² + im²`
    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    #[inline]
    pub fn exp(self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    /// Principal branch of `z^p` for a real exponent.
    #[inline]
    pub fn powf(self, p: f64) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return if p == 0.0 { Self::ONE } else { Self::ZERO };
        }
        Self::from_polar(self.magnitude().powf(p), self.phase() * p)
    }

    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self {
            re: self.re * s,
            im: self.im * s,
        }
    }
}

impl Add for Complex128 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex128 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex128 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.re * rhs.re - self.im * rhs.im, self.re * rhs.im + self.im * rhs.re)
    }
}

impl Div for Complex128 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.magnitude_squared();
        let num = self * rhs.conj();
        Self::new(num.re / denom, num.im / denom)
    }
}

impl Neg for Complex128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl From<f64> for Complex128 {
    #[inline]
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

impl From<(f64, f64)> for Complex128 {
    #[inline]
    fn from((re, im): (f64, f64)) -> Self {
        Self::new(re, im)
    }
}

impl Element for Complex128 {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Complex128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{}+{}i", self.re, self.im)
        } else {
            write!(f, "{}{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let z = Complex128::new(3.0, 4.0);
        let w = Complex128::new(1.0, 2.0);

        assert_eq!(z.magnitude(), 5.0);
        assert_eq!(z * w, Complex128::new(-5.0, 10.0));
        assert_eq!(z * z.conj(), Complex128::new(25.0, 0.0));

        let q = (z * w) / w;
        assert!((q.re - 3.0).abs() < 1e-12 && (q.im - 4.0).abs() < 1e-12);
    }

    #[test]
    fn exp_of_imaginary_is_unit() {
        let z = Complex128::new(0.0, std::f64::consts::FRAC_PI_2).exp();
        assert!(z.re.abs() < 1e-15);
        assert!((z.im - 1.0).abs() < 1e-15);
    }

    #[test]
    fn powf_matches_repeated_product() {
        let z = Complex128::new(0.5, -1.5);
        let cube = z.powf(3.0);
        let expected = z * z * z;
        assert!((cube.re - expected.re).abs() < 1e-12);
        assert!((cube.im - expected.im).abs() < 1e-12);
    }
}
