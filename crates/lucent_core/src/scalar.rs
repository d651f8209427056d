use crate::{
    complex::Complex128,
    dtype::DType,
    error::{Error, Result},
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    F64(f64),
    C128(Complex128),
}

impl Scalar {
    pub fn dtype(&self) -> DType {
        match self {
            Self::F64(_) => DType::F64,
            Self::C128(_) => DType::C128,
        }
    }

    /// Real value; complex scalars only convert when their imaginary part is zero.
    pub fn as_f64(&self) -> Result<f64> {
        match *self {
            Self::F64(x) => Ok(x),
            Self::C128(z) if z.im == 0.0 => Ok(z.re),
            Self::C128(z) => Err(Error::ConversionError(format!("cannot convert complex value {} to float64", z))),
        }
    }

    pub fn as_complex(&self) -> Complex128 {
        match *self {
            Self::F64(x) => Complex128::from(x),
            Self::C128(z) => z,
        }
    }
}

macro_rules! impl_from_real {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(x: $t) -> Self {
                    Self::F64(x as f64)
                }
            }
        )*
    };
}

impl_from_real!(f64, f32, i32, i64, u32, usize);

impl From<Complex128> for Scalar {
    fn from(z: Complex128) -> Self {
        Self::C128(z)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F64(x) => write!(f, "{}", x),
            Self::C128(z) => write!(f, "{}", z),
        }
    }
}
