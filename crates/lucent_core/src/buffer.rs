use crate::{
    complex::Complex128,
    dtype::DType,
    error::{Error, Result},
    scalar::Scalar,
};

/// Contiguous host storage of a dense array.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    F64(Vec<f64>),
    C128(Vec<Complex128>),
}

impl Buffer {
    pub fn zeros(size: usize, dtype: DType) -> Self {
        match dtype {
            DType::F64 => Self::F64(vec![0.0; size]),
            DType::C128 => Self::C128(vec![Complex128::ZERO; size]),
        }
    }

    pub fn filled(size: usize, value: Scalar) -> Self {
        match value {
            Scalar::F64(x) => Self::F64(vec![x; size]),
            Scalar::C128(z) => Self::C128(vec![z; size]),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Self::F64(_) => DType::F64,
            Self::C128(_) => DType::C128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::F64(v) => v.len(),
            Self::C128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            Self::F64(v) => v.get(index).map(|&x| Scalar::F64(x)),
            Self::C128(v) => v.get(index).map(|&z| Scalar::C128(z)),
        }
    }

    pub fn as_f64_slice(&self) -> Result<&[f64]> {
        match self {
            Self::F64(v) => Ok(v),
            Self::C128(_) => Err(Error::DTypeMismatch {
                expected: DType::F64,
                got: DType::C128,
            }),
        }
    }

    pub fn as_c128_slice(&self) -> Result<&[Complex128]> {
        match self {
            Self::C128(v) => Ok(v),
            Self::F64(_) => Err(Error::DTypeMismatch {
                expected: DType::C128,
                got: DType::F64,
            }),
        }
    }

    /// Widening conversion. Narrowing complex to real is refused; use
    /// `real()` on the array to drop the imaginary part explicitly.
    pub fn to_dtype(&self, dtype: DType) -> Result<Buffer> {
        match (self, dtype) {
            (Self::F64(_), DType::F64) | (Self::C128(_), DType::C128) => Ok(self.clone()),
            (Self::F64(v), DType::C128) => Ok(Self::C128(v.iter().map(|&x| Complex128::from(x)).collect())),
            (Self::C128(_), DType::F64) => Err(Error::ConversionError(
                "cannot narrow complex128 buffer to float64".to_string(),
            )),
        }
    }
}
