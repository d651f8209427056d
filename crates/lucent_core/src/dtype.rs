#![allow(non_upper_case_globals)]

pub const float64: DType = DType::F64;
pub const complex128: DType = DType::C128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    F64,
    C128,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F64 => "float64",
            Self::C128 => "complex128",
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::F64 => 8,
            Self::C128 => 16,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::C128)
    }

    /// Result dtype of a binary operation on `self` and `other`.
    pub fn promote(self, other: DType) -> DType {
        if self.is_complex() || other.is_complex() {
            Self::C128
        } else {
            Self::F64
        }
    }
}

thread_local! {
    static DEFAULT_DTYPE: std::cell::Cell<DType> = const { std::cell::Cell::new(DType::F64) };
}

pub fn get_default_dtype() -> DType {
    DEFAULT_DTYPE.with(|d| d.get())
}

pub fn set_default_dtype(dtype: DType) {
    DEFAULT_DTYPE.with(|d| d.set(dtype));
}
