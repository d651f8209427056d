use crate::dtype::DType;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    DTypeMismatch {
        expected: DType,
        got: DType,
    },
    UnsupportedDType {
        op: &'static str,
        dtype: DType,
    },
    InvalidArgument(String),
    IncompatibleShape(String),
    InvalidSubscripts(String),
    //
    BufferLocked,
    GradLocked,
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        msg: String,
    },
    DimensionMismatch {
        expected: usize,
        got: usize,
    },
    DimensionOutOfBounds {
        dim: isize,
        ndim: usize,
    },
    IndexOutOfBounds {
        index: isize,
        size: usize,
    },
    ConversionError(String),
    NonScalarCost {
        shape: Vec<usize>,
    },
    // serde
    #[cfg(feature = "serde")]
    SerializationError(String),
    #[cfg(feature = "serde")]
    DeserializationError(String),
    //
    Internal {
        message: String,
    },
    External {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DTypeMismatch { expected, got } => {
                write!(f, "DType mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::UnsupportedDType { op, dtype } => {
                write!(f, "Unsupported data type: {} is not defined for {}", op, dtype.as_str())
            }
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::IncompatibleShape(msg) => write!(f, "Incompatible shape: {}", msg),
            Self::InvalidSubscripts(msg) => write!(f, "Invalid einsum subscripts: {}", msg),

            Self::BufferLocked => write!(f, "Buffer is locked"),
            Self::GradLocked => write!(f, "Grad is locked"),
            Self::ShapeMismatch { expected, got, msg } => {
                write!(f, "Shape mismatch ({}): expected {:?}, got {:?}", msg, expected, got)
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {} dimensions, got {}", expected, got)
            }
            Self::DimensionOutOfBounds { dim, ndim } => {
                write!(
                    f,
                    "Dimension out of bounds: dimension {} is not valid for an array with {} dimensions",
                    dim, ndim
                )
            }
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "Index out of bounds: index {} is out of bounds for axis with size {}", index, size)
            }
            Self::ConversionError(msg) => {
                write!(f, "Type conversion error: {}", msg)
            }
            Self::NonScalarCost { shape } => {
                write!(f, "Cost must evaluate to a single element, got shape {:?}", shape)
            }
            #[cfg(feature = "serde")]
            Self::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            #[cfg(feature = "serde")]
            Self::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
            Self::External { message } => {
                write!(f, "External error: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// True for every variant of the shape-mismatch class (broadcasting,
    /// contraction and slicing failures).
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleShape(_)
                | Self::ShapeMismatch { .. }
                | Self::DimensionMismatch { .. }
                | Self::DimensionOutOfBounds { .. }
                | Self::IndexOutOfBounds { .. }
        )
    }
}
