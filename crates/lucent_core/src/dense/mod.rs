//! Dense n-dimensional arrays: the numeric backend underneath the graph.
//!
//! Storage is always contiguous and row-major. Cloning a [`DenseArray`]
//! shares its buffer; mutation goes through [`DenseArray::with_buffer_mut`]
//! which copies on write.

mod adapter;
mod binary;
mod contract;
mod creation;
mod indexing;
mod reduction;
#[cfg(feature = "serde")]
mod serde;
mod transform;
mod unary;

pub use adapter::ArrayAdapter;
pub use contract::{EinsumSpec, TensordotAxes};
pub use indexing::SliceArg;

use crate::{
    buffer::Buffer,
    complex::Complex128,
    dtype::DType,
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
};
use std::{borrow::Cow, sync::Arc};

#[derive(Debug, Clone)]
pub struct DenseArray {
    buffer: Arc<Buffer>,
    layout: Layout,
}

impl DenseArray {
    pub fn from_buffer(buffer: Buffer, shape: &[usize]) -> Result<Self> {
        let layout = Layout::from_shape(shape);
        if buffer.len() != layout.size() {
            return Err(Error::IncompatibleShape(format!(
                "buffer of {} elements cannot have shape {:?}",
                buffer.len(),
                shape
            )));
        }
        Ok(Self {
            buffer: Arc::new(buffer),
            layout,
        })
    }

    pub fn from_vec(data: Vec<f64>, shape: &[usize]) -> Result<Self> {
        Self::from_buffer(Buffer::F64(data), shape)
    }

    pub fn from_complex_vec(data: Vec<Complex128>, shape: &[usize]) -> Result<Self> {
        Self::from_buffer(Buffer::C128(data), shape)
    }

    /// 0-d array holding `value`.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self {
            buffer: Arc::new(Buffer::filled(1, value.into())),
            layout: Layout::from_shape(&[]),
        }
    }

    // crate-internal constructor for kernels whose output size is known to match
    pub(crate) fn from_parts(buffer: Buffer, shape: &[usize]) -> Self {
        debug_assert_eq!(buffer.len(), Layout::compute_size(shape));
        Self {
            buffer: Arc::new(buffer),
            layout: Layout::from_shape(shape),
        }
    }

    // data

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn with_buffer_mut<F, R>(&mut self, func: F) -> R
    where
        F: FnOnce(&mut Buffer) -> R,
    {
        func(Arc::make_mut(&mut self.buffer))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn is_complex(&self) -> bool {
        self.dtype().is_complex()
    }

    // conversion

    pub fn to_flatten_vec(&self) -> Result<Vec<f64>> {
        match self.buffer.as_ref() {
            Buffer::F64(v) => Ok(v.clone()),
            Buffer::C128(_) => Err(Error::ConversionError(
                "complex128 array cannot be flattened to float64 values; take real() or imag() first".to_string(),
            )),
        }
    }

    pub fn to_complex_vec(&self) -> Vec<Complex128> {
        match self.buffer.as_ref() {
            Buffer::F64(v) => v.iter().map(|&x| Complex128::from(x)).collect(),
            Buffer::C128(v) => v.clone(),
        }
    }

    pub fn to_dtype(&self, dtype: DType) -> Result<Self> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        Ok(Self {
            buffer: Arc::new(self.buffer.to_dtype(dtype)?),
            layout: self.layout.clone(),
        })
    }

    pub(crate) fn promoted_buffer(&self, dtype: DType) -> Result<Cow<'_, Buffer>> {
        if dtype == self.dtype() {
            Ok(Cow::Borrowed(self.buffer.as_ref()))
        } else {
            Ok(Cow::Owned(self.buffer.to_dtype(dtype)?))
        }
    }

    // element access

    pub fn item(&self) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(Error::InvalidArgument(format!(
                "item() can only be called on an array with a single element, but got shape {:?}",
                self.shape()
            )));
        }
        self.buffer.get(0).ok_or_else(|| Error::Internal {
            message: "single-element array with empty buffer".to_string(),
        })
    }

    pub fn get(&self, indices: &[usize]) -> Result<Scalar> {
        if indices.len() != self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.ndim(),
                got: indices.len(),
            });
        }
        let mut offset = 0;
        for ((&index, &size), &stride) in indices.iter().zip(self.shape()).zip(self.strides()) {
            if index >= size {
                return Err(Error::IndexOutOfBounds {
                    index: index as isize,
                    size,
                });
            }
            offset += index * stride;
        }
        self.buffer.get(offset).ok_or_else(|| Error::Internal {
            message: format!("offset {} outside buffer of {} elements", offset, self.buffer.len()),
        })
    }

    /// Element-wise `|a - b| <= atol + rtol * |b|` over equal shapes.
    pub fn allclose(&self, other: &DenseArray, rtol: f64, atol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.to_complex_vec()
            .iter()
            .zip(other.to_complex_vec().iter())
            .all(|(&a, &b)| (a - b).magnitude() <= atol + rtol * b.magnitude())
    }
}

impl From<f64> for DenseArray {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Complex128> for DenseArray {
    fn from(value: Complex128) -> Self {
        Self::scalar(value)
    }
}

impl PartialEq for DenseArray {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.buffer == other.buffer
    }
}
