pub mod cost;
pub mod einsum;
pub mod fourier;
pub mod indexing;
pub mod numeric;
pub mod special;
pub mod tensordot;

use lucent_core::{dense::DenseArray, dtype::DType, error::Result};

/// Shape and dtype of an input as seen by forward, kept for backward.
#[derive(Debug, Clone)]
pub struct InputMeta {
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl InputMeta {
    pub fn of(array: &DenseArray) -> Self {
        Self {
            shape: array.shape().to_vec(),
            dtype: array.dtype(),
        }
    }

    /// Sums `grad` over the axes broadcasting added and drops the imaginary
    /// part when the input was real.
    pub fn reduce(&self, grad: &DenseArray) -> Result<DenseArray> {
        let grad = grad.sum_to_shape(&self.shape)?;
        if self.dtype.is_complex() {
            Ok(grad)
        } else {
            Ok(grad.real())
        }
    }
}
