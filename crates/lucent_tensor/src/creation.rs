use crate::Tensor;
use lucent_core::{
    complex::Complex128,
    dense::{ArrayAdapter, DenseArray},
    dtype::DType,
    error::Result,
    scalar::Scalar,
};
use rand::Rng;

impl Tensor {
    /// Untracked leaf built from nested vectors or a scalar.
    pub fn new<T>(data: T) -> Result<Self>
    where
        T: ArrayAdapter,
    {
        Ok(Self::from_dense(DenseArray::new(data)?))
    }

    /// Leaf that takes part in gradient computation.
    pub fn parameter<T>(data: T) -> Result<Self>
    where
        T: ArrayAdapter,
    {
        Ok(Self::from_leaf(DenseArray::new(data)?, true))
    }

    pub fn from_dense(data: DenseArray) -> Self {
        Self::from_leaf(data, false)
    }

    pub fn from_dense_with_grad(data: DenseArray) -> Self {
        Self::from_leaf(data, true)
    }

    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::from_dense(DenseArray::scalar(value))
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_dense(DenseArray::zeros(shape))
    }

    pub fn zeros_with_dtype(shape: &[usize], dtype: DType) -> Self {
        Self::from_dense(DenseArray::zeros_with_dtype(shape, dtype))
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::from_dense(DenseArray::ones(shape))
    }

    pub fn ones_with_dtype(shape: &[usize], dtype: DType) -> Self {
        Self::from_dense(DenseArray::ones_with_dtype(shape, dtype))
    }

    pub fn full(shape: &[usize], value: impl Into<Scalar>) -> Self {
        Self::from_dense(DenseArray::full(shape, value))
    }

    pub fn zeros_like(&self) -> Result<Self> {
        Ok(Self::from_dense(self.data()?.zeros_like()))
    }

    pub fn ones_like(&self) -> Result<Self> {
        Ok(Self::from_dense(self.data()?.ones_like()))
    }

    pub fn rand(shape: &[usize], low: f64, high: f64) -> Result<Self> {
        Ok(Self::from_dense(DenseArray::rand(shape, low, high)?))
    }

    pub fn rand_with_rng<R: Rng + ?Sized>(shape: &[usize], low: f64, high: f64, rng: &mut R) -> Result<Self> {
        Ok(Self::from_dense(DenseArray::rand_with_rng(shape, low, high, rng)?))
    }

    pub fn randn(shape: &[usize], mean: f64, std: f64) -> Result<Self> {
        Ok(Self::from_dense(DenseArray::randn(shape, mean, std)?))
    }

    pub fn randn_with_rng<R: Rng + ?Sized>(shape: &[usize], mean: f64, std: f64, rng: &mut R) -> Result<Self> {
        Ok(Self::from_dense(DenseArray::randn_with_rng(shape, mean, std, rng)?))
    }
}

impl From<DenseArray> for Tensor {
    fn from(data: DenseArray) -> Self {
        Self::from_dense(data)
    }
}

impl From<f64> for Tensor {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Complex128> for Tensor {
    fn from(value: Complex128) -> Self {
        Self::scalar(value)
    }
}
