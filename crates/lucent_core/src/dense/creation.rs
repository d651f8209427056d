use super::{ArrayAdapter, DenseArray};
use crate::{
    buffer::Buffer,
    complex::Complex128,
    dtype::{get_default_dtype, DType},
    error::{Error, Result},
    scalar::Scalar,
};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use rand_distr::Normal;

impl DenseArray {
    pub fn new<T>(data: T) -> Result<Self>
    where
        T: ArrayAdapter,
    {
        let shape = data.to_shape();
        let buffer = data.into_buffer()?;
        Self::from_buffer(buffer, &shape)
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::zeros_with_dtype(shape, get_default_dtype())
    }

    pub fn zeros_with_dtype(shape: &[usize], dtype: DType) -> Self {
        let size = shape.iter().product();
        Self::from_parts(Buffer::zeros(size, dtype), shape)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::ones_with_dtype(shape, get_default_dtype())
    }

    pub fn ones_with_dtype(shape: &[usize], dtype: DType) -> Self {
        let one = match dtype {
            DType::F64 => Scalar::F64(1.0),
            DType::C128 => Scalar::C128(Complex128::ONE),
        };
        Self::full(shape, one)
    }

    pub fn full(shape: &[usize], value: impl Into<Scalar>) -> Self {
        let size = shape.iter().product();
        Self::from_parts(Buffer::filled(size, value.into()), shape)
    }

    pub fn zeros_like(&self) -> Self {
        Self::zeros_with_dtype(self.shape(), self.dtype())
    }

    pub fn ones_like(&self) -> Self {
        Self::ones_with_dtype(self.shape(), self.dtype())
    }

    /// Uniform samples on `[low, high)`.
    pub fn rand(shape: &[usize], low: f64, high: f64) -> Result<Self> {
        Self::rand_with_rng(shape, low, high, &mut rand::thread_rng())
    }

    pub fn rand_with_rng<R: Rng + ?Sized>(shape: &[usize], low: f64, high: f64, rng: &mut R) -> Result<Self> {
        if !(low < high) {
            return Err(Error::InvalidArgument(format!(
                "rand requires low < high, got low={} high={}",
                low, high
            )));
        }
        let dist = Uniform::new(low, high);
        let size: usize = shape.iter().product();
        let data = (0..size).map(|_| dist.sample(rng)).collect();
        Self::from_vec(data, shape)
    }

    /// Normal samples with the given mean and standard deviation.
    pub fn randn(shape: &[usize], mean: f64, std: f64) -> Result<Self> {
        Self::randn_with_rng(shape, mean, std, &mut rand::thread_rng())
    }

    pub fn randn_with_rng<R: Rng + ?Sized>(shape: &[usize], mean: f64, std: f64, rng: &mut R) -> Result<Self> {
        let normal = Normal::new(mean, std).map_err(|e| Error::External { message: e.to_string() })?;
        let size: usize = shape.iter().product();
        let data = (0..size).map(|_| normal.sample(rng)).collect();
        Self::from_vec(data, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn nested_vectors() -> Result<()> {
        let a = DenseArray::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.to_flatten_vec()?, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let c = DenseArray::new(vec![Complex128::new(1.0, -1.0)])?;
        assert_eq!(c.dtype(), DType::C128);

        let s = DenseArray::new(2.5)?;
        assert_eq!(s.shape(), &[] as &[usize]);
        Ok(())
    }

    #[test]
    fn ragged_input_is_a_conversion_error() {
        let err = DenseArray::new(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::ConversionError(_)));

        let err = DenseArray::new(vec![vec![vec![1.0, 2.0]], vec![vec![3.0], vec![4.0]]]).unwrap_err();
        assert!(matches!(err, Error::ConversionError(_)));
    }

    #[test]
    fn seeded_rand_is_reproducible_and_in_range() -> Result<()> {
        let a = DenseArray::rand_with_rng(&[4, 4], -0.5, 0.5, &mut StdRng::seed_from_u64(7))?;
        let b = DenseArray::rand_with_rng(&[4, 4], -0.5, 0.5, &mut StdRng::seed_from_u64(7))?;
        assert_eq!(a, b);
        assert!(a.to_flatten_vec()?.iter().all(|x| (-0.5..0.5).contains(x)));
        assert!(DenseArray::rand(&[2], 1.0, 1.0).is_err());
        Ok(())
    }

    #[test]
    fn randn_rejects_negative_std() {
        assert!(DenseArray::randn(&[3], 0.0, -1.0).is_err());
    }
}
