use super::DenseArray;
use crate::{
    be::ops::binary,
    buffer::Buffer,
    error::Result,
    layout::{compute_broadcast_shape, Layout},
};

type BinaryKernel = fn(&Buffer, &Buffer, usize, usize, Option<&[usize]>) -> Result<Buffer>;

impl DenseArray {
    fn binary_op(&self, rhs: &DenseArray, kernel: BinaryKernel) -> Result<DenseArray> {
        let shape = compute_broadcast_shape(self.shape(), rhs.shape())?;
        let dtype = self.dtype().promote(rhs.dtype());

        let lhs_buf = self.promoted_buffer(dtype)?;
        let rhs_buf = rhs.promoted_buffer(dtype)?;

        let mut dims_and_strides = shape.clone();
        dims_and_strides.extend(self.layout.broadcast_strides(&shape)?);
        dims_and_strides.extend(rhs.layout.broadcast_strides(&shape)?);

        let size = Layout::compute_size(&shape);
        let buffer = kernel(&lhs_buf, &rhs_buf, size, shape.len(), Some(&dims_and_strides))?;

        Ok(DenseArray::from_parts(buffer, &shape))
    }

    pub fn add(&self, rhs: &DenseArray) -> Result<DenseArray> {
        self.binary_op(rhs, binary::add)
    }

    pub fn sub(&self, rhs: &DenseArray) -> Result<DenseArray> {
        self.binary_op(rhs, binary::sub)
    }

    pub fn mul(&self, rhs: &DenseArray) -> Result<DenseArray> {
        self.binary_op(rhs, binary::mul)
    }

    pub fn div(&self, rhs: &DenseArray) -> Result<DenseArray> {
        self.binary_op(rhs, binary::div)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{complex::Complex128, dtype::DType};

    #[test]
    fn broadcast_add() -> Result<()> {
        let a = DenseArray::new(vec![vec![1.0], vec![2.0], vec![3.0]])?;
        let b = DenseArray::new(vec![vec![10.0, 20.0]])?;
        let c = a.add(&b)?;
        assert_eq!(c.shape(), &[3, 2]);
        assert_eq!(c.to_flatten_vec()?, vec![11.0, 21.0, 12.0, 22.0, 13.0, 23.0]);
        Ok(())
    }

    #[test]
    fn scalar_broadcasts_everywhere() -> Result<()> {
        let a = DenseArray::new(vec![1.0, 2.0])?;
        let c = DenseArray::scalar(3.0).mul(&a)?;
        assert_eq!(c.to_flatten_vec()?, vec![3.0, 6.0]);
        Ok(())
    }

    #[test]
    fn real_times_complex_promotes() -> Result<()> {
        let a = DenseArray::new(vec![2.0, 3.0])?;
        let b = DenseArray::new(vec![Complex128::I, Complex128::ONE])?;
        let c = a.mul(&b)?;
        assert_eq!(c.dtype(), DType::C128);
        assert_eq!(c.to_complex_vec(), vec![Complex128::new(0.0, 2.0), Complex128::new(3.0, 0.0)]);
        Ok(())
    }

    #[test]
    fn incompatible_shapes_fail() -> Result<()> {
        let a = DenseArray::zeros(&[3]);
        let b = DenseArray::zeros(&[4]);
        let err = a.add(&b).unwrap_err();
        assert!(err.is_shape_error());
        Ok(())
    }
}
