use super::DenseArray;
use crate::{
    be::ops::transform,
    error::{Error, Result},
};
use std::sync::Arc;

impl DenseArray {
    pub fn reshape(&self, shape: &[usize]) -> Result<DenseArray> {
        let mut layout = self.layout.clone();
        layout.view(shape)?;
        Ok(DenseArray {
            buffer: Arc::clone(&self.buffer),
            layout,
        })
    }

    /// Reorders axes: axis `i` of the result is axis `axes[i]` of `self`.
    pub fn permute(&self, axes: &[usize]) -> Result<DenseArray> {
        let ndim = self.ndim();
        if axes.len() != ndim {
            return Err(Error::DimensionMismatch {
                expected: ndim,
                got: axes.len(),
            });
        }
        let mut seen = vec![false; ndim];
        for &axis in axes {
            if axis >= ndim {
                return Err(Error::DimensionOutOfBounds {
                    dim: axis as isize,
                    ndim,
                });
            }
            if std::mem::replace(&mut seen[axis], true) {
                return Err(Error::InvalidArgument(format!("repeated axis {} in permutation {:?}", axis, axes)));
            }
        }
        if axes.iter().enumerate().all(|(i, &a)| i == a) {
            return Ok(self.clone());
        }

        let dims: Vec<usize> = axes.iter().map(|&a| self.shape()[a]).collect();
        let strides: Vec<usize> = axes.iter().map(|&a| self.strides()[a]).collect();
        let buffer = transform::strided_copy(self.buffer(), &dims, &strides, 0);
        Ok(DenseArray::from_parts(buffer, &dims))
    }

    /// Reverses the axis order.
    pub fn transpose(&self) -> Result<DenseArray> {
        let axes: Vec<usize> = (0..self.ndim()).rev().collect();
        self.permute(&axes)
    }

    /// Materializes `self` stretched to `shape` under broadcasting rules.
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<DenseArray> {
        if self.shape() == shape {
            return Ok(self.clone());
        }
        let strides = self.layout.broadcast_strides(shape)?;
        let buffer = transform::strided_copy(self.buffer(), shape, &strides, 0);
        Ok(DenseArray::from_parts(buffer, shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permute_3d() -> Result<()> {
        let data: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let a = DenseArray::from_vec(data, &[2, 3, 4])?;
        let p = a.permute(&[2, 0, 1])?;
        assert_eq!(p.shape(), &[4, 2, 3]);
        assert_eq!(p.get(&[3, 1, 2])?, a.get(&[1, 2, 3])?);
        assert!(a.permute(&[0, 0, 1]).is_err());
        Ok(())
    }

    #[test]
    fn broadcast_then_reduce() -> Result<()> {
        let a = DenseArray::new(vec![1.0, 2.0])?;
        let b = a.broadcast_to(&[3, 2])?;
        assert_eq!(b.to_flatten_vec()?, vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(b.sum_to_shape(&[2])?.to_flatten_vec()?, vec![3.0, 6.0]);
        assert!(a.broadcast_to(&[3]).is_err());
        Ok(())
    }

    #[test]
    fn reshape_keeps_size() -> Result<()> {
        let a = DenseArray::zeros(&[2, 6]);
        assert_eq!(a.reshape(&[3, 4])?.shape(), &[3, 4]);
        assert!(a.reshape(&[5]).is_err());
        Ok(())
    }
}
