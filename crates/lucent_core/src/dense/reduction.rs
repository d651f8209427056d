use super::DenseArray;
use crate::{
    be::ops::reduction,
    error::{Error, Result},
    layout::pad_shape,
};

impl DenseArray {
    /// Sum of every element as a 0-d array.
    pub fn sum_all(&self) -> DenseArray {
        DenseArray::scalar(reduction::sum_all(self.buffer()))
    }

    pub fn sum_axes(&self, axes: &[isize], keep_dims: bool) -> Result<DenseArray> {
        let ndim = self.ndim();
        let mut reduce = vec![false; ndim];
        for &axis in axes {
            reduce[normalize_axis(axis, ndim)?] = true;
        }

        let kept_shape: Vec<usize> = self
            .shape()
            .iter()
            .zip(&reduce)
            .map(|(&d, &r)| if r { 1 } else { d })
            .collect();
        let buffer = reduction::sum_to_shape(self.buffer(), self.shape(), &kept_shape);

        let shape: Vec<usize> = if keep_dims {
            kept_shape
        } else {
            self.shape()
                .iter()
                .zip(&reduce)
                .filter(|(_, &r)| !r)
                .map(|(&d, _)| d)
                .collect()
        };
        Ok(DenseArray::from_parts(buffer, &shape))
    }

    pub fn mean_axes(&self, axes: &[isize], keep_dims: bool) -> Result<DenseArray> {
        let count: usize = axes
            .iter()
            .map(|&a| normalize_axis(a, self.ndim()).map(|a| self.shape()[a]))
            .collect::<Result<Vec<_>>>()?
            .iter()
            .product();
        Ok(self.sum_axes(axes, keep_dims)?.mul_scalar(1.0 / count as f64))
    }

    /// Reduces a broadcast result back to `shape`: sums the leading axes
    /// `shape` lacks and every axis where `shape` has 1 but `self` does not.
    pub fn sum_to_shape(&self, shape: &[usize]) -> Result<DenseArray> {
        if self.shape() == shape {
            return Ok(self.clone());
        }
        if shape.len() > self.ndim() {
            return Err(Error::IncompatibleShape(format!(
                "Cannot sum shape {:?} to higher-rank shape {:?}",
                self.shape(),
                shape
            )));
        }

        let padded = pad_shape(shape, self.ndim());
        for (&target, &source) in padded.iter().zip(self.shape()) {
            if target != source && target != 1 {
                return Err(Error::IncompatibleShape(format!(
                    "Cannot sum shape {:?} to shape {:?}",
                    self.shape(),
                    shape
                )));
            }
        }

        let buffer = reduction::sum_to_shape(self.buffer(), self.shape(), &padded);
        Ok(DenseArray::from_parts(buffer, shape))
    }
}

pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(Error::DimensionOutOfBounds { dim: axis, ndim });
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_to_shape_reduces_broadcast_axes() -> Result<()> {
        let g = DenseArray::ones(&[2, 3, 4]);

        assert_eq!(g.sum_to_shape(&[3, 1])?.to_flatten_vec()?, vec![8.0; 3]);
        assert_eq!(g.sum_to_shape(&[4])?.to_flatten_vec()?, vec![6.0; 4]);
        assert_eq!(g.sum_to_shape(&[])?.item()?.as_f64()?, 24.0);
        assert!(g.sum_to_shape(&[5]).is_err());
        Ok(())
    }

    #[test]
    fn sum_and_mean_over_axes() -> Result<()> {
        let a = DenseArray::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
        assert_eq!(a.sum_axes(&[-1], false)?.to_flatten_vec()?, vec![6.0, 15.0]);
        assert_eq!(a.sum_axes(&[0], true)?.shape(), &[1, 3]);
        assert_eq!(a.mean_axes(&[-2, -1], false)?.item()?.as_f64()?, 3.5);
        assert!(a.sum_axes(&[2], false).is_err());
        assert_eq!(a.sum_all().item()?.as_f64()?, 21.0);
        Ok(())
    }
}
