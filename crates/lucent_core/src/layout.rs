use crate::error::{Error, Result};

/// Row-major shape and strides of a dense array.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Layout {
    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.shape.get(dim).copied()
    }
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn view(&mut self, new_shape: &[usize]) -> Result<()> {
        let old_size = self.size();
        let new_size: usize = new_shape.iter().product();

        if old_size != new_size {
            return Err(Error::IncompatibleShape(format!(
                "Cannot reshape layout of size {} to shape {:?}",
                old_size, new_shape
            )));
        }

        self.shape = new_shape.to_vec();
        self.strides = Self::compute_strides(new_shape);

        Ok(())
    }

    /// Strides that read this layout as if it had `target` shape: axes that
    /// are absent or of size 1 here get stride 0.
    pub fn broadcast_strides(&self, target: &[usize]) -> Result<Vec<usize>> {
        if !self.can_broadcast_to(target) {
            return Err(Error::IncompatibleShape(format!(
                "Cannot broadcast shape {:?} to {:?}",
                self.shape, target
            )));
        }

        let rank_diff = target.len() - self.ndim();
        let mut strides = vec![0; target.len()];
        for d in 0..self.ndim() {
            if self.shape[d] == target[rank_diff + d] {
                strides[rank_diff + d] = self.strides[d];
            }
        }
        Ok(strides)
    }

    // helper

    pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
        if shape.is_empty() {
            return vec![];
        }

        let mut strides = vec![1; shape.len()];
        for i in (0..shape.len() - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }
        strides
    }

    pub fn compute_size(shape: &[usize]) -> usize {
        shape.iter().product()
    }

    /// One-directional broadcast check: can this layout be stretched to `target`?
    pub fn can_broadcast_to(&self, target: &[usize]) -> bool {
        if self.ndim() > target.len() {
            return false;
        }
        let rank_diff = target.len() - self.ndim();
        self.shape
            .iter()
            .zip(&target[rank_diff..])
            .all(|(&a, &b)| a == b || a == 1)
    }
}

/// NumPy broadcast of two shapes.
pub fn compute_broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let lhs = pad_shape(lhs, ndim);
    let rhs = pad_shape(rhs, ndim);

    let mut out = Vec::with_capacity(ndim);
    for d in 0..ndim {
        match (lhs[d], rhs[d]) {
            (a, b) if a == b => out.push(a),
            (1, b) => out.push(b),
            (a, 1) => out.push(a),
            _ => {
                return Err(Error::IncompatibleShape(format!(
                    "Cannot broadcast shapes {:?} and {:?} at dimension {}",
                    lhs, rhs, d
                )))
            }
        }
    }
    Ok(out)
}

pub fn pad_shape(shape: &[usize], ndim: usize) -> Vec<usize> {
    let mut padded = vec![1; ndim.saturating_sub(shape.len())];
    padded.extend_from_slice(shape);
    padded
}
