use super::einsum::einsum_backward;
use crate::{Function, Tensor};
use lucent_core::{
    dense::{DenseArray, EinsumSpec, TensordotAxes},
    error::{Error, Result},
};

const LABELS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct Tensordot {
    pub axes: TensordotAxes,
}

impl Tensordot {
    // the contraction written as einsum labels, used for backward
    fn as_einsum(&self, a_ndim: usize, b_ndim: usize) -> Result<EinsumSpec> {
        let (a_axes, b_axes) = self.axes.resolve(a_ndim, b_ndim)?;
        let free_b = b_ndim - b_axes.len();
        if a_ndim + free_b > LABELS.len() {
            return Err(Error::InvalidArgument(format!(
                "tensordot gradient supports at most {} distinct axes",
                LABELS.len()
            )));
        }

        let a_labels: Vec<char> = LABELS[..a_ndim].iter().map(|&c| c as char).collect();
        let mut fresh = LABELS[a_ndim..].iter().map(|&c| c as char);
        let mut b_labels = Vec::with_capacity(b_ndim);
        for axis in 0..b_ndim {
            match b_axes.iter().position(|&b| b == axis) {
                Some(k) => b_labels.push(a_labels[a_axes[k]]),
                None => b_labels.push(fresh.next().ok_or_else(|| Error::Internal {
                    message: "ran out of tensordot labels".to_string(),
                })?),
            }
        }

        let output: Vec<char> = (0..a_ndim)
            .filter(|d| !a_axes.contains(d))
            .map(|d| a_labels[d])
            .chain((0..b_ndim).filter(|d| !b_axes.contains(d)).map(|d| b_labels[d]))
            .collect();
        Ok(EinsumSpec::new(vec![a_labels, b_labels], output))
    }
}

impl Function for Tensordot {
    type Cache = (DenseArray, DenseArray);

    fn name(&self) -> &'static str {
        "tensordot"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].tensordot(&inputs[1], &self.axes)?;
        Ok((output, track.then(|| (inputs[0].clone(), inputs[1].clone()))))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        let (a, b) = cache;
        let spec = self.as_einsum(a.ndim(), b.ndim())?;
        einsum_backward(&spec, &[a.clone(), b.clone()], grad, needs_grad)
    }
}

impl Tensor {
    /// Contracts `self` with `rhs` over `axes` (a count or explicit pairs).
    pub fn tensordot(&self, rhs: &Tensor, axes: impl Into<TensordotAxes>) -> Tensor {
        Tensor::from_function(Tensordot { axes: axes.into() }, vec![self.clone(), rhs.clone()])
    }
}
