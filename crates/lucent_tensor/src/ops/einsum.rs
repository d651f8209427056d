use super::InputMeta;
use crate::{Function, Tensor};
use lucent_core::{
    dense::{DenseArray, EinsumSpec},
    error::Result,
};

/// Einstein summation over any number of operands.
pub struct Einsum {
    pub spec: EinsumSpec,
}

impl Function for Einsum {
    type Cache = Vec<DenseArray>;

    fn name(&self) -> &'static str {
        "einsum"
    }

    fn arity(&self) -> usize {
        self.spec.inputs.len()
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let operands: Vec<&DenseArray> = inputs.iter().collect();
        let output = DenseArray::einsum_with_sizes(&self.spec, &operands, &[])?;
        Ok((output, track.then(|| inputs.to_vec())))
    }

    fn backward(&self, operands: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        einsum_backward(&self.spec, operands, grad, needs_grad)
    }
}

/// Gradient of every operand of `spec`: operand `i` receives the einsum of
/// `grad` (in slot `i`, labelled by the output) with the conjugates of the
/// other operands, written back onto operand `i`'s labels.
pub(crate) fn einsum_backward(
    spec: &EinsumSpec,
    operands: &[DenseArray],
    grad: &DenseArray,
    needs_grad: &[bool],
) -> Result<Vec<Option<DenseArray>>> {
    let conjugated: Vec<DenseArray> = operands.iter().map(DenseArray::conj).collect();

    let mut grads = Vec::with_capacity(operands.len());
    for (i, operand) in operands.iter().enumerate() {
        if !needs_grad[i] {
            grads.push(None);
            continue;
        }

        let mut inputs = spec.inputs.clone();
        inputs[i] = spec.output.clone();
        let backward_spec = EinsumSpec::new(inputs, spec.inputs[i].clone());

        let args: Vec<&DenseArray> = conjugated
            .iter()
            .enumerate()
            .map(|(j, c)| if j == i { grad } else { c })
            .collect();
        let extra_sizes: Vec<(char, usize)> = spec.inputs[i].iter().copied().zip(operand.shape().iter().copied()).collect();

        let g = DenseArray::einsum_with_sizes(&backward_spec, &args, &extra_sizes)?;
        grads.push(Some(InputMeta::of(operand).reduce(&g)?));
    }
    Ok(grads)
}

/// Builds an einsum node, e.g. `einsum("ij,jk->ik", &[&a, &b])`.
///
/// The subscripts are parsed here; shapes are only checked when the node is
/// first evaluated.
pub fn einsum(subscripts: &str, operands: &[&Tensor]) -> Result<Tensor> {
    let spec = EinsumSpec::parse(subscripts)?;
    Ok(Tensor::from_function(Einsum { spec }, operands.iter().map(|&t| t.clone()).collect()))
}
