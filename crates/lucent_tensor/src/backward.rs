use crate::{graph::next_epoch, Tensor, TensorId, TensorKind};
use lucent_core::{
    dense::DenseArray,
    dtype::DType,
    error::{Error, Result},
};
use std::collections::{HashMap, HashSet};

impl Tensor {
    /// Reverse-mode pass seeded with ones of this tensor's shape.
    ///
    /// The graph is re-evaluated first so that every cache reflects the
    /// current leaf values. Gradients add into the leaves' existing ones.
    pub fn backward(&self) -> Result<()> {
        if !self.requires_grad() {
            log::debug!("backward on a tensor that does not require grad, nothing to do");
            return Ok(());
        }
        let epoch = next_epoch();
        let output = self.realize(epoch)?;
        self.propagate(DenseArray::ones_with_dtype(output.shape(), DType::F64))
    }

    /// Like [`Tensor::backward`] but with an explicit seed gradient, which
    /// must match this tensor's shape.
    pub fn backward_with(&self, seed: &DenseArray) -> Result<()> {
        if !self.requires_grad() {
            log::debug!("backward on a tensor that does not require grad, nothing to do");
            return Ok(());
        }
        let epoch = next_epoch();
        let output = self.realize(epoch)?;
        if output.shape() != seed.shape() {
            return Err(Error::ShapeMismatch {
                expected: output.shape().to_vec(),
                got: seed.shape().to_vec(),
                msg: "backward seed".to_string(),
            });
        }
        self.propagate(seed.clone())
    }

    fn propagate(&self, seed: DenseArray) -> Result<()> {
        let order = self.topological_order();
        log::debug!("backward through {} tracked tensors", order.len());

        let mut grads: HashMap<TensorId, DenseArray> = HashMap::new();
        grads.insert(self.id(), seed);

        for tensor in order.iter().rev() {
            let Some(grad) = grads.remove(&tensor.id()) else {
                continue;
            };
            match tensor.kind() {
                TensorKind::Leaf(_) => tensor.accumulate_grad(&grad)?,
                TensorKind::Op(op) => {
                    let needs_grad: Vec<bool> = op.inputs.iter().map(Tensor::requires_grad).collect();
                    let input_grads = op.node.backward(&grad, &needs_grad)?;
                    log::trace!("backward {} #{}", op.node.name(), tensor.id().0);

                    for ((input, needs), input_grad) in op.inputs.iter().zip(needs_grad).zip(input_grads) {
                        let Some(input_grad) = input_grad else {
                            continue;
                        };
                        if !needs {
                            continue;
                        }
                        let merged = match grads.remove(&input.id()) {
                            Some(existing) => existing.add(&input_grad)?,
                            None => input_grad,
                        };
                        grads.insert(input.id(), merged);
                    }
                }
            }
        }
        Ok(())
    }

    // post-order over tracked tensors; reversed it visits consumers before producers
    fn topological_order(&self) -> Vec<Tensor> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(self.clone(), false)];

        while let Some((tensor, expanded)) = stack.pop() {
            if expanded {
                order.push(tensor);
                continue;
            }
            if !visited.insert(tensor.id()) {
                continue;
            }
            let inputs: Vec<Tensor> = tensor
                .inputs()
                .iter()
                .filter(|input| input.requires_grad())
                .cloned()
                .collect();
            stack.push((tensor, true));
            for input in inputs {
                if !visited.contains(&input.id()) {
                    stack.push((input, false));
                }
            }
        }
        order
    }
}
