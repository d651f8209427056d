use super::InputMeta;
use crate::{Function, Tensor};
use lucent_core::{
    dense::{DenseArray, SliceArg},
    error::Result,
};

/// NumPy-style basic slicing; one argument per leading axis.
pub struct Slice {
    pub args: Vec<SliceArg>,
}

impl Function for Slice {
    type Cache = InputMeta;

    fn name(&self) -> &'static str {
        "slice"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        Ok((inputs[0].slice(&self.args)?, track.then(|| InputMeta::of(&inputs[0]))))
    }

    fn backward(&self, input: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        let embedded = grad.embed_slice(&input.shape, &self.args)?;
        Ok(vec![Some(input.reduce(&embedded)?)])
    }
}

impl Tensor {
    pub fn slice(&self, args: &[SliceArg]) -> Tensor {
        Tensor::from_function(Slice { args: args.to_vec() }, vec![self.clone()])
    }
}
