use super::InputMeta;
use crate::{Function, Tensor};
use lucent_core::{dense::DenseArray, error::Result};

pub struct Exp;

impl Function for Exp {
    type Cache = DenseArray;

    fn name(&self) -> &'static str {
        "exp"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].exp();
        let cache = track.then(|| output.clone());
        Ok((output, cache))
    }

    fn backward(&self, result: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        // result has the input's shape and dtype
        Ok(vec![Some(InputMeta::of(result).reduce(&grad.mul(&result.conj())?)?)])
    }
}

/// `exp(i·x)` of a real array.
pub struct Expc;

impl Function for Expc {
    type Cache = DenseArray;

    fn name(&self) -> &'static str {
        "expc"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].expc()?;
        let cache = track.then(|| output.clone());
        Ok((output, cache))
    }

    fn backward(&self, result: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        Ok(vec![Some(grad.mul(&result.conj())?.imag())])
    }
}

/// `|x|²`, real for real and complex inputs alike.
pub struct AbsSquare;

impl Function for AbsSquare {
    type Cache = DenseArray;

    fn name(&self) -> &'static str {
        "abs_square"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        Ok((inputs[0].abs_square(), track.then(|| inputs[0].clone())))
    }

    fn backward(&self, input: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        let local = grad.real().mul(input)?.mul_scalar(2.0);
        Ok(vec![Some(InputMeta::of(input).reduce(&local)?)])
    }
}

impl Tensor {
    pub fn exp(&self) -> Tensor {
        Tensor::from_function(Exp, vec![self.clone()])
    }

    /// `cos x + i·sin x`. Fails at evaluation if `self` is complex.
    pub fn expc(&self) -> Tensor {
        Tensor::from_function(Expc, vec![self.clone()])
    }

    pub fn abs_square(&self) -> Tensor {
        Tensor::from_function(AbsSquare, vec![self.clone()])
    }
}
