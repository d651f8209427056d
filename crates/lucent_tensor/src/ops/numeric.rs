use super::InputMeta;
use crate::{Function, Tensor};
use lucent_core::{dense::DenseArray, error::Result};

pub struct Add;

impl Function for Add {
    type Cache = (InputMeta, InputMeta);

    fn name(&self) -> &'static str {
        "add"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].add(&inputs[1])?;
        let cache = track.then(|| (InputMeta::of(&inputs[0]), InputMeta::of(&inputs[1])));
        Ok((output, cache))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        let (lhs, rhs) = cache;
        Ok(vec![
            if needs_grad[0] { Some(lhs.reduce(grad)?) } else { None },
            if needs_grad[1] { Some(rhs.reduce(grad)?) } else { None },
        ])
    }
}

pub struct Sub;

impl Function for Sub {
    type Cache = (InputMeta, InputMeta);

    fn name(&self) -> &'static str {
        "sub"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].sub(&inputs[1])?;
        let cache = track.then(|| (InputMeta::of(&inputs[0]), InputMeta::of(&inputs[1])));
        Ok((output, cache))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        let (lhs, rhs) = cache;
        Ok(vec![
            if needs_grad[0] { Some(lhs.reduce(grad)?) } else { None },
            if needs_grad[1] { Some(rhs.reduce(&grad.neg())?) } else { None },
        ])
    }
}

pub struct Mul;

impl Function for Mul {
    type Cache = (DenseArray, DenseArray);

    fn name(&self) -> &'static str {
        "mul"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].mul(&inputs[1])?;
        let cache = track.then(|| (inputs[0].clone(), inputs[1].clone()));
        Ok((output, cache))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        let (lhs, rhs) = cache;
        let grad_lhs = if needs_grad[0] {
            Some(InputMeta::of(lhs).reduce(&grad.mul(&rhs.conj())?)?)
        } else {
            None
        };
        let grad_rhs = if needs_grad[1] {
            Some(InputMeta::of(rhs).reduce(&grad.mul(&lhs.conj())?)?)
        } else {
            None
        };
        Ok(vec![grad_lhs, grad_rhs])
    }
}

/// `x^n` for a constant real exponent.
pub struct Pow {
    pub exponent: f64,
}

impl Function for Pow {
    type Cache = DenseArray;

    fn name(&self) -> &'static str {
        "pow"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let output = inputs[0].powf(self.exponent);
        Ok((output, track.then(|| inputs[0].clone())))
    }

    fn backward(&self, base: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        let local = base.powf(self.exponent - 1.0).mul_scalar(self.exponent).conj();
        Ok(vec![Some(InputMeta::of(base).reduce(&grad.mul(&local)?)?)])
    }
}

/// Sum of every element, as a 0-d array.
pub struct Sum;

impl Function for Sum {
    type Cache = InputMeta;

    fn name(&self) -> &'static str {
        "sum"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        Ok((inputs[0].sum_all(), track.then(|| InputMeta::of(&inputs[0]))))
    }

    fn backward(&self, input: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        Ok(vec![Some(input.reduce(&grad.broadcast_to(&input.shape)?)?)])
    }
}

impl Tensor {
    /// Elementwise `self + rhs` with broadcasting.
    pub fn add(&self, rhs: &Tensor) -> Tensor {
        Tensor::from_function(Add, vec![self.clone(), rhs.clone()])
    }

    /// Elementwise `self - rhs` with broadcasting.
    pub fn sub(&self, rhs: &Tensor) -> Tensor {
        Tensor::from_function(Sub, vec![self.clone(), rhs.clone()])
    }

    /// Elementwise `self * rhs` with broadcasting.
    pub fn mul(&self, rhs: &Tensor) -> Tensor {
        Tensor::from_function(Mul, vec![self.clone(), rhs.clone()])
    }

    pub fn pow(&self, exponent: f64) -> Tensor {
        Tensor::from_function(Pow { exponent }, vec![self.clone()])
    }

    pub fn square(&self) -> Tensor {
        self.pow(2.0)
    }

    pub fn neg(&self) -> Tensor {
        self.mul(&Tensor::scalar(-1.0))
    }

    pub fn sum(&self) -> Tensor {
        Tensor::from_function(Sum, vec![self.clone()])
    }
}
