use crate::Tensor;
use std::ops::{Add, Mul, Neg, Sub};

macro_rules! impl_binary_operator {
    ($trait:ident, $fn:ident) => {
        impl $trait<&Tensor> for &Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: &Tensor) -> Self::Output {
                Tensor::$fn(self, rhs)
            }
        }

        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: Tensor) -> Self::Output {
                Tensor::$fn(self, &rhs)
            }
        }

        impl $trait<&Tensor> for Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: &Tensor) -> Self::Output {
                Tensor::$fn(&self, rhs)
            }
        }

        impl $trait<Tensor> for Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: Tensor) -> Self::Output {
                Tensor::$fn(&self, &rhs)
            }
        }

        impl $trait<f64> for &Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: f64) -> Self::Output {
                Tensor::$fn(self, &Tensor::scalar(rhs))
            }
        }

        impl $trait<f64> for Tensor {
            type Output = Tensor;

            fn $fn(self, rhs: f64) -> Self::Output {
                Tensor::$fn(&self, &Tensor::scalar(rhs))
            }
        }

        impl $trait<&Tensor> for f64 {
            type Output = Tensor;

            fn $fn(self, rhs: &Tensor) -> Self::Output {
                Tensor::$fn(&Tensor::scalar(self), rhs)
            }
        }

        impl $trait<Tensor> for f64 {
            type Output = Tensor;

            fn $fn(self, rhs: Tensor) -> Self::Output {
                Tensor::$fn(&Tensor::scalar(self), &rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);
impl_binary_operator!(Mul, mul);

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(self)
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(&self)
    }
}
