#![allow(dead_code)]

use lucent_core::{
    complex::Complex128,
    dense::DenseArray,
    dtype::DType,
    error::Result,
};
use lucent_tensor::Tensor;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tracked leaf of `dtype` with the given real values. Complex leaves get a
/// small imaginary part so both components are exercised.
pub fn setup_leaf(data: Vec<f64>, shape: &[usize], dtype: DType) -> Result<Tensor> {
    let array = match dtype {
        DType::F64 => DenseArray::from_vec(data, shape)?,
        DType::C128 => DenseArray::from_complex_vec(
            data.iter()
                .enumerate()
                .map(|(i, &v)| Complex128::new(v, 0.1 * (i as f64 + 1.0)))
                .collect(),
            shape,
        )?,
    };
    Ok(Tensor::from_dense_with_grad(array))
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Tracked leaf with every real (and, for complex dtypes, imaginary)
/// component drawn uniformly from `[low, high)`.
pub fn random_leaf(rng: &mut StdRng, shape: &[usize], dtype: DType, low: f64, high: f64) -> Result<Tensor> {
    let size = shape.iter().product();
    let array = match dtype {
        DType::F64 => DenseArray::from_vec((0..size).map(|_| rng.gen_range(low..high)).collect(), shape)?,
        DType::C128 => DenseArray::from_complex_vec(
            (0..size)
                .map(|_| Complex128::new(rng.gen_range(low..high), rng.gen_range(low..high)))
                .collect(),
            shape,
        )?,
    };
    Ok(Tensor::from_dense_with_grad(array))
}

fn perturbed(values: &[Complex128], index: usize, delta: Complex128) -> Vec<Complex128> {
    let mut values = values.to_vec();
    values[index] = values[index] + delta;
    values
}

/// Compares the analytic gradient of the real scalar `cost` with respect to
/// `leaf` against central differences (per real and imaginary component).
pub fn check_gradient(leaf: &Tensor, cost: &Tensor) -> Result<()> {
    leaf.zero_grad()?;
    cost.backward()?;
    let analytic = leaf
        .grad()?
        .map(|g| g.to_complex_vec())
        .unwrap_or_else(|| vec![Complex128::ZERO; leaf.data().map(|d| d.size()).unwrap_or(0)]);

    let original = leaf.data()?;
    let shape = original.shape().to_vec();
    let values = original.to_complex_vec();
    let h = 1e-6;

    let eval = |values: Vec<Complex128>| -> Result<f64> {
        let array = if original.is_complex() {
            DenseArray::from_complex_vec(values, &shape)?
        } else {
            DenseArray::from_vec(values.iter().map(|v| v.re).collect(), &shape)?
        };
        leaf.set_data(array)?;
        cost.item()?.as_f64()
    };

    for i in 0..values.len() {
        let re = (eval(perturbed(&values, i, Complex128::new(h, 0.0)))?
            - eval(perturbed(&values, i, Complex128::new(-h, 0.0)))?)
            / (2.0 * h);
        let im = if original.is_complex() {
            (eval(perturbed(&values, i, Complex128::new(0.0, h)))? - eval(perturbed(&values, i, Complex128::new(0.0, -h)))?)
                / (2.0 * h)
        } else {
            0.0
        };
        let numeric = Complex128::new(re, im);
        let tolerance = 1e-4 * numeric.magnitude().max(1.0);
        assert!(
            (analytic[i] - numeric).magnitude() < tolerance,
            "element {}: analytic {} vs numeric {}",
            i,
            analytic[i],
            numeric
        );
    }

    leaf.set_data(original)?;
    Ok(())
}

#[macro_export]
macro_rules! test_ops {
    ([$($op:ident),*]) => {
        $(
            mod $op {
                use super::*;
                use paste::paste;

                paste! {
                    #[test]
                    fn f64() -> Result<()> {
                        init_logger();
                        test_functions::[<$op _test>](DType::F64)
                    }

                    #[test]
                    fn c128() -> Result<()> {
                        init_logger();
                        test_functions::[<$op _test>](DType::C128)
                    }
                }
            }
        )*
    };
}
