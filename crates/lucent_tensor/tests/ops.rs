mod utils;

use lucent_core::{
    dense::{DenseArray, SliceArg, TensordotAxes},
    dtype::DType,
    error::Result,
};
use lucent_tensor::{einsum, sserror, Dft2, Tensor};
use utils::{check_gradient, init_logger, setup_leaf};

fn constant(data: Vec<f64>, shape: &[usize]) -> Result<Tensor> {
    Ok(Tensor::from_dense(DenseArray::from_vec(data, shape)?))
}

fn energy(y: &Tensor) -> Tensor {
    y.abs_square().sum()
}

mod test_functions {
    use super::*;

    pub fn add_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, -2.0, 0.5], &[3, 1], dtype)?;
        let c = constant(vec![0.1, 0.2, 0.3, 0.4], &[1, 4])?;
        let cost = energy(&(&x + &c));
        assert_eq!(cost.data()?.shape(), &[] as &[usize]);
        check_gradient(&x, &cost)
    }

    pub fn sub_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, 2.0, 3.0, 4.0], &[4], dtype)?;
        let c = constant((0..8).map(f64::from).collect(), &[2, 4])?;
        check_gradient(&x, &energy(&(&c - &x)))
    }

    pub fn mul_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, -1.0, 2.0], &[3, 1], dtype)?;
        let y = setup_leaf(vec![0.5, 1.5, -2.0, 1.0], &[1, 4], dtype)?;
        let cost = energy(&(&x * &y));
        check_gradient(&x, &cost)?;
        check_gradient(&y, &cost)
    }

    pub fn pow_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![0.5, 1.0, 1.5], &[3], dtype)?;
        check_gradient(&x, &energy(&x.pow(3.0)))
    }

    pub fn exp_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![-0.5, 0.0, 0.7], &[3], dtype)?;
        check_gradient(&x, &energy(&x.exp()))
    }

    pub fn abs_square_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, -2.0, 0.3, 0.8], &[2, 2], dtype)?;
        let w = constant(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
        check_gradient(&x, &(x.abs_square() * w).sum())
    }

    pub fn sum_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, 2.0, -0.5, 0.25], &[2, 2], dtype)?;
        check_gradient(&x, &x.sum().abs_square())
    }

    pub fn slice_test(dtype: DType) -> Result<()> {
        let x = setup_leaf((0..12).map(|v| f64::from(v) * 0.5 - 2.0).collect(), &[3, 4], dtype)?;
        let y = x.slice(&[
            SliceArg::Range {
                start: Some(0),
                stop: Some(3),
                step: 2,
            },
            SliceArg::start_at(1),
        ]);
        assert_eq!(y.shape()?, vec![2, 3]);
        check_gradient(&x, &energy(&(&y * &y)))
    }

    pub fn einsum_test(dtype: DType) -> Result<()> {
        let x = setup_leaf(vec![1.0, 2.0, 3.0, -1.0, 0.5, 2.0], &[2, 3], dtype)?;
        let c = constant(vec![0.5, -1.0, 2.0, 1.0, 0.0, 3.0], &[3, 2])?;
        let y = einsum("ij,jk->ik", &[&x, &c])?;
        check_gradient(&x, &energy(&y))?;

        let z = einsum("ij,ij->i", &[&x, &x])?;
        check_gradient(&x, &energy(&z))
    }

    pub fn tensordot_test(dtype: DType) -> Result<()> {
        let x = setup_leaf((0..24).map(|v| f64::from(v % 5) - 1.5).collect(), &[2, 3, 4], dtype)?;
        let c = constant((0..12).map(|v| f64::from(v) * 0.25).collect(), &[4, 3])?;
        let y = x.tensordot(&c, TensordotAxes::Pairs(vec![1, 2], vec![1, 0]));
        assert_eq!(y.shape()?, vec![2]);
        check_gradient(&x, &energy(&y))?;

        let w = setup_leaf(vec![1.0, -1.0, 0.5], &[3], dtype)?;
        let outer = w.tensordot(&c, TensordotAxes::Count(0));
        assert_eq!(outer.shape()?, vec![3, 4, 3]);
        check_gradient(&w, &energy(&outer))
    }

    pub fn dft2_test(dtype: DType) -> Result<()> {
        let x = setup_leaf((0..12).map(|v| f64::from((v * 7) % 5) - 2.0).collect(), &[3, 4], dtype)?;
        let dft = Dft2::new((0.3, 0.2)).with_shape(4, 3).with_shift(0.5, 0.0);
        let y = x.dft2(dft);
        assert_eq!(y.shape()?, vec![4, 3]);
        let w = constant((0..12).map(f64::from).collect(), &[4, 3])?;
        check_gradient(&x, &(y.abs_square() * w).sum())
    }
}

test_ops!([add, sub, mul, pow, exp, abs_square, sum, slice, einsum, tensordot, dft2]);

#[test]
fn expc_gradient() -> Result<()> {
    init_logger();
    let x = setup_leaf(vec![0.1, 1.2, -0.7], &[3], DType::F64)?;
    let c = Tensor::from_dense(DenseArray::from_complex_vec(
        vec![(1.0, 0.5).into(), (0.0, -1.0).into(), (2.0, 0.0).into()],
        &[3],
    )?);
    check_gradient(&x, &energy(&(x.expc() + c)))
}

#[test]
fn expc_rejects_complex_input() -> Result<()> {
    let x = setup_leaf(vec![0.1], &[1], DType::C128)?;
    assert!(x.expc().data().is_err());
    Ok(())
}

#[test]
fn sserror_plain_gradient() -> Result<()> {
    init_logger();
    let data = DenseArray::from_vec((0..12).map(|v| f64::from(v) * 0.3 + 0.5).collect(), &[3, 2, 2])?;
    let x = setup_leaf((0..12).map(|v| f64::from((v * 5) % 7)).collect(), &[3, 2, 2], DType::F64)?;
    let mask = DenseArray::from_vec(vec![1.0, 0.0, 1.0, 1.0], &[2, 2])?;
    check_gradient(&x, &sserror(&x, &data, None, false)?)?;
    check_gradient(&x, &sserror(&x, &data, Some(&mask), false)?)
}

#[test]
fn sserror_invariant_gradient() -> Result<()> {
    init_logger();
    let data = DenseArray::from_vec(vec![1.0, 3.0, 2.0, 5.0, 4.0, 0.5], &[2, 3])?;
    let x = setup_leaf(vec![0.3, 1.0, -2.0, 0.7, 1.1, 2.5], &[2, 3], DType::F64)?;
    let mask = DenseArray::from_vec(vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0], &[2, 3])?;
    check_gradient(&x, &sserror(&x, &data, None, true)?)?;
    check_gradient(&x, &sserror(&x, &data, Some(&mask), true)?)
}

#[test]
fn sserror_composes_with_a_model() -> Result<()> {
    init_logger();
    let data = DenseArray::from_vec(vec![1.0, 4.0, 9.0], &[3])?;
    let x = setup_leaf(vec![1.5, 1.5, 2.5], &[3], DType::F64)?;
    let model = x.pow(2.0) + 0.1;
    check_gradient(&x, &sserror(&model, &data, None, false)?)
}
