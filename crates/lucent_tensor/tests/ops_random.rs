mod utils;

use lucent_core::{
    dense::{SliceArg, TensordotAxes},
    dtype::DType,
    error::Result,
};
use lucent_tensor::{einsum, Dft2, Tensor};
use utils::{check_gradient, init_logger, random_leaf, seeded};

// operand shape pairs that broadcast against each other
fn broadcast_pairs() -> Vec<(Vec<usize>, Vec<usize>)> {
    vec![(vec![3, 1], vec![1, 4]), (vec![2, 3], vec![3]), (vec![2, 1, 3], vec![4, 1])]
}

fn energy(y: &Tensor) -> Tensor {
    y.abs_square().sum()
}

mod test_functions {
    use super::*;

    pub fn add_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(11);
        for (lhs, rhs) in broadcast_pairs() {
            let x = random_leaf(&mut rng, &lhs, dtype, -1.0, 1.0)?;
            let y = random_leaf(&mut rng, &rhs, dtype, -1.0, 1.0)?;
            let cost = energy(&(&x + &y));
            check_gradient(&x, &cost)?;
            check_gradient(&y, &cost)?;
        }
        Ok(())
    }

    pub fn sub_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(12);
        for (lhs, rhs) in broadcast_pairs() {
            let x = random_leaf(&mut rng, &lhs, dtype, -1.0, 1.0)?;
            let y = random_leaf(&mut rng, &rhs, dtype, -1.0, 1.0)?;
            let cost = energy(&(&y - &x));
            check_gradient(&x, &cost)?;
            check_gradient(&y, &cost)?;
        }
        Ok(())
    }

    pub fn mul_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(13);
        for (lhs, rhs) in broadcast_pairs() {
            let x = random_leaf(&mut rng, &lhs, dtype, -1.0, 1.0)?;
            let y = random_leaf(&mut rng, &rhs, dtype, -1.0, 1.0)?;
            let cost = energy(&(&x * &y));
            check_gradient(&x, &cost)?;
            check_gradient(&y, &cost)?;
        }
        Ok(())
    }

    pub fn pow_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(14);
        for shape in [vec![4], vec![2, 3]] {
            let x = random_leaf(&mut rng, &shape, dtype, 0.5, 1.5)?;
            check_gradient(&x, &energy(&x.pow(2.5)))?;
            check_gradient(&x, &energy(&x.pow(3.0)))?;
        }
        Ok(())
    }

    pub fn exp_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(15);
        for shape in [vec![3], vec![2, 2, 2]] {
            let x = random_leaf(&mut rng, &shape, dtype, -1.0, 1.0)?;
            check_gradient(&x, &energy(&x.exp()))?;
        }
        Ok(())
    }

    pub fn abs_square_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(16);
        for shape in [vec![5], vec![2, 3]] {
            let x = random_leaf(&mut rng, &shape, dtype, -1.0, 1.0)?;
            let w = random_leaf(&mut rng, &shape, DType::F64, 0.5, 2.0)?;
            check_gradient(&x, &(x.abs_square() * w).sum())?;
        }
        Ok(())
    }

    pub fn sum_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(17);
        for shape in [vec![5], vec![2, 3]] {
            let x = random_leaf(&mut rng, &shape, dtype, -1.0, 1.0)?;
            check_gradient(&x, &x.sum().abs_square())?;
        }
        Ok(())
    }

    pub fn slice_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(18);
        let x = random_leaf(&mut rng, &[4, 5], dtype, -1.0, 1.0)?;
        let y = x.slice(&[SliceArg::every(2), SliceArg::range(-4, -1)]);
        assert_eq!(y.shape()?, vec![2, 3]);
        check_gradient(&x, &energy(&(&y * &y)))?;

        let x = random_leaf(&mut rng, &[3, 4, 2], dtype, -1.0, 1.0)?;
        let y = x.slice(&[SliceArg::Index(-1), SliceArg::Full, SliceArg::stop_at(1)]);
        assert_eq!(y.shape()?, vec![4, 1]);
        check_gradient(&x, &energy(&(&y * &y)))
    }

    pub fn einsum_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(19);
        // (3,1) x (1,4): a contraction over a size-1 label
        let x = random_leaf(&mut rng, &[3, 1], dtype, -1.0, 1.0)?;
        let y = random_leaf(&mut rng, &[1, 4], dtype, -1.0, 1.0)?;
        let outer = einsum("ij,jk->ik", &[&x, &y])?;
        assert_eq!(outer.shape()?, vec![3, 4]);
        check_gradient(&x, &energy(&outer))?;
        check_gradient(&y, &energy(&outer))?;

        let a = random_leaf(&mut rng, &[2, 3, 4], dtype, -1.0, 1.0)?;
        let b = random_leaf(&mut rng, &[4, 2], dtype, -1.0, 1.0)?;
        let batched = einsum("bij,jk->bik", &[&a, &b])?;
        check_gradient(&a, &energy(&batched))?;
        check_gradient(&b, &energy(&batched))
    }

    pub fn tensordot_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(20);
        let x = random_leaf(&mut rng, &[2, 3, 4], dtype, -1.0, 1.0)?;
        let c = random_leaf(&mut rng, &[4, 3], dtype, -1.0, 1.0)?;
        let y = x.tensordot(&c, TensordotAxes::Pairs(vec![1, 2], vec![1, 0]));
        check_gradient(&x, &energy(&y))?;
        check_gradient(&c, &energy(&y))?;

        let a = random_leaf(&mut rng, &[3, 2], dtype, -1.0, 1.0)?;
        let b = random_leaf(&mut rng, &[2, 5], dtype, -1.0, 1.0)?;
        let z = a.tensordot(&b, TensordotAxes::Count(1));
        assert_eq!(z.shape()?, vec![3, 5]);
        check_gradient(&a, &energy(&z))?;
        check_gradient(&b, &energy(&z))
    }

    pub fn dft2_test(dtype: DType) -> Result<()> {
        let mut rng = seeded(21);
        let x = random_leaf(&mut rng, &[3, 4], dtype, -1.0, 1.0)?;
        let y = x.dft2(Dft2::new((0.25, 0.3)).with_unitary(true));
        check_gradient(&x, &energy(&y))?;

        // batched frames along a leading axis
        let frames = random_leaf(&mut rng, &[2, 3, 4], dtype, -1.0, 1.0)?;
        let y = frames.dft2(Dft2::new((0.2, 0.15)).with_shape(5, 2).with_shift(0.5, 0.5));
        assert_eq!(y.shape()?, vec![2, 5, 2]);
        let w = random_leaf(&mut rng, &[2, 5, 2], DType::F64, 0.5, 2.0)?;
        check_gradient(&frames, &(y.abs_square() * w).sum())
    }
}

test_ops!([add, sub, mul, pow, exp, abs_square, sum, slice, einsum, tensordot, dft2]);

#[test]
fn expc_gradient_on_random_phases() -> Result<()> {
    init_logger();
    let mut rng = seeded(22);
    for shape in [vec![3], vec![2, 3]] {
        let x = random_leaf(&mut rng, &shape, DType::F64, -3.0, 3.0)?;
        let c = random_leaf(&mut rng, &shape, DType::C128, -1.0, 1.0)?;
        check_gradient(&x, &energy(&(x.expc() * &c + &c)))?;
    }
    Ok(())
}
