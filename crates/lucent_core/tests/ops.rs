mod utils;

use lucent_core::{
    dense::{SliceArg, TensordotAxes},
    dtype::DType,
    error::Result,
};
use utils::{assert_values, setup_array};

mod test_functions {
    use super::*;

    pub fn add_test(dtype: DType) -> Result<()> {
        let x = setup_array(vec![1.0, 2.0, 3.0], &[3, 1], dtype)?;
        let y = setup_array(vec![10.0, 20.0], &[2], dtype)?;
        let z = x.add(&y)?;
        assert_eq!(z.dtype(), dtype);
        assert_values(&z, &[11.0, 21.0, 12.0, 22.0, 13.0, 23.0]);
        Ok(())
    }

    pub fn sub_test(dtype: DType) -> Result<()> {
        let x = setup_array(vec![5.0, 7.0], &[2], dtype)?;
        let y = setup_array(vec![1.0], &[], dtype)?;
        assert_values(&x.sub(&y)?, &[4.0, 6.0]);
        Ok(())
    }

    pub fn mul_test(dtype: DType) -> Result<()> {
        let x = setup_array(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], dtype)?;
        assert_values(&x.mul(&x)?, &[1.0, 4.0, 9.0, 16.0]);
        Ok(())
    }

    pub fn div_test(dtype: DType) -> Result<()> {
        let x = setup_array(vec![1.0, 4.0], &[2], dtype)?;
        let y = setup_array(vec![2.0, 8.0], &[2], dtype)?;
        assert_values(&x.div(&y)?, &[0.5, 0.5]);
        Ok(())
    }

    pub fn exp_test(dtype: DType) -> Result<()> {
        let x = setup_array(vec![0.0, 1.0], &[2], dtype)?;
        assert_values(&x.exp(), &[1.0, std::f64::consts::E]);
        Ok(())
    }

    pub fn sum_to_shape_test(dtype: DType) -> Result<()> {
        let x = setup_array((1..=6).map(f64::from).collect(), &[2, 3], dtype)?;
        assert_values(&x.sum_to_shape(&[1, 3])?, &[5.0, 7.0, 9.0]);
        assert_values(&x.sum_to_shape(&[2, 1])?, &[6.0, 15.0]);
        assert_values(&x.sum_all(), &[21.0]);
        Ok(())
    }

    pub fn slice_test(dtype: DType) -> Result<()> {
        let x = setup_array((0..6).map(f64::from).collect(), &[2, 3], dtype)?;
        let s = x.slice(&[SliceArg::Full, SliceArg::start_at(1)])?;
        assert_values(&s, &[1.0, 2.0, 4.0, 5.0]);
        assert_values(&s.embed_slice(x.shape(), &[SliceArg::Full, SliceArg::start_at(1)])?, &[0.0, 1.0, 2.0, 0.0, 4.0, 5.0]);
        Ok(())
    }

    pub fn tensordot_test(dtype: DType) -> Result<()> {
        let a = setup_array(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], dtype)?;
        let b = setup_array(vec![1.0, 1.0], &[2], dtype)?;
        assert_values(&a.tensordot(&b, &TensordotAxes::Count(1))?, &[3.0, 7.0]);
        Ok(())
    }
}

test_ops!([add, sub, mul, div, exp, sum_to_shape, slice, tensordot]);
