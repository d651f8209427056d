#![allow(dead_code)]

use lucent_core::{complex::Complex128, dense::DenseArray, dtype::DType, error::Result};

pub fn setup_array(data: Vec<f64>, shape: &[usize], dtype: DType) -> Result<DenseArray> {
    DenseArray::from_vec(data, shape)?.to_dtype(dtype)
}

/// Compares every element of `actual` against real `expected` values.
pub fn assert_values(actual: &DenseArray, expected: &[f64]) {
    let values = actual.to_complex_vec();
    assert_eq!(values.len(), expected.len(), "length mismatch: {:?}", values);
    for (a, &e) in values.iter().zip(expected) {
        assert!(
            (*a - Complex128::from(e)).magnitude() < 1e-12,
            "expected {}, got {}",
            e,
            a
        );
    }
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
                        test_functions::[<$op _test>](DType::F64)
                    }

                    #[test]
                    fn c128() -> Result<()> {
                        test_functions::[<$op _test>](DType::C128)
                    }
                }
            }
        )*
    };
}
