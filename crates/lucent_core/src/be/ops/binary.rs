use crate::{
    buffer::Buffer,
    complex::Complex128,
    error::{Error, Result},
};
use lucent_cpu::ops::binary::binary_map;

macro_rules! declare_binary_op {
    ($name:ident, $op:expr) => {
        /// Both buffers must already share a dtype. `metadata` follows the
        /// `dims_and_strides` convention of the CPU kernels.
        pub fn $name(lhs: &Buffer, rhs: &Buffer, size: usize, num_dims: usize, metadata: Option<&[usize]>) -> Result<Buffer> {
            match (lhs, rhs) {
                (Buffer::F64(l), Buffer::F64(r)) => {
                    let mut out = vec![0.0; size];
                    binary_map(num_dims, metadata, l, r, &mut out, $op);
                    Ok(Buffer::F64(out))
                }
                (Buffer::C128(l), Buffer::C128(r)) => {
                    let mut out = vec![Complex128::ZERO; size];
                    binary_map(num_dims, metadata, l, r, &mut out, $op);
                    Ok(Buffer::C128(out))
                }
                _ => Err(Error::DTypeMismatch {
                    expected: lhs.dtype(),
                    got: rhs.dtype(),
                }),
            }
        }
    };
}

declare_binary_op!(add, |a, b| a + b);
declare_binary_op!(sub, |a, b| a - b);
declare_binary_op!(mul, |a, b| a * b);
declare_binary_op!(div, |a, b| a / b);
