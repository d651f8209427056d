use crate::{
    buffer::Buffer,
    complex::Complex128,
    error::{Error, Result},
};
use lucent_cpu::ops::matmul;

/// Row-major `(m, k) x (k, n)` product of two buffers of equal dtype.
pub fn matmul(a: &Buffer, b: &Buffer, m: usize, k: usize, n: usize) -> Result<Buffer> {
    match (a, b) {
        (Buffer::F64(a), Buffer::F64(b)) => {
            let mut c = vec![0.0; m * n];
            matmul::matmul(m, k, n, a, b, &mut c);
            Ok(Buffer::F64(c))
        }
        (Buffer::C128(a), Buffer::C128(b)) => {
            let mut c = vec![Complex128::ZERO; m * n];
            matmul::matmul(m, k, n, a, b, &mut c);
            Ok(Buffer::C128(c))
        }
        _ => Err(Error::DTypeMismatch {
            expected: a.dtype(),
            got: b.dtype(),
        }),
    }
}
