use crate::{
    buffer::Buffer,
    complex::Complex128,
    error::{Error, Result},
};
use lucent_cpu::ops::einsum;

/// Dispatches the einsum kernel; all operands must share one dtype.
pub fn einsum(
    sizes: &[usize],
    num_free: usize,
    operand_strides: &[Vec<usize>],
    operands: &[&Buffer],
    out_strides: &[usize],
    out_size: usize,
) -> Result<Buffer> {
    let Some(first) = operands.first() else {
        return Err(Error::InvalidArgument("einsum needs at least one operand".to_string()));
    };

    match first {
        Buffer::F64(_) => {
            let slices = operands.iter().map(|b| b.as_f64_slice()).collect::<Result<Vec<_>>>()?;
            let mut out = vec![0.0; out_size];
            einsum::einsum(sizes, num_free, operand_strides, &slices, out_strides, &mut out);
            Ok(Buffer::F64(out))
        }
        Buffer::C128(_) => {
            let slices = operands.iter().map(|b| b.as_c128_slice()).collect::<Result<Vec<_>>>()?;
            let mut out = vec![Complex128::ZERO; out_size];
            einsum::einsum(sizes, num_free, operand_strides, &slices, out_strides, &mut out);
            Ok(Buffer::C128(out))
        }
    }
}
