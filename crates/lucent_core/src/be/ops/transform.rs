use crate::{buffer::Buffer, complex::Complex128};
use lucent_cpu::ops::transform;

pub fn strided_copy(inp: &Buffer, dims: &[usize], strides: &[usize], offset: usize) -> Buffer {
    let size = dims.iter().product();
    match inp {
        Buffer::F64(x) => {
            let mut out = vec![0.0; size];
            transform::strided_copy(dims.len(), dims, strides, offset, x, &mut out);
            Buffer::F64(out)
        }
        Buffer::C128(x) => {
            let mut out = vec![Complex128::ZERO; size];
            transform::strided_copy(dims.len(), dims, strides, offset, x, &mut out);
            Buffer::C128(out)
        }
    }
}

/// Zeros of `out_size` elements with `inp` written at the strided positions.
pub fn strided_scatter(inp: &Buffer, out_size: usize, dims: &[usize], strides: &[usize], offset: usize) -> Buffer {
    match inp {
        Buffer::F64(x) => {
            let mut out = vec![0.0; out_size];
            transform::strided_scatter(dims.len(), dims, strides, offset, x, &mut out);
            Buffer::F64(out)
        }
        Buffer::C128(x) => {
            let mut out = vec![Complex128::ZERO; out_size];
            transform::strided_scatter(dims.len(), dims, strides, offset, x, &mut out);
            Buffer::C128(out)
        }
    }
}
