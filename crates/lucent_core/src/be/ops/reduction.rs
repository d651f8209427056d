use crate::{buffer::Buffer, complex::Complex128, scalar::Scalar};
use lucent_cpu::ops::reduction;

pub fn sum_all(inp: &Buffer) -> Scalar {
    match inp {
        Buffer::F64(x) => Scalar::F64(reduction::sum_all(x)),
        Buffer::C128(x) => Scalar::C128(reduction::sum_all(x)),
    }
}

/// `output_dims` has the same rank as `input_dims`, with 1 on summed axes.
pub fn sum_to_shape(inp: &Buffer, input_dims: &[usize], output_dims: &[usize]) -> Buffer {
    let num_dims = input_dims.len();
    let out_size = output_dims.iter().product();
    match inp {
        Buffer::F64(x) => {
            let mut out = vec![0.0; out_size];
            reduction::sum_to_shape(num_dims, input_dims, output_dims, x, &mut out);
            Buffer::F64(out)
        }
        Buffer::C128(x) => {
            let mut out = vec![Complex128::ZERO; out_size];
            reduction::sum_to_shape(num_dims, input_dims, output_dims, x, &mut out);
            Buffer::C128(out)
        }
    }
}
