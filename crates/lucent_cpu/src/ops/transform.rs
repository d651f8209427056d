use crate::utils::get_strided_index;
use rayon::prelude::*;

/// Gathers a strided view of `inp` starting at `offset` into contiguous `out`.
pub fn strided_copy<T>(num_dims: usize, dims: &[usize], strides: &[usize], offset: usize, inp: &[T], out: &mut [T])
where
    T: Copy + Send + Sync,
{
    out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
        *out_val = inp[offset + get_strided_index(i, num_dims, dims, strides)];
    });
}

/// Inverse of [`strided_copy`]: writes contiguous `inp` into the strided
/// positions of `out`. Positions must be distinct.
pub fn strided_scatter<T>(num_dims: usize, dims: &[usize], strides: &[usize], offset: usize, inp: &[T], out: &mut [T])
where
    T: Copy,
{
    for (i, &val) in inp.iter().enumerate() {
        out[offset + get_strided_index(i, num_dims, dims, strides)] = val;
    }
}
