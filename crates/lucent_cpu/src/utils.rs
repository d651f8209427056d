#[inline]
pub fn is_contiguous(num_dims: usize, dims: &[usize], strides: &[usize]) -> bool {
    let mut acc = 1;
    for d in 0..num_dims {
        let dim_idx = num_dims - 1 - d;
        if dims[dim_idx] > 1 && acc != strides[dim_idx] {
            return false;
        }
        acc *= dims[dim_idx];
    }
    true
}

#[inline]
pub fn get_strided_index(idx: usize, num_dims: usize, dims: &[usize], strides: &[usize]) -> usize {
    let mut strided_i = 0;
    let mut remaining_idx = idx;

    for d in 0..num_dims {
        let dim_idx = num_dims - 1 - d;
        strided_i += (remaining_idx % dims[dim_idx]) * strides[dim_idx];
        remaining_idx /= dims[dim_idx];
    }

    strided_i
}

#[inline]
pub fn contiguous_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for d in (0..dims.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    strides
}
