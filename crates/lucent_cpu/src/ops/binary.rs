use crate::utils::{get_strided_index, is_contiguous};
use rayon::prelude::*;

/// Element-wise binary map over two (possibly broadcast) operands.
///
/// `dims_and_strides` is either:
///   - `None`, meaning both operands are contiguous and exactly `out.len()` long, or
///   - a slice of `3 * num_dims` elements containing:
///     - dims[num_dims]: output dimensions
///     - lhs_strides[num_dims]: strides for the left-hand side (0 on broadcast axes)
///     - rhs_strides[num_dims]: strides for the right-hand side (0 on broadcast axes)
pub fn binary_map<T, U, F>(num_dims: usize, dims_and_strides: Option<&[usize]>, lhs: &[T], rhs: &[T], out: &mut [U], op: F)
where
    T: Copy + Send + Sync,
    U: Send,
    F: Fn(T, T) -> U + Send + Sync,
{
    let strided = dims_and_strides.and_then(|meta| {
        let dims = &meta[..num_dims];
        let lhs_strides = &meta[num_dims..2 * num_dims];
        let rhs_strides = &meta[2 * num_dims..3 * num_dims];

        if is_contiguous(num_dims, dims, lhs_strides) && is_contiguous(num_dims, dims, rhs_strides) {
            None
        } else {
            Some((dims, lhs_strides, rhs_strides))
        }
    });

    match strided {
        None => {
            out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
                *out_val = op(lhs[i], rhs[i]);
            });
        }
        Some((dims, lhs_strides, rhs_strides)) => {
            out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
                let lhs_idx = get_strided_index(i, num_dims, dims, lhs_strides);
                let rhs_idx = get_strided_index(i, num_dims, dims, rhs_strides);
                *out_val = op(lhs[lhs_idx], rhs[rhs_idx]);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_add() {
        let lhs = [1.0, 2.0, 3.0];
        let rhs = [10.0, 20.0, 30.0];
        let mut out = [0.0; 3];
        binary_map(1, None, &lhs, &rhs, &mut out, |a, b| a + b);
        assert_eq!(out, [11.0, 22.0, 33.0]);
    }

    #[test]
    fn broadcast_column_times_row() {
        // (3, 1) * (1, 4) -> (3, 4)
        let col = [1.0, 2.0, 3.0];
        let row = [1.0, 10.0, 100.0, 1000.0];
        let meta = [3, 4, 1, 0, 0, 1];
        let mut out = [0.0; 12];
        binary_map(2, Some(&meta), &col, &row, &mut out, |a, b| a * b);
        assert_eq!(&out[..4], &[1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(&out[8..], &[3.0, 30.0, 300.0, 3000.0]);
    }
}
