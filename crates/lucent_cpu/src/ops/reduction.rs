use crate::{
    element::Element,
    utils::{contiguous_strides, get_strided_index},
};
use rayon::prelude::*;

/// Sums every element sequentially in storage order.
pub fn sum_all<T: Element>(inp: &[T]) -> T {
    inp.iter().fold(T::zero(), |acc, &x| acc + x)
}

/// Sums a contiguous input of shape `input_dims` down to `output_dims`.
///
/// Both shapes have `num_dims` entries; every output dim is either equal to
/// the input dim or 1 (the axis is summed). `out` must hold
/// `product(output_dims)` elements.
pub fn sum_to_shape<T: Element>(num_dims: usize, input_dims: &[usize], output_dims: &[usize], inp: &[T], out: &mut [T]) {
    let input_strides = contiguous_strides(&input_dims[..num_dims]);

    // dims iterated per output element, and the matching input strides
    let reduce_dims: Vec<usize> = (0..num_dims)
        .map(|d| if output_dims[d] == 1 { input_dims[d] } else { 1 })
        .collect();
    let reduce_size: usize = reduce_dims.iter().product();

    // output coordinate -> input offset uses the input strides on kept axes
    let kept_strides: Vec<usize> = (0..num_dims)
        .map(|d| if output_dims[d] == 1 { 0 } else { input_strides[d] })
        .collect();

    out.par_iter_mut().enumerate().for_each(|(o, out_val)| {
        let base = get_strided_index(o, num_dims, output_dims, &kept_strides);
        let mut acc = T::zero();
        for r in 0..reduce_size {
            acc = acc + inp[base + get_strided_index(r, num_dims, &reduce_dims, &input_strides)];
        }
        *out_val = acc;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_rows_and_columns() {
        let inp = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        let mut rows = [0.0; 2];
        sum_to_shape(2, &[2, 3], &[2, 1], &inp, &mut rows);
        assert_eq!(rows, [6.0, 15.0]);

        let mut cols = [0.0; 3];
        sum_to_shape(2, &[2, 3], &[1, 3], &inp, &mut cols);
        assert_eq!(cols, [5.0, 7.0, 9.0]);

        assert_eq!(sum_all(&inp), 21.0);
    }
}
