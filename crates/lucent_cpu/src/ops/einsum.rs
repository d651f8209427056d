use crate::element::Element;
use rayon::prelude::*;

/// Generic Einstein summation over pre-resolved labels.
///
/// Labels are numbered `0..sizes.len()`; the first `num_free` index the
/// output, the rest are summed. For every operand `operand_strides[k][l]` is
/// the sum of that operand's strides over the axes carrying label `l` (0 when
/// the label is absent, which broadcasts). `out_strides` does the same for the
/// output; positions where a repeated output label would disagree stay zero.
pub fn einsum<T: Element>(
    sizes: &[usize],
    num_free: usize,
    operand_strides: &[Vec<usize>],
    operands: &[&[T]],
    out_strides: &[usize],
    out: &mut [T],
) {
    let free_dims = &sizes[..num_free];
    let sum_dims = &sizes[num_free..];
    let free_size: usize = free_dims.iter().product();
    let sum_size: usize = sum_dims.iter().product();

    let values: Vec<(usize, T)> = (0..free_size)
        .into_par_iter()
        .map(|f| {
            let free_idx = unravel(f, free_dims);

            let out_offset: usize = free_idx.iter().zip(out_strides).map(|(&i, &s)| i * s).sum();
            let bases: Vec<usize> = operand_strides
                .iter()
                .map(|strides| free_idx.iter().zip(strides).map(|(&i, &s)| i * s).sum())
                .collect();

            let mut acc = T::zero();
            for s in 0..sum_size {
                let sum_idx = unravel(s, sum_dims);
                let mut prod = T::one();
                for ((operand, strides), &base) in operands.iter().zip(operand_strides).zip(&bases) {
                    let offset: usize = sum_idx
                        .iter()
                        .zip(&strides[num_free..])
                        .map(|(&i, &st)| i * st)
                        .sum();
                    prod = prod * operand[base + offset];
                }
                acc = acc + prod;
            }
            (out_offset, acc)
        })
        .collect();

    for (offset, value) in values {
        out[offset] = value;
    }
}

#[inline]
fn unravel(mut idx: usize, dims: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; dims.len()];
    for d in (0..dims.len()).rev() {
        coords[d] = idx % dims[d];
        idx /= dims[d];
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_and_diagonal_embedding() {
        // "ii->" on a 2x2 matrix
        let a = [1.0, 2.0, 3.0, 4.0];
        let mut out = [0.0];
        einsum(&[2], 0, &[vec![3]], &[&a], &[], &mut out);
        assert_eq!(out, [5.0]);

        // "i->ii" of a vector
        let v = [7.0, 8.0];
        let mut diag = [0.0; 4];
        einsum(&[2], 1, &[vec![1]], &[&v], &[3], &mut diag);
        assert_eq!(diag, [7.0, 0.0, 0.0, 8.0]);
    }
}
