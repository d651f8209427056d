use crate::element::Element;
use rayon::prelude::*;

/// `c[m, n] = sum_k a[m, k] * b[k, n]` for contiguous row-major operands.
pub fn matmul<T: Element>(m: usize, k: usize, n: usize, a: &[T], b: &[T], c: &mut [T]) {
    if m == 0 || n == 0 {
        return;
    }

    c.par_chunks_mut(n).enumerate().for_each(|(m_idx, c_row)| {
        let a_row = &a[m_idx * k..(m_idx + 1) * k];
        for (n_idx, c_val) in c_row.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (k_idx, &a_val) in a_row.iter().enumerate() {
                acc = acc + a_val * b[k_idx * n + n_idx];
            }
            *c_val = acc;
        }
    });
}
