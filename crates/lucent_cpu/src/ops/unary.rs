use rayon::prelude::*;

/// Element-wise map over a contiguous input.
pub fn unary_map<T, U, F>(inp: &[T], out: &mut [U], op: F)
where
    T: Copy + Send + Sync,
    U: Send,
    F: Fn(T) -> U + Send + Sync,
{
    out.par_iter_mut().zip(inp.par_iter()).for_each(|(out_val, &x)| {
        *out_val = op(x);
    });
}
