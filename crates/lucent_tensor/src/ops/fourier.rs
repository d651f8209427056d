use super::InputMeta;
use crate::{Function, Tensor};
use lucent_core::{
    complex::Complex128,
    dense::{DenseArray, TensordotAxes},
    error::{Error, Result},
};
use std::f64::consts::PI;

/// Two-dimensional DFT over the last two axes by the matrix triple product
/// `W_rᵀ · x · W_c`, with free choice of output shape and sampling.
///
/// The zero frequency is expected at index `floor(n/2)` along each axis of
/// both planes. With `alpha = (1/m, 1/n)`, `unitary = false` and the input
/// shape as output shape this matches a centred FFT.
#[derive(Debug, Clone, PartialEq)]
pub struct Dft2 {
    /// Output sampling as (row, col), in cycles per input sample.
    pub alpha: (f64, f64),
    /// Output (rows, cols); `None` keeps the input's.
    pub shape: Option<(usize, usize)>,
    /// Scale by `sqrt|α_r|·sqrt|α_c|`.
    pub unitary: bool,
    /// Output-plane shift of the zero frequency, in pixels.
    pub shift: (f64, f64),
}

impl Dft2 {
    pub fn new(alpha: (f64, f64)) -> Self {
        Self {
            alpha,
            shape: None,
            unitary: true,
            shift: (0.0, 0.0),
        }
    }

    pub fn with_shape(mut self, rows: usize, cols: usize) -> Self {
        self.shape = Some((rows, cols));
        self
    }

    pub fn with_unitary(mut self, unitary: bool) -> Self {
        self.unitary = unitary;
        self
    }

    pub fn with_shift(mut self, row: f64, col: f64) -> Self {
        self.shift = (row, col);
        self
    }

    fn norm(&self) -> f64 {
        if self.unitary {
            self.alpha.0.abs().sqrt() * self.alpha.1.abs().sqrt()
        } else {
            1.0
        }
    }
}

fn centered_coords(n: usize) -> impl Iterator<Item = f64> {
    let center = (n / 2) as f64;
    (0..n).map(move |i| i as f64 - center)
}

/// `W[j, k] = exp(-2πi·α·(c_n[j] - s)·(c_N[k] - s))`, shape `(n, big_n)`.
pub fn dft_matrix(n: usize, big_n: usize, alpha: f64, shift: f64) -> Result<DenseArray> {
    let mut values = Vec::with_capacity(n * big_n);
    for u in centered_coords(n) {
        for v in centered_coords(big_n) {
            values.push(Complex128::cis(-2.0 * PI * alpha * (u - shift) * (v - shift)));
        }
    }
    DenseArray::from_complex_vec(values, &[n, big_n])
}

// y[.., p, q] = Σ a[i, p] · x[.., i, j] · b[j, q]
fn sandwich(a: &DenseArray, x: &DenseArray, b: &DenseArray) -> Result<DenseArray> {
    let d = x.ndim();
    let xb = x.tensordot(b, &TensordotAxes::Pairs(vec![d - 1], vec![0]))?;
    let axb = a.tensordot(&xb, &TensordotAxes::Pairs(vec![0], vec![d - 2]))?;
    let perm: Vec<usize> = (1..d - 1).chain([0, d - 1]).collect();
    axb.permute(&perm)
}

pub struct Dft2Cache {
    input: InputMeta,
    row_adjoint: DenseArray,
    col_adjoint: DenseArray,
}

impl Function for Dft2 {
    type Cache = Dft2Cache;

    fn name(&self) -> &'static str {
        "dft2"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let x = &inputs[0];
        if x.ndim() < 2 {
            return Err(Error::DimensionMismatch {
                expected: 2,
                got: x.ndim(),
            });
        }
        let (m, n) = (x.shape()[x.ndim() - 2], x.shape()[x.ndim() - 1]);
        let (rows, cols) = self.shape.unwrap_or((m, n));

        let w_row = dft_matrix(m, rows, self.alpha.0, self.shift.0)?;
        let w_col = dft_matrix(n, cols, self.alpha.1, self.shift.1)?;
        let output = sandwich(&w_row, x, &w_col)?.mul_scalar(self.norm());

        let cache = if track {
            Some(Dft2Cache {
                input: InputMeta::of(x),
                row_adjoint: w_row.conj().transpose()?,
                col_adjoint: w_col.conj().transpose()?,
            })
        } else {
            None
        };
        Ok((output, cache))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        let scaled = grad.mul_scalar(self.norm());
        let g = sandwich(&cache.row_adjoint, &scaled, &cache.col_adjoint)?;
        Ok(vec![Some(cache.input.reduce(&g)?)])
    }
}

impl Tensor {
    /// Applies `dft` over the last two axes of `self`.
    pub fn dft2(&self, dft: Dft2) -> Tensor {
        Tensor::from_function(dft, vec![self.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_term_is_the_sum() -> Result<()> {
        let x = DenseArray::from_vec((1..=12).map(f64::from).collect(), &[3, 4])?;
        let y = Tensor::from_dense(x).dft2(Dft2::new((1.0 / 3.0, 1.0 / 4.0)).with_unitary(false));
        let y = y.data()?;
        assert_eq!(y.shape(), &[3, 4]);
        // zero frequency sits at (floor(3/2), floor(4/2))
        let dc = y.get(&[1, 2])?.as_complex();
        assert!((dc - Complex128::from(78.0)).magnitude() < 1e-9);
        Ok(())
    }

    #[test]
    fn unitary_transform_preserves_energy() -> Result<()> {
        let values: Vec<f64> = (0..16).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        let x = DenseArray::from_vec(values.clone(), &[4, 4])?;
        let y = Tensor::from_dense(x).dft2(Dft2::new((0.25, 0.25))).data()?;
        let energy_in: f64 = values.iter().map(|v| v * v).sum();
        let energy_out: f64 = y.abs_square().to_flatten_vec()?.iter().sum();
        assert!((energy_in - energy_out).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn batched_frames_transform_independently() -> Result<()> {
        let frame: Vec<f64> = (0..6).map(f64::from).collect();
        let single = Tensor::from_dense(DenseArray::from_vec(frame.clone(), &[2, 3])?)
            .dft2(Dft2::new((0.5, 0.2)).with_shape(3, 2))
            .data()?;
        let stacked: Vec<f64> = frame.iter().copied().chain(std::iter::repeat(0.0).take(6)).collect();
        let batch = Tensor::from_dense(DenseArray::from_vec(stacked, &[2, 2, 3])?)
            .dft2(Dft2::new((0.5, 0.2)).with_shape(3, 2))
            .data()?;
        assert_eq!(batch.shape(), &[2, 3, 2]);
        let batch = batch.to_complex_vec();
        for (a, b) in single.to_complex_vec().iter().zip(&batch[..6]) {
            assert!((*a - *b).magnitude() < 1e-12);
        }
        assert!(batch[6..].iter().all(|v| v.magnitude() < 1e-12));
        Ok(())
    }
}
