//! Normalized sum-squared error between a model and fixed data, optionally
//! invariant to per-frame gain and bias.
//!
//! An array of rank 3 holds `shape[0]` independent frames; otherwise the whole
//! array is one frame. Per-frame reductions run over the last two axes (the
//! only axis for 1-D data). Masks for the error select elements: 1 keeps an
//! element, 0 drops it. The fitting helpers also accept fractional weights.
use crate::{Function, Tensor};
use lucent_core::{
    dense::DenseArray,
    dtype::DType,
    error::{Error, Result},
};

fn frame_axes(ndim: usize) -> Vec<isize> {
    if ndim >= 2 {
        vec![-2, -1]
    } else {
        vec![-1]
    }
}

fn frame_count(shape: &[usize]) -> usize {
    shape[..shape.len().saturating_sub(2)].iter().product()
}

fn apply_mask(x: &DenseArray, mask: Option<&DenseArray>) -> Result<DenseArray> {
    match mask {
        Some(mask) => x.mul(mask),
        None => Ok(x.clone()),
    }
}

// per-frame sums, kept broadcastable against the frame
fn frame_sum(x: &DenseArray) -> Result<DenseArray> {
    x.sum_axes(&frame_axes(x.ndim()), true)
}

fn ensure_nonzero(x: &DenseArray, what: &str) -> Result<()> {
    if x.to_flatten_vec()?.iter().any(|&v| v == 0.0) {
        return Err(Error::InvalidArgument(format!("{} is zero for at least one frame", what)));
    }
    Ok(())
}

fn ensure_binary(mask: &DenseArray) -> Result<()> {
    if let Some(v) = mask.to_flatten_vec()?.into_iter().find(|&v| v != 0.0 && v != 1.0) {
        return Err(Error::InvalidArgument(format!(
            "sserror masks must hold only 0 and 1, found {}",
            v
        )));
    }
    Ok(())
}

fn ensure_real(x: &DenseArray) -> Result<()> {
    if x.is_complex() {
        return Err(Error::DTypeMismatch {
            expected: DType::F64,
            got: x.dtype(),
        });
    }
    Ok(())
}

/// Subtracts the (masked) mean of every frame.
pub fn remove_mean(x: &DenseArray, mask: Option<&DenseArray>) -> Result<DenseArray> {
    if x.ndim() == 0 {
        return Err(Error::InvalidArgument("remove_mean needs at least one axis".to_string()));
    }
    let weight = match mask {
        Some(mask) => frame_sum(&mask.broadcast_to(x.shape())?)?,
        None => frame_sum(&x.ones_like())?,
    };
    ensure_nonzero(&weight, "mask sum")?;
    let mean = frame_sum(&apply_mask(x, mask)?)?.div(&weight)?;
    x.sub(&mean)
}

/// Least-squares gain `α` per frame with `f ≈ α·g`, both already mean-free.
/// The result keeps the reduced axes as size 1.
pub fn fit_gain(f: &DenseArray, g: &DenseArray, mask: Option<&DenseArray>) -> Result<DenseArray> {
    let numer = frame_sum(&apply_mask(&f.mul(g)?, mask)?)?;
    let denom = frame_sum(&apply_mask(&g.square(), mask)?)?;
    ensure_nonzero(&denom, "masked energy of g")?;
    numer.div(&denom)
}

/// Bias per frame given a gain from [`fit_gain`]: the (masked) mean of
/// `f - gain·g`, shaped like the gain.
pub fn fit_bias(f: &DenseArray, g: &DenseArray, mask: Option<&DenseArray>, gain: &DenseArray) -> Result<DenseArray> {
    let resid = f.sub(&g.mul(gain)?)?;
    let weight = match mask {
        Some(mask) => frame_sum(&mask.broadcast_to(f.shape())?)?,
        None => frame_sum(&f.ones_like())?,
    };
    ensure_nonzero(&weight, "mask sum")?;
    frame_sum(&apply_mask(&resid, mask)?)?.div(&weight)
}

/// Configured error function; becomes a graph node through [`SsError::apply`].
#[derive(Debug, Clone)]
pub struct SsError {
    data: DenseArray,
    mask: Option<DenseArray>,
    gain_bias_invariant: bool,
    frames: usize,
    // mean-free data, only in gain/bias invariant mode
    centered: Option<DenseArray>,
    // Σ m·f² over everything (invariant) or per frame (plain)
    norm: DenseArray,
}

impl SsError {
    pub fn new(data: &DenseArray, mask: Option<&DenseArray>, gain_bias_invariant: bool) -> Result<Self> {
        ensure_real(data)?;
        if data.ndim() == 0 {
            return Err(Error::InvalidArgument("sserror data needs at least one axis".to_string()));
        }
        if gain_bias_invariant && data.ndim() < 2 {
            return Err(Error::InvalidArgument(
                "gain/bias invariant sserror needs data with at least two axes".to_string(),
            ));
        }
        let mask = match mask {
            Some(mask) => {
                ensure_real(mask)?;
                ensure_binary(mask)?;
                Some(mask.broadcast_to(data.shape())?)
            }
            None => None,
        };

        let energy = apply_mask(&data.square(), mask.as_ref())?;
        let (centered, norm) = if gain_bias_invariant {
            (Some(remove_mean(data, mask.as_ref())?), energy.sum_all())
        } else {
            (None, frame_sum(&energy)?)
        };
        ensure_nonzero(&norm, "masked energy of the data")?;

        Ok(Self {
            frames: frame_count(data.shape()),
            data: data.clone(),
            mask,
            gain_bias_invariant,
            centered,
            norm,
        })
    }

    pub fn data(&self) -> &DenseArray {
        &self.data
    }

    pub fn mask(&self) -> Option<&DenseArray> {
        self.mask.as_ref()
    }

    pub fn gain_bias_invariant(&self) -> bool {
        self.gain_bias_invariant
    }

    /// Builds the error node for `model`.
    pub fn apply(self, model: &Tensor) -> Tensor {
        Tensor::from_function(self, vec![model.clone()])
    }

    /// Residual for the current value of `model`.
    pub fn residual(&self, model: &Tensor) -> Result<DenseArray> {
        Ok(self.evaluate(&model.data()?)?.0)
    }

    // (residual, per-element gradient scale)
    fn evaluate(&self, model: &DenseArray) -> Result<(DenseArray, DenseArray)> {
        ensure_real(model)?;
        if model.shape() != self.data.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.data.shape().to_vec(),
                got: model.shape().to_vec(),
                msg: "sserror model".to_string(),
            });
        }
        let mask = self.mask.as_ref();
        let k = self.frames as f64;

        match &self.centered {
            Some(centered) => {
                let g = remove_mean(model, mask)?;
                let gain = fit_gain(centered, &g, mask)?;
                let resid = apply_mask(&g.mul(&gain)?.sub(centered)?, mask)?;
                let scale = gain.div(&self.norm)?.mul_scalar(2.0 / k);
                Ok((resid, scale))
            }
            None => {
                let resid = apply_mask(&model.sub(&self.data)?, mask)?;
                let scale = DenseArray::scalar(2.0 / k).div(&self.norm)?;
                Ok((resid, scale))
            }
        }
    }
}

pub struct SsErrorCache {
    resid: DenseArray,
    scale: DenseArray,
}

impl Function for SsError {
    type Cache = SsErrorCache;

    fn name(&self) -> &'static str {
        "sserror"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)> {
        let (resid, scale) = self.evaluate(&inputs[0])?;
        let k = self.frames as f64;
        let error = resid.square().div(&self.norm)?.sum_all().mul_scalar(1.0 / k);
        let cache = track.then_some(SsErrorCache { resid, scale });
        Ok((error, cache))
    }

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        if !needs_grad[0] {
            return Ok(vec![None]);
        }
        let local = apply_mask(&cache.resid.mul(&cache.scale)?, self.mask.as_ref())?;
        Ok(vec![Some(local.mul(&grad.real())?)])
    }
}

/// Normalized sum-squared error of `model` against `data`.
pub fn sserror(model: &Tensor, data: &DenseArray, mask: Option<&DenseArray>, gain_bias_invariant: bool) -> Result<Tensor> {
    Ok(SsError::new(data, mask, gain_bias_invariant)?.apply(model))
}
