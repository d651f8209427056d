use super::DenseArray;
use crate::{
    be::ops::transform,
    error::{Error, Result},
    layout::Layout,
};

/// One axis of a basic (NumPy-style) slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliceArg {
    /// Keep the whole axis.
    Full,
    /// Pick one position and drop the axis. Negative values count from the end.
    Index(isize),
    /// `start:stop:step` with `step >= 1`. Negative bounds count from the end;
    /// out-of-range bounds are clamped.
    Range {
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    },
}

impl SliceArg {
    pub fn range(start: isize, stop: isize) -> Self {
        Self::Range {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    pub fn start_at(start: isize) -> Self {
        Self::Range {
            start: Some(start),
            stop: None,
            step: 1,
        }
    }

    pub fn stop_at(stop: isize) -> Self {
        Self::Range {
            start: None,
            stop: Some(stop),
            step: 1,
        }
    }

    pub fn every(step: isize) -> Self {
        Self::Range {
            start: None,
            stop: None,
            step,
        }
    }
}

/// A slice resolved against a concrete shape: a strided view into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SliceView {
    pub offset: usize,
    pub dims: Vec<usize>,
    pub strides: Vec<usize>,
}

pub(crate) fn resolve_slice(shape: &[usize], args: &[SliceArg]) -> Result<SliceView> {
    if args.len() > shape.len() {
        return Err(Error::DimensionMismatch {
            expected: shape.len(),
            got: args.len(),
        });
    }

    let source_strides = Layout::compute_strides(shape);
    let mut view = SliceView {
        offset: 0,
        dims: Vec::with_capacity(shape.len()),
        strides: Vec::with_capacity(shape.len()),
    };

    for (axis, (&len, &stride)) in shape.iter().zip(&source_strides).enumerate() {
        match args.get(axis).copied().unwrap_or(SliceArg::Full) {
            SliceArg::Full => {
                view.dims.push(len);
                view.strides.push(stride);
            }
            SliceArg::Index(index) => {
                let resolved = if index < 0 { index + len as isize } else { index };
                if resolved < 0 || resolved >= len as isize {
                    return Err(Error::IndexOutOfBounds { index, size: len });
                }
                view.offset += resolved as usize * stride;
            }
            SliceArg::Range { start, stop, step } => {
                if step < 1 {
                    return Err(Error::InvalidArgument(format!("slice step must be positive, got {}", step)));
                }
                let clamp = |bound: isize| -> usize {
                    let b = if bound < 0 { bound + len as isize } else { bound };
                    b.clamp(0, len as isize) as usize
                };
                let start = start.map_or(0, clamp);
                let stop = stop.map_or(len, clamp);
                let count = if stop > start {
                    (stop - start).div_ceil(step as usize)
                } else {
                    0
                };
                view.offset += start.min(len) * stride;
                view.dims.push(count);
                view.strides.push(stride * step as usize);
            }
        }
    }

    Ok(view)
}

impl DenseArray {
    pub fn slice(&self, args: &[SliceArg]) -> Result<DenseArray> {
        let view = resolve_slice(self.shape(), args)?;
        let buffer = transform::strided_copy(self.buffer(), &view.dims, &view.strides, view.offset);
        Ok(DenseArray::from_parts(buffer, &view.dims))
    }

    /// Zeros of `shape` with `self` written where `slice(args)` would read.
    pub fn embed_slice(&self, shape: &[usize], args: &[SliceArg]) -> Result<DenseArray> {
        let view = resolve_slice(shape, args)?;
        if self.shape() != view.dims.as_slice() {
            return Err(Error::ShapeMismatch {
                expected: view.dims,
                got: self.shape().to_vec(),
                msg: "embed_slice".to_string(),
            });
        }
        let size = Layout::compute_size(shape);
        let buffer = transform::strided_scatter(self.buffer(), size, &view.dims, &view.strides, view.offset);
        Ok(DenseArray::from_parts(buffer, shape))
    }
}
