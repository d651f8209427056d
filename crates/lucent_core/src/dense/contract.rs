use super::DenseArray;
use crate::{
    be::ops::{einsum, matmul},
    buffer::Buffer,
    dtype::DType,
    error::{Error, Result},
    layout::Layout,
};
use std::{borrow::Cow, collections::BTreeMap, fmt};

/// Parsed einsum subscripts: one label list per operand plus the output labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EinsumSpec {
    pub inputs: Vec<Vec<char>>,
    pub output: Vec<char>,
}

impl EinsumSpec {
    pub fn new(inputs: Vec<Vec<char>>, output: Vec<char>) -> Self {
        Self { inputs, output }
    }

    /// Parses `"ij,jk->ik"` style subscripts. Without `->` the output holds the
    /// labels that occur exactly once, in alphabetical order.
    pub fn parse(subscripts: &str) -> Result<Self> {
        let compact: String = subscripts.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.contains("...") {
            return Err(Error::InvalidSubscripts("ellipsis broadcasting is not supported".to_string()));
        }

        let (lhs, output) = match compact.split_once("->") {
            Some((lhs, rhs)) => {
                if rhs.contains("->") {
                    return Err(Error::InvalidSubscripts(format!("'{}' has more than one '->'", subscripts)));
                }
                (lhs, Some(rhs))
            }
            None => (compact.as_str(), None),
        };

        let inputs: Vec<Vec<char>> = lhs.split(',').map(|s| s.chars().collect()).collect();
        for label in inputs.iter().flatten() {
            if !label.is_ascii_alphabetic() {
                return Err(Error::InvalidSubscripts(format!("invalid label '{}' in '{}'", label, subscripts)));
            }
        }

        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for &label in inputs.iter().flatten() {
            *counts.entry(label).or_default() += 1;
        }

        let output: Vec<char> = match output {
            Some(out) => {
                let out: Vec<char> = out.chars().collect();
                for (i, label) in out.iter().enumerate() {
                    if !counts.contains_key(label) {
                        return Err(Error::InvalidSubscripts(format!(
                            "output label '{}' does not appear in any operand",
                            label
                        )));
                    }
                    if out[..i].contains(label) {
                        return Err(Error::InvalidSubscripts(format!("output label '{}' is repeated", label)));
                    }
                }
                out
            }
            None => counts.iter().filter(|(_, &n)| n == 1).map(|(&c, _)| c).collect(),
        };

        Ok(Self { inputs, output })
    }
}

impl fmt::Display for EinsumSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<String> = self.inputs.iter().map(|s| s.iter().collect()).collect();
        let output: String = self.output.iter().collect();
        write!(f, "{}->{}", inputs.join(","), output)
    }
}

/// Axes contracted by `tensordot`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TensordotAxes {
    /// The last `n` axes of `a` against the first `n` axes of `b`.
    Count(usize),
    /// Explicit axis pairs.
    Pairs(Vec<usize>, Vec<usize>),
}

impl TensordotAxes {
    pub fn resolve(&self, a_ndim: usize, b_ndim: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        let (a_axes, b_axes) = match self {
            Self::Count(n) => {
                if *n > a_ndim || *n > b_ndim {
                    return Err(Error::InvalidArgument(format!(
                        "cannot contract {} axes of arrays with {} and {} dimensions",
                        n, a_ndim, b_ndim
                    )));
                }
                ((a_ndim - n..a_ndim).collect(), (0..*n).collect())
            }
            Self::Pairs(a, b) => (a.clone(), b.clone()),
        };

        if a_axes.len() != b_axes.len() {
            return Err(Error::InvalidArgument(format!(
                "tensordot axes lists differ in length: {:?} vs {:?}",
                a_axes, b_axes
            )));
        }
        for (axes, ndim) in [(&a_axes, a_ndim), (&b_axes, b_ndim)] {
            for (i, &axis) in axes.iter().enumerate() {
                if axis >= ndim {
                    return Err(Error::DimensionOutOfBounds {
                        dim: axis as isize,
                        ndim,
                    });
                }
                if axes[..i].contains(&axis) {
                    return Err(Error::InvalidArgument(format!("repeated tensordot axis {}", axis)));
                }
            }
        }
        Ok((a_axes, b_axes))
    }
}

impl From<usize> for TensordotAxes {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<(Vec<usize>, Vec<usize>)> for TensordotAxes {
    fn from((a, b): (Vec<usize>, Vec<usize>)) -> Self {
        Self::Pairs(a, b)
    }
}

fn common_dtype(arrays: &[&DenseArray]) -> DType {
    arrays.iter().fold(DType::F64, |dtype, a| dtype.promote(a.dtype()))
}

impl DenseArray {
    /// 2-D matrix product.
    pub fn matmul(&self, rhs: &DenseArray) -> Result<DenseArray> {
        if self.ndim() != 2 || rhs.ndim() != 2 {
            return Err(Error::IncompatibleShape(format!(
                "matmul expects 2-D operands, got {:?} and {:?}",
                self.shape(),
                rhs.shape()
            )));
        }
        let (m, k) = (self.shape()[0], self.shape()[1]);
        let (k2, n) = (rhs.shape()[0], rhs.shape()[1]);
        if k != k2 {
            return Err(Error::ShapeMismatch {
                expected: vec![k],
                got: vec![k2],
                msg: "matmul inner dimension".to_string(),
            });
        }

        let dtype = common_dtype(&[self, rhs]);
        let a = self.promoted_buffer(dtype)?;
        let b = rhs.promoted_buffer(dtype)?;
        let buffer = matmul::matmul(&a, &b, m, k, n)?;
        Ok(DenseArray::from_parts(buffer, &[m, n]))
    }

    /// Contracts `self` and `rhs` over `axes`. The result carries the free
    /// axes of `self` followed by the free axes of `rhs`, each in order.
    pub fn tensordot(&self, rhs: &DenseArray, axes: &TensordotAxes) -> Result<DenseArray> {
        let (a_axes, b_axes) = axes.resolve(self.ndim(), rhs.ndim())?;

        let a_contracted: Vec<usize> = a_axes.iter().map(|&a| self.shape()[a]).collect();
        let b_contracted: Vec<usize> = b_axes.iter().map(|&b| rhs.shape()[b]).collect();
        if a_contracted != b_contracted {
            return Err(Error::ShapeMismatch {
                expected: a_contracted,
                got: b_contracted,
                msg: "tensordot contracted axes".to_string(),
            });
        }

        let a_free: Vec<usize> = (0..self.ndim()).filter(|d| !a_axes.contains(d)).collect();
        let b_free: Vec<usize> = (0..rhs.ndim()).filter(|d| !b_axes.contains(d)).collect();

        let m: usize = a_free.iter().map(|&d| self.shape()[d]).product();
        let k: usize = a_contracted.iter().product();
        let n: usize = b_free.iter().map(|&d| rhs.shape()[d]).product();

        let a_perm: Vec<usize> = a_free.iter().chain(&a_axes).copied().collect();
        let b_perm: Vec<usize> = b_axes.iter().chain(&b_free).copied().collect();
        let a2 = self.permute(&a_perm)?.reshape(&[m, k])?;
        let b2 = rhs.permute(&b_perm)?.reshape(&[k, n])?;

        let out_shape: Vec<usize> = a_free
            .iter()
            .map(|&d| self.shape()[d])
            .chain(b_free.iter().map(|&d| rhs.shape()[d]))
            .collect();
        a2.matmul(&b2)?.reshape(&out_shape)
    }

    /// Einstein summation, e.g. `einsum("ij,jk->ik", &[&a, &b])`.
    pub fn einsum(subscripts: &str, operands: &[&DenseArray]) -> Result<DenseArray> {
        let spec = EinsumSpec::parse(subscripts)?;
        Self::einsum_with_sizes(&spec, operands, &[])
    }

    /// Einsum over an already parsed spec. `extra_sizes` supplies the extent
    /// of output labels that no operand carries; such labels broadcast.
    /// Output labels may repeat, which writes onto the diagonal.
    pub fn einsum_with_sizes(spec: &EinsumSpec, operands: &[&DenseArray], extra_sizes: &[(char, usize)]) -> Result<DenseArray> {
        if spec.inputs.len() != operands.len() {
            return Err(Error::InvalidSubscripts(format!(
                "'{}' names {} operands but {} were given",
                spec,
                spec.inputs.len(),
                operands.len()
            )));
        }

        let mut label_sizes: BTreeMap<char, usize> = extra_sizes.iter().copied().collect();
        for (labels, operand) in spec.inputs.iter().zip(operands) {
            if labels.len() != operand.ndim() {
                return Err(Error::DimensionMismatch {
                    expected: labels.len(),
                    got: operand.ndim(),
                });
            }
            for (&label, &size) in labels.iter().zip(operand.shape()) {
                match label_sizes.get(&label) {
                    Some(&known) if known != size => {
                        return Err(Error::ShapeMismatch {
                            expected: vec![known],
                            got: vec![size],
                            msg: format!("einsum label '{}'", label),
                        })
                    }
                    _ => {
                        label_sizes.insert(label, size);
                    }
                }
            }
        }

        // free labels (output order, first occurrence) then summed labels
        let mut order: Vec<char> = Vec::new();
        for &label in &spec.output {
            if !order.contains(&label) {
                order.push(label);
            }
        }
        let num_free = order.len();
        for &label in spec.inputs.iter().flatten() {
            if !order.contains(&label) {
                order.push(label);
            }
        }

        let sizes = order
            .iter()
            .map(|label| {
                label_sizes
                    .get(label)
                    .copied()
                    .ok_or_else(|| Error::InvalidSubscripts(format!("no size known for label '{}'", label)))
            })
            .collect::<Result<Vec<_>>>()?;

        let label_strides = |labels: &[char], strides: &[usize]| -> Vec<usize> {
            order
                .iter()
                .map(|l| labels.iter().zip(strides).filter(|(c, _)| *c == l).map(|(_, &s)| s).sum())
                .collect()
        };

        let out_shape: Vec<usize> = spec.output.iter().map(|l| label_sizes[l]).collect();
        let out_strides = label_strides(&spec.output, &Layout::compute_strides(&out_shape));
        let operand_strides: Vec<Vec<usize>> = spec
            .inputs
            .iter()
            .zip(operands)
            .map(|(labels, operand)| label_strides(labels, operand.strides()))
            .collect();

        let dtype = common_dtype(operands);
        let buffers = operands
            .iter()
            .map(|a| a.promoted_buffer(dtype))
            .collect::<Result<Vec<Cow<'_, Buffer>>>>()?;
        let buffer_refs: Vec<&Buffer> = buffers.iter().map(|b| b.as_ref()).collect();

        let out_size = Layout::compute_size(&out_shape);
        log::trace!("einsum {} over label sizes {:?}", spec, sizes);
        let buffer = einsum::einsum(&sizes, num_free, &operand_strides, &buffer_refs, &out_strides, out_size)?;
        Ok(DenseArray::from_parts(buffer, &out_shape))
    }
}
