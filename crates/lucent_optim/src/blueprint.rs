use crate::{lbfgsb::Objective, options::Bound};
use lucent_core::{
    dtype::DType,
    error::{Error, Result},
};
use lucent_tensor::Tensor;

#[derive(Debug, Clone)]
struct ParamEntry {
    tensor: Tensor,
    offset: usize,
    shape: Vec<usize>,
    size: usize,
}

/// Layout of the flat parameter vector: where each parameter's elements live
/// and which shape they scatter back into.
#[derive(Debug, Clone)]
pub struct ParamTable {
    entries: Vec<ParamEntry>,
    len: usize,
}

impl ParamTable {
    pub fn new(params: &[Tensor]) -> Result<Self> {
        if params.is_empty() {
            return Err(Error::InvalidArgument("no parameters to optimize".to_string()));
        }

        let mut entries: Vec<ParamEntry> = Vec::with_capacity(params.len());
        let mut offset = 0;
        for param in params {
            if !param.is_leaf() || !param.requires_grad() {
                return Err(Error::InvalidArgument(format!(
                    "parameters must be leaves with gradient tracking, got {:?}",
                    param
                )));
            }
            if entries.iter().any(|e| e.tensor.id() == param.id()) {
                return Err(Error::InvalidArgument(format!("parameter {:?} is listed twice", param)));
            }
            let dtype = param.dtype()?;
            if dtype != DType::F64 {
                return Err(Error::DTypeMismatch {
                    expected: DType::F64,
                    got: dtype,
                });
            }

            let shape = param.shape()?;
            let size = shape.iter().product();
            log::debug!("parameter {:?}: offset {}, shape {:?}", param.id(), offset, shape);
            entries.push(ParamEntry {
                tensor: param.clone(),
                offset,
                shape,
                size,
            });
            offset += size;
        }

        Ok(Self { entries, len: offset })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.entries.iter().map(|e| e.shape.clone()).collect()
    }

    /// Current parameter values, concatenated.
    pub fn gather(&self) -> Result<Vec<f64>> {
        let mut x = Vec::with_capacity(self.len);
        for entry in &self.entries {
            x.extend(entry.tensor.data()?.to_flatten_vec()?);
        }
        Ok(x)
    }

    /// Accumulated gradients, concatenated. Parameters without a gradient
    /// contribute zeros.
    pub fn gather_grad(&self) -> Result<Vec<f64>> {
        let mut g = Vec::with_capacity(self.len);
        for entry in &self.entries {
            match entry.tensor.grad()? {
                Some(grad) => g.extend(grad.to_flatten_vec()?),
                None => g.extend(std::iter::repeat(0.0).take(entry.size)),
            }
        }
        Ok(g)
    }

    pub fn scatter(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.len {
            return Err(Error::ShapeMismatch {
                expected: vec![self.len],
                got: vec![x.len()],
                msg: "parameter vector".to_string(),
            });
        }
        for entry in &self.entries {
            entry.tensor.assign_flat(&x[entry.offset..entry.offset + entry.size])?;
        }
        Ok(())
    }
}

/// A cost graph seen as a function of the flat parameter vector.
pub struct Blueprint {
    cost: Tensor,
    table: ParamTable,
    analytic_grad: bool,
    lower: Vec<f64>,
    upper: Vec<f64>,
    extra_evaluations: usize,
}

impl Blueprint {
    pub fn new(cost: &Tensor, params: &[Tensor], analytic_grad: bool) -> Result<Self> {
        let table = ParamTable::new(params)?;
        if let Some(param) = params.iter().find(|p| !cost.tracks_leaf(p)) {
            return Err(Error::InvalidArgument(format!(
                "parameter {:?} does not reach the cost with gradient tracking; \
                 enable tracking before building the cost graph",
                param
            )));
        }
        Ok(Self {
            cost: cost.clone(),
            lower: vec![f64::NEG_INFINITY; table.len()],
            upper: vec![f64::INFINITY; table.len()],
            table,
            analytic_grad,
            extra_evaluations: 0,
        })
    }

    pub fn with_bounds(mut self, bounds: &[Bound]) -> Self {
        self.lower = bounds.iter().map(Bound::lower).collect();
        self.upper = bounds.iter().map(Bound::upper).collect();
        self
    }

    pub fn table(&self) -> &ParamTable {
        &self.table
    }

    /// Cost evaluations spent on finite differences.
    pub fn extra_evaluations(&self) -> usize {
        self.extra_evaluations
    }

    fn evaluate(&self) -> Result<f64> {
        self.cost.item()?.as_f64()
    }

    fn finite_difference(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        self.table.scatter(x)?;
        let f0 = self.evaluate()?;
        self.extra_evaluations += 1;

        let mut shifted = x.to_vec();
        let mut grad = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let lower = self.lower.get(i).copied().unwrap_or(f64::NEG_INFINITY);
            let upper = self.upper.get(i).copied().unwrap_or(f64::INFINITY);
            let mut h = f64::EPSILON.sqrt() * x[i].abs().max(1.0);
            if x[i] + h > upper {
                h = -h;
                // box narrower than the step on both sides: shrink it to fit
                if x[i] + h < lower {
                    h = if upper - x[i] >= x[i] - lower { upper - x[i] } else { lower - x[i] };
                }
            }
            if h == 0.0 {
                grad.push(0.0);
                continue;
            }
            shifted[i] = x[i] + h;
            self.table.scatter(&shifted)?;
            let f = self.evaluate()?;
            self.extra_evaluations += 1;
            grad.push((f - f0) / h);
            shifted[i] = x[i];
        }
        self.table.scatter(x)?;
        Ok(grad)
    }
}

impl Objective for Blueprint {
    fn value(&mut self, x: &[f64]) -> Result<f64> {
        self.table.scatter(x)?;
        self.evaluate()
    }

    fn gradient(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        if !self.analytic_grad {
            return self.finite_difference(x);
        }
        self.table.scatter(x)?;
        self.cost.zero_grad()?;
        self.cost.backward()?;
        self.table.gather_grad()
    }
}
