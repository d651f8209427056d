mod backward;
mod creation;
mod function;
mod graph;
mod operators;
pub mod ops;

pub use function::Function;
pub use ops::{
    cost::{fit_bias, fit_gain, remove_mean, sserror, SsError},
    einsum::einsum,
    fourier::Dft2,
};

use function::{FunctionNode, Node};
use lucent_core::{
    dense::DenseArray,
    dtype::DType,
    error::{Error, Result},
    scalar::Scalar,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, RwLock,
    },
};

static NEXT_TENSOR_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorId(usize);

impl TensorId {
    fn next() -> Self {
        Self(NEXT_TENSOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) struct LeafData {
    data: Arc<RwLock<DenseArray>>,
    grad: Arc<Mutex<Option<DenseArray>>>,
    requires_grad: bool,
}

pub(crate) struct NodeState {
    epoch: u64,
    output: Option<DenseArray>,
    forward_count: usize,
}

pub(crate) struct OpData {
    node: Box<dyn Node>,
    inputs: Vec<Tensor>,
    requires_grad: bool,
    state: Mutex<NodeState>,
}

pub(crate) enum TensorKind {
    Leaf(LeafData),
    Op(OpData),
}

pub(crate) struct TensorInner {
    id: TensorId,
    kind: TensorKind,
}

/// A value in the computational graph: either a leaf holding user data or
/// an operation node that recomputes its value from its inputs on demand.
///
/// Cloning a `Tensor` clones the handle; both clones refer to the same
/// graph vertex.
#[derive(Clone)]
pub struct Tensor {
    inner: Arc<TensorInner>,
}

impl Tensor {
    pub(crate) fn from_leaf(data: DenseArray, requires_grad: bool) -> Self {
        Self {
            inner: Arc::new(TensorInner {
                id: TensorId::next(),
                kind: TensorKind::Leaf(LeafData {
                    data: Arc::new(RwLock::new(data)),
                    grad: Arc::new(Mutex::new(None)),
                    requires_grad,
                }),
            }),
        }
    }

    /// Builds an operation node applying `function` to `inputs`. Nothing is
    /// evaluated here; `requires_grad` is fixed now as the OR over the inputs.
    pub fn from_function<F: Function>(function: F, inputs: Vec<Tensor>) -> Self {
        let requires_grad = inputs.iter().any(Tensor::requires_grad);
        Self {
            inner: Arc::new(TensorInner {
                id: TensorId::next(),
                kind: TensorKind::Op(OpData {
                    node: Box::new(FunctionNode::new(function)),
                    inputs,
                    requires_grad,
                    state: Mutex::new(NodeState {
                        epoch: 0,
                        output: None,
                        forward_count: 0,
                    }),
                }),
            }),
        }
    }

    pub(crate) fn kind(&self) -> &TensorKind {
        &self.inner.kind
    }

    // metadata

    pub fn id(&self) -> TensorId {
        self.inner.id
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind(), TensorKind::Leaf(_))
    }

    pub fn requires_grad(&self) -> bool {
        match self.kind() {
            TensorKind::Leaf(leaf) => leaf.requires_grad,
            TensorKind::Op(op) => op.requires_grad,
        }
    }

    /// Name of the operation, `None` for leaves.
    pub fn op_name(&self) -> Option<&'static str> {
        match self.kind() {
            TensorKind::Leaf(_) => None,
            TensorKind::Op(op) => Some(op.node.name()),
        }
    }

    pub fn inputs(&self) -> &[Tensor] {
        match self.kind() {
            TensorKind::Leaf(_) => &[],
            TensorKind::Op(op) => &op.inputs,
        }
    }

    /// Number of times this node's forward has run (always 0 for leaves).
    pub fn forward_count(&self) -> Result<usize> {
        match self.kind() {
            TensorKind::Leaf(_) => Ok(0),
            TensorKind::Op(op) => Ok(op.state.lock().map_err(|_| Error::BufferLocked)?.forward_count),
        }
    }

    /// Turns this handle into a tracked leaf. The underlying data and
    /// gradient storage stay shared with other handles, but nodes built from
    /// the untracked handle before this call stay untracked.
    pub fn with_grad(&mut self) -> Result<()> {
        let TensorKind::Leaf(leaf) = self.kind() else {
            return Err(Error::InvalidArgument(format!(
                "gradient tracking can only be enabled on leaves, not on '{}' nodes",
                self.op_name().unwrap_or("?")
            )));
        };
        if leaf.requires_grad {
            return Ok(());
        }
        let kind = TensorKind::Leaf(LeafData {
            data: Arc::clone(&leaf.data),
            grad: Arc::clone(&leaf.grad),
            requires_grad: true,
        });
        self.inner = Arc::new(TensorInner { id: self.inner.id, kind });
        Ok(())
    }

    // data

    pub fn shape(&self) -> Result<Vec<usize>> {
        match self.kind() {
            TensorKind::Leaf(leaf) => Ok(leaf.data.read().map_err(|_| Error::BufferLocked)?.shape().to_vec()),
            TensorKind::Op(_) => Ok(self.data()?.shape().to_vec()),
        }
    }

    pub fn dtype(&self) -> Result<DType> {
        match self.kind() {
            TensorKind::Leaf(leaf) => Ok(leaf.data.read().map_err(|_| Error::BufferLocked)?.dtype()),
            TensorKind::Op(_) => Ok(self.data()?.dtype()),
        }
    }

    pub fn item(&self) -> Result<Scalar> {
        self.data()?.item()
    }

    pub fn to_flatten_vec(&self) -> Result<Vec<f64>> {
        self.data()?.to_flatten_vec()
    }

    /// Replaces a leaf's value. Shape and dtype must be preserved.
    pub fn set_data(&self, value: DenseArray) -> Result<()> {
        let TensorKind::Leaf(leaf) = self.kind() else {
            return Err(Error::InvalidArgument("set_data is only defined for leaves".to_string()));
        };
        let mut guard = leaf.data.write().map_err(|_| Error::BufferLocked)?;
        if guard.shape() != value.shape() {
            return Err(Error::ShapeMismatch {
                expected: guard.shape().to_vec(),
                got: value.shape().to_vec(),
                msg: "set_data".to_string(),
            });
        }
        if guard.dtype() != value.dtype() {
            return Err(Error::DTypeMismatch {
                expected: guard.dtype(),
                got: value.dtype(),
            });
        }
        *guard = value;
        Ok(())
    }

    /// Overwrites a real leaf from flat row-major values.
    pub fn assign_flat(&self, values: &[f64]) -> Result<()> {
        let shape = self.shape()?;
        self.set_data(DenseArray::from_vec(values.to_vec(), &shape)?)
    }

    // grad

    /// Accumulated gradient of a leaf; `None` until a backward pass reaches it
    /// (and always `None` for operation nodes).
    pub fn grad(&self) -> Result<Option<DenseArray>> {
        match self.kind() {
            TensorKind::Leaf(leaf) => Ok(leaf.grad.lock().map_err(|_| Error::GradLocked)?.clone()),
            TensorKind::Op(_) => Ok(None),
        }
    }

    /// Adds `grad` into a tracked leaf's gradient after reducing it to the
    /// leaf's shape. Real leaves keep the real part of a complex gradient.
    /// Untracked leaves and operation nodes ignore the call.
    pub fn accumulate_grad(&self, grad: &DenseArray) -> Result<()> {
        let TensorKind::Leaf(leaf) = self.kind() else {
            return Ok(());
        };
        if !leaf.requires_grad {
            return Ok(());
        }

        let (shape, dtype) = {
            let data = leaf.data.read().map_err(|_| Error::BufferLocked)?;
            (data.shape().to_vec(), data.dtype())
        };
        let mut grad = grad.sum_to_shape(&shape)?;
        if !dtype.is_complex() {
            grad = grad.real();
        }

        let mut guard = leaf.grad.lock().map_err(|_| Error::GradLocked)?;
        let updated = match guard.take() {
            Some(existing) => existing.add(&grad)?,
            None => grad,
        };
        *guard = Some(updated);
        Ok(())
    }

    /// Clears the gradient of a leaf, or of every leaf reachable from a node.
    pub fn zero_grad(&self) -> Result<()> {
        for leaf in self.leaves() {
            if let TensorKind::Leaf(data) = leaf.kind() {
                *data.grad.lock().map_err(|_| Error::GradLocked)? = None;
            }
        }
        Ok(())
    }

    /// Distinct leaves reachable from this tensor, in first-visit order.
    pub fn leaves(&self) -> Vec<Tensor> {
        let mut seen = std::collections::HashSet::new();
        let mut leaves = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(tensor) = stack.pop() {
            if !seen.insert(tensor.id()) {
                continue;
            }
            match tensor.kind() {
                TensorKind::Leaf(_) => leaves.push(tensor),
                TensorKind::Op(op) => stack.extend(op.inputs.iter().rev().cloned()),
            }
        }
        leaves
    }

    /// Whether `leaf` feeds this graph with gradient tracking on every path.
    ///
    /// Nodes built from a handle before [`Tensor::with_grad`] was applied to
    /// it still see the untracked leaf, so the id alone is not enough.
    pub fn tracks_leaf(&self, leaf: &Tensor) -> bool {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![self.clone()];
        let mut found = false;
        while let Some(tensor) = stack.pop() {
            if !seen.insert(Arc::as_ptr(&tensor.inner)) {
                continue;
            }
            match tensor.kind() {
                TensorKind::Leaf(data) => {
                    if tensor.id() == leaf.id() {
                        if !data.requires_grad {
                            return false;
                        }
                        found = true;
                    }
                }
                TensorKind::Op(op) => stack.extend(op.inputs.iter().cloned()),
            }
        }
        found
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id().0)
            .field("op", &self.op_name().unwrap_or("leaf"))
            .field("requires_grad", &self.requires_grad())
            .finish()
    }
}
