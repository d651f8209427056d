use lucent_core::{
    dense::DenseArray,
    error::{Error, Result},
};
use std::sync::Mutex;

/// A differentiable operation.
///
/// `forward` receives the realized values of the node's inputs. When
/// `track` is set it must also return whatever `backward` needs later; the
/// node keeps that cache until the next forward run replaces it.
///
/// `arity` is the number of inputs `forward` indexes; a node built with a
/// different number of inputs fails at its first evaluation.
///
/// `backward` maps the gradient of the node's output to one gradient per
/// input, each already reduced to that input's shape. Entries whose
/// `needs_grad` flag is false may be `None`.
pub trait Function: Send + Sync + 'static {
    type Cache: Send + 'static;

    fn name(&self) -> &'static str;

    fn arity(&self) -> usize;

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<(DenseArray, Option<Self::Cache>)>;

    fn backward(&self, cache: &Self::Cache, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>>;
}

// object-safe view of a `Function` together with its cache slot
pub(crate) trait Node: Send + Sync {
    fn name(&self) -> &'static str;
    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<DenseArray>;
    fn backward(&self, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>>;
}

pub(crate) struct FunctionNode<F: Function> {
    function: F,
    cache: Mutex<Option<F::Cache>>,
}

impl<F: Function> FunctionNode<F> {
    pub(crate) fn new(function: F) -> Self {
        Self {
            function,
            cache: Mutex::new(None),
        }
    }
}

impl<F: Function> Node for FunctionNode<F> {
    fn name(&self) -> &'static str {
        self.function.name()
    }

    fn forward(&self, inputs: &[DenseArray], track: bool) -> Result<DenseArray> {
        if inputs.len() != self.function.arity() {
            return Err(Error::InvalidArgument(format!(
                "{} takes {} inputs, got {}",
                self.function.name(),
                self.function.arity(),
                inputs.len()
            )));
        }
        let (output, cache) = self.function.forward(inputs, track)?;
        *self.cache.lock().map_err(|_| Error::BufferLocked)? = cache;
        Ok(output)
    }

    fn backward(&self, grad: &DenseArray, needs_grad: &[bool]) -> Result<Vec<Option<DenseArray>>> {
        let guard = self.cache.lock().map_err(|_| Error::BufferLocked)?;
        let cache = guard.as_ref().ok_or_else(|| Error::Internal {
            message: format!("{}: backward called without a cached forward", self.function.name()),
        })?;
        self.function.backward(cache, grad, needs_grad)
    }
}
