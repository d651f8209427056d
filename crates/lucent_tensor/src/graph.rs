use crate::{Tensor, TensorKind};
use lucent_core::{
    dense::DenseArray,
    error::{Error, Result},
};
use std::sync::atomic::{AtomicU64, Ordering};

static EPOCH: AtomicU64 = AtomicU64::new(1);

/// Starts a new evaluation pass. Node outputs cached under an older epoch
/// are treated as stale.
pub(crate) fn next_epoch() -> u64 {
    EPOCH.fetch_add(1, Ordering::Relaxed) + 1
}

impl Tensor {
    /// Evaluates the graph below this tensor against the current leaf values.
    ///
    /// Every call is a new pass: each operation node runs its forward at most
    /// once per pass no matter how many consumers it has.
    pub fn data(&self) -> Result<DenseArray> {
        self.realize(next_epoch())
    }

    pub(crate) fn realize(&self, epoch: u64) -> Result<DenseArray> {
        match self.kind() {
            TensorKind::Leaf(leaf) => Ok(leaf.data.read().map_err(|_| Error::BufferLocked)?.clone()),
            TensorKind::Op(op) => {
                {
                    let state = op.state.lock().map_err(|_| Error::BufferLocked)?;
                    if state.epoch == epoch {
                        if let Some(output) = &state.output {
                            return Ok(output.clone());
                        }
                    }
                }

                let inputs = op
                    .inputs
                    .iter()
                    .map(|input| input.realize(epoch))
                    .collect::<Result<Vec<_>>>()?;
                let output = op.node.forward(&inputs, op.requires_grad)?;
                log::trace!(
                    "forward {} #{} -> {:?} (epoch {})",
                    op.node.name(),
                    self.id().0,
                    output.shape(),
                    epoch
                );

                let mut state = op.state.lock().map_err(|_| Error::BufferLocked)?;
                state.epoch = epoch;
                state.output = Some(output.clone());
                state.forward_count += 1;
                Ok(output)
            }
        }
    }
}
