pub mod prelude;

pub use lucent_core as core;
pub use lucent_optim as optim;
pub use lucent_tensor as tensor;

pub use lucent_core::dtype::{complex128, float64};
