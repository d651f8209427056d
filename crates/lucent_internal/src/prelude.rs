pub use crate::core::{
    complex::Complex128,
    dense::{DenseArray, EinsumSpec, SliceArg, TensordotAxes},
    dtype::*,
    error::{Error, Result},
    scalar::Scalar,
};
pub use crate::optim::{optimize, Bound, OptimizeOptions, OptimizeResult};
pub use crate::tensor::{einsum, fit_bias, fit_gain, remove_mean, sserror, Dft2, SsError, Tensor};
