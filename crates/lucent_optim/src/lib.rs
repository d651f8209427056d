pub mod blueprint;
pub mod lbfgsb;
pub mod options;
pub mod result;

pub use blueprint::{Blueprint, ParamTable};
pub use lbfgsb::{Objective, Status};
pub use options::{Bound, OptimizeOptions};
pub use result::OptimizeResult;

use lucent_core::error::{Error, Result};
use lucent_tensor::Tensor;

/// Minimizes the scalar `cost` over `params`.
///
/// Parameters must be real leaves with gradient tracking. On return they hold
/// the final solution, whether or not the solver converged; check
/// [`OptimizeResult::success`].
pub fn optimize(cost: &Tensor, params: &[Tensor], options: &OptimizeOptions) -> Result<OptimizeResult> {
    let shape = cost.shape()?;
    if shape.iter().product::<usize>() != 1 {
        return Err(Error::NonScalarCost { shape });
    }

    let mut blueprint = Blueprint::new(cost, params, options.analytic_grad)?;
    if let Some(bounds) = &options.bounds {
        blueprint = blueprint.with_bounds(bounds);
    }
    let x0 = blueprint.table().gather()?;
    log::info!(
        "optimizing {} values over {} parameters ({} gradient)",
        x0.len(),
        params.len(),
        if options.analytic_grad { "analytic" } else { "finite difference" }
    );

    let solution = lbfgsb::minimize(&mut blueprint, &x0, options.bounds.as_deref(), options)?;
    blueprint.table().scatter(&solution.x)?;

    let nfev = solution.nfev + blueprint.extra_evaluations();
    let result = OptimizeResult {
        success: solution.status.is_converged(),
        status: solution.status.code(),
        message: solution.status.message().to_string(),
        x: solution.x,
        fun: solution.fun,
        jac: solution.jac,
        nfev,
        njev: solution.njev,
        nit: solution.nit,
    };

    if result.success {
        log::info!("{} after {} iterations, f = {:e}", result.message, result.nit, result.fun);
    } else {
        log::warn!("optimization did not converge: {} (f = {:e})", result.message, result.fun);
    }
    Ok(result)
}
