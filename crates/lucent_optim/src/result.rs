/// Outcome of a minimization. Non-convergence is reported here through
/// `success` and `status`, never as an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResult {
    pub x: Vec<f64>,
    pub fun: f64,
    pub jac: Vec<f64>,
    pub success: bool,
    /// 0 converged, 1 iteration limit, 2 line search failure.
    pub status: i32,
    pub message: String,
    pub nfev: usize,
    pub njev: usize,
    pub nit: usize,
}
