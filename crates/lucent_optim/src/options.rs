/// Box constraint on one flattened parameter element. `None` leaves that
/// side open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bound {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn lower(&self) -> f64 {
        self.lower.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn upper(&self) -> f64 {
        self.upper.unwrap_or(f64::INFINITY)
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.lower()).min(self.upper())
    }
}

impl From<(f64, f64)> for Bound {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(Some(lower), Some(upper))
    }
}

/// Settings for [`crate::optimize`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeOptions {
    /// Stop when the relative reduction of the cost falls to this value.
    pub ftol: f64,
    /// Stop when the largest projected gradient component falls to this value.
    pub gtol: f64,
    pub maxiter: usize,
    /// Number of correction pairs kept for the inverse Hessian estimate.
    pub history: usize,
    /// Step halvings allowed per line search.
    pub max_linesearch: usize,
    /// Backward pass when set, forward differences otherwise.
    pub analytic_grad: bool,
    /// One bound per flattened parameter element.
    pub bounds: Option<Vec<Bound>>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            ftol: 1e-9,
            gtol: 1e-5,
            maxiter: 1000,
            history: 10,
            max_linesearch: 20,
            analytic_grad: true,
            bounds: None,
        }
    }
}

impl OptimizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ftol(mut self, ftol: f64) -> Self {
        self.ftol = ftol;
        self
    }

    pub fn with_gtol(mut self, gtol: f64) -> Self {
        self.gtol = gtol;
        self
    }

    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history;
        self
    }

    pub fn with_max_linesearch(mut self, max_linesearch: usize) -> Self {
        self.max_linesearch = max_linesearch;
        self
    }

    pub fn with_analytic_grad(mut self, analytic_grad: bool) -> Self {
        self.analytic_grad = analytic_grad;
        self
    }

    pub fn with_bounds(mut self, bounds: Vec<Bound>) -> Self {
        self.bounds = Some(bounds);
        self
    }
}
