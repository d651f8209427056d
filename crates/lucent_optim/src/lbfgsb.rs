//! Projected limited-memory BFGS for box-constrained problems.
//!
//! Each iteration fixes the variables sitting on an active bound, builds a
//! quasi-Newton direction over the remaining ones with the two-loop
//! recursion and backtracks along the projected path until the Armijo
//! condition holds.
use crate::options::{Bound, OptimizeOptions};
use lucent_core::error::{Error, Result};
use std::collections::VecDeque;

const ARMIJO: f64 = 1e-4;

/// Function and gradient over a flat vector.
pub trait Objective {
    fn value(&mut self, x: &[f64]) -> Result<f64>;
    fn gradient(&mut self, x: &[f64]) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    ProjectedGradient,
    RelativeReduction,
    MaxIter,
    LineSearch,
}

impl Status {
    pub fn code(&self) -> i32 {
        match self {
            Self::ProjectedGradient | Self::RelativeReduction => 0,
            Self::MaxIter => 1,
            Self::LineSearch => 2,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.code() == 0
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ProjectedGradient => "CONVERGENCE: NORM_OF_PROJECTED_GRADIENT_<=_PGTOL",
            Self::RelativeReduction => "CONVERGENCE: REL_REDUCTION_OF_F_<=_FACTR*EPSMCH",
            Self::MaxIter => "STOP: TOTAL NO. of ITERATIONS REACHED LIMIT",
            Self::LineSearch => "ABNORMAL_TERMINATION_IN_LNSRCH",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub x: Vec<f64>,
    pub fun: f64,
    pub jac: Vec<f64>,
    pub status: Status,
    pub nfev: usize,
    pub njev: usize,
    pub nit: usize,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm_inf(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |m, x| m.max(x.abs()))
}

fn project(x: &mut [f64], bounds: &[Bound]) {
    for (xi, b) in x.iter_mut().zip(bounds) {
        *xi = b.clamp(*xi);
    }
}

fn projected_gradient(x: &[f64], g: &[f64], bounds: &[Bound]) -> Vec<f64> {
    x.iter()
        .zip(g)
        .zip(bounds)
        .map(|((&xi, &gi), b)| b.clamp(xi - gi) - xi)
        .collect()
}

// a variable is fixed when it sits on a bound and the gradient pushes outward
fn free_mask(x: &[f64], g: &[f64], bounds: &[Bound]) -> Vec<bool> {
    x.iter()
        .zip(g)
        .zip(bounds)
        .map(|((&xi, &gi), b)| !((xi <= b.lower() && gi > 0.0) || (xi >= b.upper() && gi < 0.0)))
        .collect()
}

struct Memory {
    pairs: VecDeque<(Vec<f64>, Vec<f64>)>,
    capacity: usize,
}

impl Memory {
    fn new(capacity: usize) -> Self {
        Self {
            pairs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn clear(&mut self) {
        self.pairs.clear();
    }

    fn push(&mut self, s: Vec<f64>, y: Vec<f64>) {
        if self.capacity == 0 {
            return;
        }
        if self.pairs.len() == self.capacity {
            self.pairs.pop_front();
        }
        self.pairs.push_back((s, y));
    }

    // -H·g over the free variables, zero elsewhere
    fn direction(&self, g: &[f64], free: &[bool]) -> Vec<f64> {
        let restrict = |v: &[f64]| -> Vec<f64> { v.iter().zip(free).map(|(&x, &f)| if f { x } else { 0.0 }).collect() };

        let mut q = restrict(g);
        let mut alphas = Vec::with_capacity(self.pairs.len());
        let mut gamma = 1.0;
        let mut restricted = Vec::with_capacity(self.pairs.len());

        for (s, y) in self.pairs.iter() {
            let (s, y) = (restrict(s), restrict(y));
            let sy = dot(&s, &y);
            restricted.push((s, y, sy));
        }

        for (s, y, sy) in restricted.iter().rev() {
            if *sy <= 0.0 {
                alphas.push(0.0);
                continue;
            }
            let a = dot(s, &q) / sy;
            for (qi, yi) in q.iter_mut().zip(y) {
                *qi -= a * yi;
            }
            alphas.push(a);
        }

        if let Some((_, y, sy)) = restricted.iter().rev().find(|(_, _, sy)| *sy > 0.0) {
            let yy = dot(y, y);
            if yy > 0.0 {
                gamma = sy / yy;
            }
        }
        for qi in q.iter_mut() {
            *qi *= gamma;
        }

        for ((s, y, sy), a) in restricted.iter().zip(alphas.iter().rev()) {
            if *sy <= 0.0 {
                continue;
            }
            let b = dot(y, &q) / sy;
            for (qi, si) in q.iter_mut().zip(s) {
                *qi += si * (a - b);
            }
        }

        q.iter().map(|v| -v).collect()
    }
}

/// Minimizes `objective` from `x0` inside `bounds` (unbounded when `None`).
pub fn minimize<O: Objective>(objective: &mut O, x0: &[f64], bounds: Option<&[Bound]>, options: &OptimizeOptions) -> Result<Solution> {
    let n = x0.len();
    let bounds: Vec<Bound> = match bounds {
        Some(b) if b.len() != n => {
            return Err(Error::InvalidArgument(format!("expected {} bounds, got {}", n, b.len())));
        }
        Some(b) => b.to_vec(),
        None => vec![Bound::unbounded(); n],
    };
    for (i, b) in bounds.iter().enumerate() {
        if b.lower() > b.upper() {
            return Err(Error::InvalidArgument(format!(
                "bound {} has lower {} above upper {}",
                i,
                b.lower(),
                b.upper()
            )));
        }
    }

    let mut x = x0.to_vec();
    project(&mut x, &bounds);

    let mut f = objective.value(&x)?;
    let mut g = objective.gradient(&x)?;
    let (mut nfev, mut njev, mut nit) = (1, 1, 0);
    let mut memory = Memory::new(options.history);

    let status = loop {
        let pg = projected_gradient(&x, &g, &bounds);
        if norm_inf(&pg) <= options.gtol {
            break Status::ProjectedGradient;
        }
        if nit >= options.maxiter {
            break Status::MaxIter;
        }

        let free = free_mask(&x, &g, &bounds);
        let mut d = memory.direction(&g, &free);
        if dot(&d, &g) >= 0.0 {
            log::debug!("quasi-Newton direction is not a descent direction, resetting memory");
            memory.clear();
            d = memory.direction(&g, &free);
        }

        let mut step = if memory.is_empty() {
            (1.0 / norm_inf(&g)).min(1.0)
        } else {
            1.0
        };

        let mut accepted = None;
        for trial in 0..=options.max_linesearch {
            let mut candidate: Vec<f64> = x.iter().zip(&d).map(|(xi, di)| xi + step * di).collect();
            project(&mut candidate, &bounds);
            let moved: Vec<f64> = candidate.iter().zip(&x).map(|(c, xi)| c - xi).collect();
            let decrease = dot(&g, &moved);

            let fc = objective.value(&candidate)?;
            nfev += 1;
            if fc.is_finite() && fc <= f + ARMIJO * decrease {
                accepted = Some((candidate, fc, moved));
                break;
            }
            log::debug!("line search trial {}: step {:e} rejected (f = {:e})", trial, step, fc);
            step *= 0.5;
        }

        let Some((x_new, f_new, s)) = accepted else {
            if memory.is_empty() {
                break Status::LineSearch;
            }
            log::debug!("line search failed, retrying along the steepest descent");
            memory.clear();
            continue;
        };

        let g_new = objective.gradient(&x_new)?;
        njev += 1;
        nit += 1;

        let y: Vec<f64> = g_new.iter().zip(&g).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);
        if sy > f64::EPSILON * dot(&y, &y) {
            memory.push(s, y);
        }

        let reduction = (f - f_new) / f.abs().max(f_new.abs()).max(1.0);
        log::trace!("iteration {}: f = {:e}, step = {:e}, |pg| = {:e}", nit, f_new, step, norm_inf(&pg));

        x = x_new;
        f = f_new;
        g = g_new;

        if reduction <= options.ftol {
            break Status::RelativeReduction;
        }
    };

    Ok(Solution {
        x,
        fun: f,
        jac: g,
        status,
        nfev,
        njev,
        nit,
    })
}
