//! Cutting-plane (OCAS) driver
//!
//! Minimizes `0.5*||w||^2 + C * sum_i max(0, 1 - output_i)` where
//! `output_i` is the signed score of example i under the weight vector. The
//! non-smooth risk term is approximated from below by a growing bundle of
//! linear cuts; each iteration scores all examples, turns the violated set
//! into a new cut, re-solves the reduced dual over the bundle, rebuilds the
//! weight vector and line-searches back towards the previous iterate so the
//! objective decreases monotonically.
//!
//! The driver touches the training data only through the
//! [`CuttingPlaneProblem`] contract.

use log::{debug, info, warn};

use crate::core::{CuttingPlaneProblem, OptimizationResult, Result, TrainConfig, WdSvmError};
use crate::solver::qp::{GramMatrix, QpSolver};
use crate::utils::sort;

/// Cutting-plane solver over an abstract problem
pub struct OcasSolver {
    config: TrainConfig,
    qp: QpSolver,
}

impl OcasSolver {
    /// Create a solver with the given training configuration
    pub fn new(config: TrainConfig) -> Self {
        Self {
            config,
            qp: QpSolver::default(),
        }
    }

    /// Run the cutting-plane loop until the primal-dual gap falls below the
    /// tolerance, no example is violated, or the iteration cap is reached.
    ///
    /// Exhausting the cut buffer before convergence is an error and
    /// propagates to the caller.
    pub fn solve<P: CuttingPlaneProblem>(&self, problem: &mut P) -> Result<OptimizationResult> {
        let n = problem.num_examples();
        if n == 0 {
            return Err(WdSvmError::EmptyDataset);
        }
        let c = self.config.c;

        info!(
            "C={}, epsilon={}, max_iterations={}",
            c, self.config.epsilon, self.config.max_iterations
        );

        // w starts at the origin, so every signed score is zero
        let mut output = vec![0.0; n];
        let mut new_output = vec![0.0; n];
        let mut sq_norm_w = 0.0;

        let mut h = GramMatrix::new();
        let mut offsets: Vec<f64> = Vec::new();
        let mut alpha: Vec<f64> = Vec::new();
        let mut dual_objective = 0.0;

        let mut primal = primal_objective(sq_norm_w, &output, c);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            let gap = primal - dual_objective;
            if iterations > 0 && gap <= self.config.epsilon * primal.abs().max(1.0) {
                converged = true;
                break;
            }

            let violators: Vec<usize> = (0..n).filter(|&i| output[i] < 1.0).collect();
            if violators.is_empty() {
                // Current iterate already satisfies every margin
                converged = true;
                break;
            }

            let column = problem.add_cut(&violators)?;
            h.push_column(column)?;
            offsets.push(violators.len() as f64);
            alpha.push(0.0);

            dual_objective = self.qp.solve(&h, &offsets, c, &mut alpha)?;

            let update = problem.aggregate_cuts(&alpha)?;
            problem.compute_output(&mut new_output)?;

            let t = exact_line_search(
                sq_norm_w,
                update.dot_with_previous,
                update.sq_norm,
                &output,
                &new_output,
                c,
            );
            sq_norm_w = problem.line_search_step(t);
            for (o, &o_new) in output.iter_mut().zip(new_output.iter()) {
                *o = *o * (1.0 - t) + t * o_new;
            }

            primal = primal_objective(sq_norm_w, &output, c);
            iterations += 1;

            debug!(
                "iter {iterations}: {} violated, t={t:.4}, primal={primal:.6}, dual={dual_objective:.6}",
                violators.len()
            );
        }

        if !converged {
            warn!(
                "cutting-plane solver stopped at the iteration cap ({}) with gap {:.6}",
                self.config.max_iterations,
                primal - dual_objective
            );
        }

        Ok(OptimizationResult {
            iterations,
            num_cuts: problem.num_cuts(),
            primal_objective: primal,
            dual_objective,
            converged,
        })
    }
}

fn primal_objective(sq_norm_w: f64, output: &[f64], c: f64) -> f64 {
    let risk: f64 = output.iter().map(|&o| (1.0 - o).max(0.0)).sum();
    0.5 * sq_norm_w + c * risk
}

/// Exact minimizer of `t -> P((1-t)*w_old + t*w_new)` over [0, 1].
///
/// The quadratic part is determined by the three inner products of the two
/// iterates; the hinge part is piecewise linear in t with one breakpoint per
/// example whose margin state flips. The derivative is nondecreasing, so the
/// minimizer is the first point where it turns nonnegative. Breakpoints are
/// ordered with the deterministic tie-break sort.
fn exact_line_search(
    s00: f64,
    s01: f64,
    s11: f64,
    out_old: &[f64],
    out_new: &[f64],
    c: f64,
) -> f64 {
    debug_assert_eq!(out_old.len(), out_new.len());

    // 0.5*||(1-t)w_old + t*w_new||^2 differentiates to a*t + b
    let a = (s00 - 2.0 * s01 + s11).max(0.0);
    let b = s01 - s00;

    // Hinge residual of example i along the segment: r0_i + t*d_i
    let mut slope = 0.0;
    let mut break_ts: Vec<f64> = Vec::new();
    let mut break_ids: Vec<u32> = Vec::new();
    let mut deltas: Vec<f64> = Vec::with_capacity(out_old.len());

    for i in 0..out_old.len() {
        let d = out_old[i] - out_new[i];
        let r0 = 1.0 - out_old[i];
        deltas.push(d);

        let active_at_origin = r0 > 0.0 || (r0 == 0.0 && d > 0.0);
        if active_at_origin {
            slope += d;
        }
        if d != 0.0 {
            let tb = -r0 / d;
            if tb > 0.0 && tb < 1.0 {
                break_ts.push(tb);
                break_ids.push(i as u32);
            }
        }
    }

    sort::sort_with_indices(&mut break_ts, &mut break_ids);

    let mut prev_t = 0.0;
    for (pos, &tb) in break_ts.iter().chain(std::iter::once(&1.0)).enumerate() {
        let start_deriv = a * prev_t + b + c * slope;
        if start_deriv >= 0.0 {
            return prev_t;
        }
        let end_deriv = a * tb + b + c * slope;
        if end_deriv >= 0.0 {
            // The derivative crosses zero inside this segment, so a > 0
            return (-(b + c * slope) / a).clamp(prev_t, tb);
        }

        if pos < break_ids.len() {
            // Margin state of this example flips: it either becomes active
            // (d > 0) or stops being active (d < 0); both raise the slope
            let d = deltas[break_ids[pos] as usize];
            slope += d.abs();
        }
        prev_t = tb;
    }

    1.0
}
