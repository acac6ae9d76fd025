use anyhow::Result;
use log::debug;

use crate::cost::{compute_chi, ChiParams};
use crate::decomposition::{Adjacency, Decomposition};

use super::recursion::dft_recursion;

/// Per-cell χ before and after a run, both sorted descending by cost with
/// ties broken ascending by cell id.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizerRun {
    pub original_costs: Vec<(usize, f64)>,
    pub final_costs: Vec<(usize, f64)>,
}

impl OptimizerRun {
    /// The maximum χ before the run.
    pub fn original_max(&self) -> Option<f64> {
        self.original_costs.first().map(|&(_, cost)| cost)
    }

    /// The maximum χ after the run.
    pub fn final_max(&self) -> Option<f64> {
        self.final_costs.first().map(|&(_, cost)| cost)
    }
}

/// Iterative pairwise re-optimizer for a coverage decomposition.
///
/// Each iteration picks the most expensive cell and runs the depth-first
/// improvement pass from it. Termination is purely by iteration count; an
/// iteration that finds no cut is not an error and does not stop the loop.
pub struct ChiOptimizer {
    num_iterations: usize,
    num_samples: usize,
    params: ChiParams,
}

impl Default for ChiOptimizer {
    fn default() -> Self {
        Self { num_iterations: 10, num_samples: 50, params: ChiParams::default() }
    }
}

impl ChiOptimizer {
    pub fn new(num_iterations: usize, num_samples: usize, params: ChiParams) -> Self {
        Self { num_iterations, num_samples, params }
    }

    /// Re-optimize the decomposition in place.
    ///
    /// Fails only on an invalid input decomposition; at worst the
    /// decomposition comes back unchanged with identical cost vectors.
    pub fn run_iterations(&self, decomposition: &mut Decomposition) -> Result<OptimizerRun> {
        decomposition.validate()?;

        let original_costs = self.cost_vector(decomposition);

        for iteration in 0..self.num_iterations {
            let costs = self.cost_vector(decomposition);
            debug!(
                "iteration {}/{}: costs {:?}",
                iteration + 1,
                self.num_iterations,
                costs
            );

            let mut adjacency = Adjacency::build(decomposition);
            let worst = costs[0].0;
            if !dft_recursion(
                decomposition,
                &mut adjacency,
                worst,
                0,
                self.num_samples,
                &self.params,
            ) {
                debug!(
                    "iteration {}/{}: no cut was made",
                    iteration + 1,
                    self.num_iterations
                );
            }
        }

        let final_costs = self.cost_vector(decomposition);
        Ok(OptimizerRun { original_costs, final_costs })
    }

    fn cost_vector(&self, decomposition: &Decomposition) -> Vec<(usize, f64)> {
        let mut costs = decomposition
            .items()
            .map(|(id, polygon, site)| (id, compute_chi(polygon, site, &self.params)))
            .collect::<Vec<_>>();
        costs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        costs
    }
}
