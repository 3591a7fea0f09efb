//! Exact optimizer over a binary-arc MILP formulation.
//!
//! Builds the full model (depot balance, visit-once, flow conservation, MTZ
//! subtour elimination, conservative range constraints), optionally pins a
//! heuristic warm start, and solves through the generic `good_lp` backend.
//! Non-optimal solver statuses degrade to whatever arcs can be extracted;
//! they never fail the call.

mod formulation;

use good_lp::{default_solver, SolverModel};

use crate::distance::DistanceMatrix;
use crate::error::Error;
use crate::evaluation::CostEvaluator;
use crate::models::{
    Criterion, Instance, OptimizeResult, Optimizer, Route, Solution, SolutionMetrics,
};

use formulation::{build_model, ArcMatrix};

/// Mixed-integer optimizer for the GVRP.
///
/// # Examples
///
/// ```no_run
/// use gvrp::milp::MilpOptimizer;
/// use gvrp::models::{
///     ChargingStation, Criterion, Customer, Depot, FuelKind, FuelStation, Instance, Optimizer,
///     Vehicle,
/// };
///
/// let instance = Instance::new(
///     vec![Depot::new(1, 0.0, 0.0)],
///     vec![Customer::new(1, 5.0, 5.0, 3)],
///     vec![Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100)],
///     vec![ChargingStation::new(1, 7.0, 7.0, "fast", 10.0)],
///     vec![FuelStation::new(1, 3.0, 3.0, "type1")],
/// );
/// let result = MilpOptimizer::new(&instance, Criterion::Distance)
///     .optimize()
///     .unwrap();
/// assert_eq!(result.solution.customers_served(), 1);
/// ```
pub struct MilpOptimizer<'a> {
    instance: &'a Instance,
    criterion: Criterion,
    warm_start: Option<Solution>,
}

impl<'a> MilpOptimizer<'a> {
    /// Creates an optimizer for the instance and criterion.
    pub fn new(instance: &'a Instance, criterion: Criterion) -> Self {
        Self {
            instance,
            criterion,
            warm_start: None,
        }
    }

    /// Pins an initial (heuristic) solution's arcs into the model.
    ///
    /// The pins are hard equality constraints, so the solver keeps the warm
    /// start's topology and optimizes what remains free.
    pub fn with_warm_start(mut self, solution: Solution) -> Self {
        self.warm_start = Some(solution);
        self
    }

    /// Walks the solved arc matrix into per-vehicle routes.
    ///
    /// Each vehicle's route starts at the depot it departs from and follows
    /// selected successor arcs; a route is kept only when it visits at least
    /// one customer, and is closed when the walk does not end at its start.
    fn extract_routes(&self, arcs: &ArcMatrix) -> Solution {
        let n = self.instance.num_locations();
        let num_vehicles = self.instance.vehicles().len();
        let mut routes = Vec::with_capacity(num_vehicles);

        for k in 0..num_vehicles {
            let start = self
                .instance
                .depot_indices()
                .find(|&d| (0..n).any(|j| arcs.get(d, j, k)));
            let Some(start) = start else {
                routes.push(Route::empty());
                continue;
            };

            let mut indices = vec![start];
            let mut used = vec![false; n * n];
            let mut current = start;
            loop {
                let next = (0..n).find(|&j| arcs.get(current, j, k) && !used[current * n + j]);
                let Some(next) = next else { break };
                used[current * n + next] = true;
                indices.push(next);
                current = next;
                if current == start {
                    break;
                }
            }

            let visits_customer = indices
                .iter()
                .any(|&i| self.instance.customer_indices().contains(&i));
            if !visits_customer {
                routes.push(Route::empty());
                continue;
            }

            let mut route = Route::new(
                indices
                    .iter()
                    .map(|&i| self.instance.locations()[i].clone())
                    .collect(),
            );
            route.close();
            routes.push(route);
        }

        Solution::new(routes)
    }
}

impl Optimizer for MilpOptimizer<'_> {
    fn optimize(&self) -> Result<OptimizeResult, Error> {
        self.instance.check_station_coverage()?;

        if self.instance.vehicles().is_empty() || self.instance.depots().is_empty() {
            log::warn!("degenerate instance: no vehicles or no depots; returning empty solution");
            return Ok(OptimizeResult {
                solution: Solution::unused(self.instance.vehicles().len()),
                metrics: SolutionMetrics::default(),
            });
        }

        let distances = DistanceMatrix::from_locations(self.instance.locations());
        let model = build_model(
            self.instance,
            &distances,
            self.criterion,
            self.warm_start.as_ref(),
        )?;

        log::info!(
            "solving MILP with {} locations and {} vehicles, criterion {}",
            self.instance.num_locations(),
            self.instance.vehicles().len(),
            self.criterion
        );
        let mut solver = model.variables.minimise(model.objective).using(default_solver);
        for constraint in model.constraints {
            solver = solver.with(constraint);
        }

        let arcs = match solver.solve() {
            Ok(solved) => model.arcs.selected(&solved),
            Err(err) => {
                log::warn!("MILP solver did not find an optimal solution: {err}");
                model.arcs.empty_matrix()
            }
        };

        let solution = self.extract_routes(&arcs);
        let evaluator = CostEvaluator::new(self.instance.vehicles());
        let metrics = evaluator.metrics(&solution);
        Ok(OptimizeResult { solution, metrics })
    }
}
