//! Hybrid pipeline: simulated annealing seeding the MILP optimizer.

use crate::annealing::{AnnealingConfig, SimulatedAnnealing};
use crate::error::Error;
use crate::milp::MilpOptimizer;
use crate::models::{Criterion, Instance, OptimizeResult, Optimizer};

/// Runs simulated annealing, then refines its solution with the MILP
/// optimizer using the heuristic routes as a warm start.
///
/// # Examples
///
/// ```no_run
/// use gvrp::hybrid::HybridOptimizer;
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
/// let result = HybridOptimizer::new(&instance, Criterion::Distance)
///     .optimize()
///     .unwrap();
/// assert_eq!(result.solution.customers_served(), 1);
/// ```
pub struct HybridOptimizer<'a> {
    instance: &'a Instance,
    criterion: Criterion,
    annealing_config: AnnealingConfig,
}

impl<'a> HybridOptimizer<'a> {
    /// Creates a hybrid optimizer with the default annealing schedule.
    pub fn new(instance: &'a Instance, criterion: Criterion) -> Self {
        Self {
            instance,
            criterion,
            annealing_config: AnnealingConfig::default(),
        }
    }

    /// Replaces the annealing schedule of the heuristic stage.
    pub fn with_annealing_config(mut self, config: AnnealingConfig) -> Self {
        self.annealing_config = config;
        self
    }
}

impl Optimizer for HybridOptimizer<'_> {
    fn optimize(&self) -> Result<OptimizeResult, Error> {
        let heuristic = SimulatedAnnealing::new(self.instance, self.criterion)
            .with_config(self.annealing_config.clone())
            .optimize()?;
        log::info!(
            "annealing stage finished with total distance {:.3}; refining with MILP",
            heuristic.metrics.total_distance
        );

        MilpOptimizer::new(self.instance, self.criterion)
            .with_warm_start(heuristic.solution)
            .optimize()
    }
}
