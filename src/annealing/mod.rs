//! Simulated annealing optimizer.
//!
//! Builds a randomized customer-to-vehicle assignment, then improves it by
//! single-customer relocation under the Metropolis acceptance rule, cooling
//! geometrically until the temperature threshold (or the iteration safety
//! cap) is reached. The best solution seen is closed and passed through the
//! refueling repair before metrics are computed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::evaluation::CostEvaluator;
use crate::models::{
    Criterion, Instance, Location, OptimizeResult, Optimizer, Route, Solution, SolutionMetrics,
};
use crate::repair::insert_refuel_stops;

/// Cooling schedule and termination parameters.
///
/// Termination is primarily temperature-based; the iteration cap only bounds
/// the worst case deterministically.
///
/// # Examples
///
/// ```
/// use gvrp::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_cooling_rate(0.01)
///     .with_seed(42);
/// assert_eq!(config.initial_temperature(), 100.0);
/// assert_eq!(config.cooling_rate(), 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    initial_temperature: f64,
    min_temperature: f64,
    cooling_rate: f64,
    max_iterations: usize,
    seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1.0,
            cooling_rate: 0.003,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the temperature below which the search stops.
    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Sets the geometric cooling rate (temperature shrinks by this fraction
    /// each iteration).
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the iteration safety cap.
    pub fn with_max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = cap;
        self
    }

    /// Seeds the RNG for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Starting temperature.
    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Stop temperature.
    pub fn min_temperature(&self) -> f64 {
        self.min_temperature
    }

    /// Geometric cooling rate.
    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    /// Iteration safety cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// RNG seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Simulated annealing over customer-to-vehicle assignments.
///
/// # Examples
///
/// ```
/// use gvrp::annealing::{AnnealingConfig, SimulatedAnnealing};
/// use gvrp::models::{
///     ChargingStation, Criterion, Customer, Depot, FuelKind, FuelStation, Instance, Optimizer,
///     PortType, Vehicle,
/// };
///
/// let instance = Instance::new(
///     vec![Depot::new(1, 0.0, 0.0), Depot::new(2, 10.0, 10.0)],
///     vec![Customer::new(1, 5.0, 5.0, 3), Customer::new(2, 15.0, 15.0, 5)],
///     vec![
///         Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Fast),
///         Vehicle::new(2, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
///     ],
///     vec![ChargingStation::new(1, 7.0, 7.0, "fast", 10.0)],
///     vec![FuelStation::new(1, 3.0, 3.0, "type1")],
/// );
///
/// let optimizer = SimulatedAnnealing::new(&instance, Criterion::Distance)
///     .with_config(AnnealingConfig::default().with_seed(42));
/// let result = optimizer.optimize().unwrap();
/// assert_eq!(result.solution.customers_served(), 2);
/// ```
pub struct SimulatedAnnealing<'a> {
    instance: &'a Instance,
    criterion: Criterion,
    config: AnnealingConfig,
}

impl<'a> SimulatedAnnealing<'a> {
    /// Creates an optimizer with the default cooling schedule.
    pub fn new(instance: &'a Instance, criterion: Criterion) -> Self {
        Self {
            instance,
            criterion,
            config: AnnealingConfig::default(),
        }
    }

    /// Replaces the cooling schedule.
    pub fn with_config(mut self, config: AnnealingConfig) -> Self {
        self.config = config;
        self
    }

    /// Metropolis acceptance probability.
    ///
    /// Exactly 1.0 for any improving move; `exp((old - new) / t)` otherwise.
    pub fn acceptance_probability(old_cost: f64, new_cost: f64, temperature: f64) -> f64 {
        if new_cost < old_cost {
            1.0
        } else {
            ((old_cost - new_cost) / temperature).exp()
        }
    }

    /// Randomized initial assignment: depots round-robin over a shuffled
    /// order, every customer appended to a random vehicle's route before the
    /// trailing depot. Feasibility is deferred to the repair pass.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Solution {
        let depots = self.instance.depots();
        let vehicles = self.instance.vehicles();

        let mut depot_order: Vec<usize> = (0..depots.len()).collect();
        depot_order.shuffle(rng);

        let mut routes = Vec::with_capacity(vehicles.len());
        for i in 0..vehicles.len() {
            let depot = Location::from(depots[depot_order[i % depot_order.len()]].clone());
            routes.push(Route::new(vec![depot.clone(), depot]));
        }
        let mut solution = Solution::new(routes);

        for customer in self.instance.customers() {
            let v = rng.random_range(0..vehicles.len());
            let route = &mut solution.routes_mut()[v];
            let before_end = route.len() - 1;
            route.insert(before_end, Location::from(customer.clone()));
        }
        solution
    }

    /// Relocation neighborhood: move one random interior customer from one
    /// route to the tail of another (possibly the same) route. Routes with
    /// fewer than two interior stops are left alone.
    fn perturb<R: Rng>(&self, solution: &Solution, rng: &mut R) -> Solution {
        let mut next = solution.clone();
        let num_routes = next.num_routes();
        if num_routes == 0 {
            return next;
        }

        let from = rng.random_range(0..num_routes);
        if next.routes()[from].len() <= 3 {
            return next;
        }
        let interior = rng.random_range(1..next.routes()[from].len() - 1);
        let customer = next.routes_mut()[from].remove(interior);

        let to = rng.random_range(0..num_routes);
        let before_end = next.routes()[to].len() - 1;
        next.routes_mut()[to].insert(before_end, customer);
        next
    }

    fn run<R: Rng>(&self, rng: &mut R) -> Result<OptimizeResult, Error> {
        let vehicles = self.instance.vehicles();
        let evaluator = CostEvaluator::new(vehicles);

        let mut current = self.initial_solution(rng);
        let mut current_cost = evaluator.cost(&current, self.criterion);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = self.config.initial_temperature;
        let mut iterations = 0;

        while temperature > self.config.min_temperature && iterations < self.config.max_iterations {
            let candidate = self.perturb(&current, rng);
            let candidate_cost = evaluator.cost(&candidate, self.criterion);

            if candidate_cost < current_cost
                || rng.random::<f64>()
                    < Self::acceptance_probability(current_cost, candidate_cost, temperature)
            {
                current = candidate;
                current_cost = candidate_cost;
            }
            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
            }

            temperature *= 1.0 - self.config.cooling_rate;
            iterations += 1;
        }
        log::info!(
            "annealing finished after {iterations} iterations at temperature {temperature:.3}, best {} cost {best_cost:.3}",
            self.criterion
        );

        let mut repaired = Vec::with_capacity(best.num_routes());
        for (route, vehicle) in best.routes_mut().iter_mut().zip(vehicles) {
            route.close();
            repaired.push(insert_refuel_stops(route, vehicle, self.instance)?);
        }
        let solution = Solution::new(repaired);
        let metrics = evaluator.metrics(&solution);
        Ok(OptimizeResult { solution, metrics })
    }
}

impl Optimizer for SimulatedAnnealing<'_> {
    fn optimize(&self) -> Result<OptimizeResult, Error> {
        self.instance.check_station_coverage()?;

        let vehicles = self.instance.vehicles();
        if vehicles.is_empty() || self.instance.depots().is_empty() {
            log::warn!("degenerate instance: no vehicles or no depots; returning empty solution");
            return Ok(OptimizeResult {
                solution: Solution::unused(vehicles.len()),
                metrics: SolutionMetrics::default(),
            });
        }

        match self.config.seed {
            Some(seed) => self.run(&mut StdRng::seed_from_u64(seed)),
            None => self.run(&mut StdRng::from_os_rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, Customer, Depot, FuelKind, FuelStation, PortType, Vehicle};
    use proptest::prelude::*;

    fn sample_instance() -> Instance {
        Instance::new(
            vec![Depot::new(1, 0.0, 0.0), Depot::new(2, 10.0, 10.0)],
            vec![Customer::new(1, 5.0, 5.0, 3), Customer::new(2, 15.0, 15.0, 5)],
            vec![
                Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Fast),
                Vehicle::new(2, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
            ],
            vec![ChargingStation::new(1, 7.0, 7.0, "fast", 10.0)],
            vec![FuelStation::new(1, 3.0, 3.0, "type1")],
        )
    }

    fn customer_ids(solution: &Solution) -> Vec<u32> {
        let mut ids: Vec<u32> = solution
            .routes()
            .iter()
            .flat_map(|r| r.customer_ids())
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_initial_solution_covers_all_customers() {
        let instance = sample_instance();
        let sa = SimulatedAnnealing::new(&instance, Criterion::Distance);
        let mut rng = StdRng::seed_from_u64(42);
        let solution = sa.initial_solution(&mut rng);

        assert_eq!(solution.num_routes(), 2);
        assert_eq!(customer_ids(&solution), vec![1, 2]);
        for route in solution.routes() {
            assert!(route.is_closed());
            assert!(route.first().expect("non-empty").is_depot());
        }
    }

    #[test]
    fn test_perturb_preserves_customers() {
        let instance = sample_instance();
        let sa = SimulatedAnnealing::new(&instance, Criterion::Distance);
        let mut rng = StdRng::seed_from_u64(7);
        let solution = sa.initial_solution(&mut rng);
        for _ in 0..50 {
            let perturbed = sa.perturb(&solution, &mut rng);
            assert_eq!(customer_ids(&perturbed), vec![1, 2]);
        }
    }

    #[test]
    fn test_acceptance_probability_improving_is_one() {
        assert_eq!(SimulatedAnnealing::acceptance_probability(10.0, 5.0, 50.0), 1.0);
        assert_eq!(SimulatedAnnealing::acceptance_probability(10.0, 9.999, 0.1), 1.0);
    }

    #[test]
    fn test_acceptance_probability_worsening() {
        let p = SimulatedAnnealing::acceptance_probability(10.0, 20.0, 100.0);
        assert!((p - (-0.1f64).exp()).abs() < 1e-12);
        assert!(p < 1.0 && p > 0.0);
    }

    #[test]
    fn test_optimize_scenario_distance() {
        let instance = sample_instance();
        let sa = SimulatedAnnealing::new(&instance, Criterion::Distance)
            .with_config(AnnealingConfig::default().with_seed(42));
        let result = sa.optimize().expect("feasible instance");

        assert_eq!(customer_ids(&result.solution), vec![1, 2]);
        for route in result.solution.routes() {
            if !route.is_empty() {
                assert!(route.is_closed());
                assert!(route.first().expect("non-empty").is_depot());
            }
        }
        // Must at least serve the nearest customer round trip.
        let lower_bound = 2.0 * 50.0f64.sqrt();
        assert!(result.metrics.total_distance >= lower_bound - 1e-9);
        assert!(result.metrics.total_emissions >= 0.0);
        assert!(result.metrics.total_delivery_time >= 0.0);
    }

    #[test]
    fn test_optimize_deterministic_under_seed() {
        let instance = sample_instance();
        let config = AnnealingConfig::default().with_seed(99);
        let a = SimulatedAnnealing::new(&instance, Criterion::Emissions)
            .with_config(config.clone())
            .optimize()
            .expect("feasible");
        let b = SimulatedAnnealing::new(&instance, Criterion::Emissions)
            .with_config(config)
            .optimize()
            .expect("feasible");
        assert_eq!(a, b);
    }

    #[test]
    fn test_optimize_time_criterion() {
        let instance = sample_instance();
        let sa = SimulatedAnnealing::new(&instance, Criterion::Time)
            .with_config(AnnealingConfig::default().with_seed(5));
        let result = sa.optimize().expect("feasible");
        assert_eq!(customer_ids(&result.solution), vec![1, 2]);
        assert!(result.metrics.total_delivery_time > 0.0);
    }

    #[test]
    fn test_missing_station_modality_fails_before_search() {
        let instance = Instance::new(
            vec![Depot::new(1, 0.0, 0.0)],
            vec![Customer::new(1, 5.0, 5.0, 3)],
            vec![Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50)],
            vec![],
            vec![FuelStation::new(1, 3.0, 3.0, "type1")],
        );
        let sa = SimulatedAnnealing::new(&instance, Criterion::Distance);
        assert_eq!(
            sa.optimize(),
            Err(Error::NoStationAvailable {
                vehicle_id: 1,
                kind: FuelKind::Electric,
            })
        );
    }

    #[test]
    fn test_no_vehicles_degrades_to_empty_solution() {
        let instance = Instance::new(
            vec![Depot::new(1, 0.0, 0.0)],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        let sa = SimulatedAnnealing::new(&instance, Criterion::Distance);
        let result = sa.optimize().expect("degenerate but not an error");
        assert_eq!(result.solution.num_routes(), 0);
        assert_eq!(result.metrics.total_distance, 0.0);
    }

    proptest! {
        #[test]
        fn prop_acceptance_probability_bounds(old in 0.0f64..1e4, new in 0.0f64..1e4,
                                              t in 0.001f64..1e3) {
            let p = SimulatedAnnealing::acceptance_probability(old, new, t);
            if new < old {
                prop_assert_eq!(p, 1.0);
            } else {
                prop_assert!(p > 0.0 && p <= 1.0);
            }
        }
    }
}
