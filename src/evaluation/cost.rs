//! Solution cost aggregation: distance, emissions, and makespan time.

use crate::models::{Criterion, Location, Route, Solution, SolutionMetrics, Vehicle};

/// Computes aggregate costs of solutions against a vehicle ordering.
///
/// The vehicle slice must be the same ordering the solution is indexed by
/// (the instance's, ascending by emission rate).
///
/// # Examples
///
/// ```
/// use gvrp::evaluation::CostEvaluator;
/// use gvrp::models::{Criterion, Customer, Depot, FuelKind, Location, Route, Solution, Vehicle};
///
/// let vehicles = vec![Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100)];
/// let depot = Location::from(Depot::new(1, 0.0, 0.0));
/// let route = Route::new(vec![
///     depot.clone(),
///     Location::from(Customer::new(1, 3.0, 4.0, 2)),
///     depot,
/// ]);
/// let solution = Solution::new(vec![route]);
///
/// let evaluator = CostEvaluator::new(&vehicles);
/// assert!((evaluator.total_distance(&solution) - 10.0).abs() < 1e-10);
/// assert!((evaluator.cost(&solution, Criterion::Emissions) - 20.0).abs() < 1e-10);
/// ```
pub struct CostEvaluator<'a> {
    vehicles: &'a [Vehicle],
}

impl<'a> CostEvaluator<'a> {
    /// Creates an evaluator over the given vehicle ordering.
    pub fn new(vehicles: &'a [Vehicle]) -> Self {
        Self { vehicles }
    }

    /// Cost of a solution under the given criterion.
    pub fn cost(&self, solution: &Solution, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Distance => self.total_distance(solution),
            Criterion::Emissions => self.total_emissions(solution),
            Criterion::Time => self.parallel_delivery_time(solution),
        }
    }

    /// All three aggregate metrics of a solution.
    pub fn metrics(&self, solution: &Solution) -> SolutionMetrics {
        SolutionMetrics {
            total_distance: self.total_distance(solution),
            total_emissions: self.total_emissions(solution),
            total_delivery_time: self.parallel_delivery_time(solution),
        }
    }

    /// Sum of consecutive-hop distances over all routes.
    pub fn total_distance(&self, solution: &Solution) -> f64 {
        let mut total = 0.0;
        for (k, route) in solution.routes().iter().enumerate() {
            for (from, to) in hops(route) {
                let d = from.distance_to(to);
                log::debug!("vehicle slot {k} traveling from {from} to {to}, distance {d}");
                total += d;
            }
        }
        total
    }

    /// Sum of per-hop emissions over all routes.
    pub fn total_emissions(&self, solution: &Solution) -> f64 {
        let mut total = 0.0;
        for (route, vehicle) in solution.routes().iter().zip(self.vehicles) {
            for (from, to) in hops(route) {
                total += vehicle.emissions_for(from.distance_to(to));
            }
        }
        total
    }

    /// Maximum per-vehicle route completion time.
    ///
    /// A route's time sums hop distances; arriving at a charging station
    /// additionally costs the station's `charging_speed`, scaled by the
    /// electric vehicle's port multiplier.
    pub fn parallel_delivery_time(&self, solution: &Solution) -> f64 {
        let mut max_time: f64 = 0.0;
        for (route, vehicle) in solution.routes().iter().zip(self.vehicles) {
            let mut route_time = 0.0;
            for (from, to) in hops(route) {
                route_time += from.distance_to(to);
                if let Location::ChargingStation(station) = to {
                    let multiplier = match vehicle.kind() {
                        crate::models::FuelKind::Electric => vehicle.charge_multiplier(),
                        crate::models::FuelKind::Fossil => 1.0,
                    };
                    route_time += station.charging_speed() * multiplier;
                }
            }
            max_time = max_time.max(route_time);
        }
        max_time
    }
}

fn hops(route: &Route) -> impl Iterator<Item = (&Location, &Location)> {
    route.stops().windows(2).map(|w| (&w[0], &w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, Customer, Depot, FuelKind, PortType};

    fn depot() -> Location {
        Location::from(Depot::new(1, 0.0, 0.0))
    }

    fn line_route() -> Route {
        Route::new(vec![
            depot(),
            Location::from(Customer::new(1, 3.0, 4.0, 2)),
            depot(),
        ])
    }

    #[test]
    fn test_total_distance_round_trip() {
        let vehicles = vec![Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100)];
        let evaluator = CostEvaluator::new(&vehicles);
        let solution = Solution::new(vec![line_route()]);
        assert!((evaluator.total_distance(&solution) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_routes_cost_nothing() {
        let vehicles = vec![
            Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
            Vehicle::new(2, FuelKind::Electric, 100.0, 30.0, 0.5, 50),
        ];
        let evaluator = CostEvaluator::new(&vehicles);
        let solution = Solution::unused(2);
        assert_eq!(evaluator.total_distance(&solution), 0.0);
        assert_eq!(evaluator.total_emissions(&solution), 0.0);
        assert_eq!(evaluator.parallel_delivery_time(&solution), 0.0);
    }

    #[test]
    fn test_emissions_use_each_vehicles_rate() {
        let vehicles = vec![
            Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50),
            Vehicle::new(2, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
        ];
        let evaluator = CostEvaluator::new(&vehicles);
        let solution = Solution::new(vec![line_route(), line_route()]);
        // 10 units each: 10 * 0.5 + 10 * 2.0
        assert!((evaluator.total_emissions(&solution) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_parallel_time_is_max_not_sum() {
        let vehicles = vec![
            Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
            Vehicle::new(2, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
        ];
        let long_route = Route::new(vec![
            depot(),
            Location::from(Customer::new(2, 0.0, 20.0, 1)),
            depot(),
        ]);
        let evaluator = CostEvaluator::new(&vehicles);
        let solution = Solution::new(vec![line_route(), long_route]);
        assert!((evaluator.parallel_delivery_time(&solution) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_charging_penalty_scaled_by_port() {
        let station = Location::from(ChargingStation::new(1, 3.0, 4.0, "fast", 10.0));
        let route = Route::new(vec![depot(), station, depot()]);
        let solution = Solution::new(vec![route]);

        let fast = vec![
            Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Fast),
        ];
        let evaluator = CostEvaluator::new(&fast);
        // 10 distance + 10 * 0.5 charging
        assert!((evaluator.parallel_delivery_time(&solution) - 15.0).abs() < 1e-10);

        let superfast = vec![
            Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Super),
        ];
        let evaluator = CostEvaluator::new(&superfast);
        assert!((evaluator.parallel_delivery_time(&solution) - 12.5).abs() < 1e-10);

        let standard = vec![Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50)];
        let evaluator = CostEvaluator::new(&standard);
        assert!((evaluator.parallel_delivery_time(&solution) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_dispatch() {
        let vehicles = vec![Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100)];
        let evaluator = CostEvaluator::new(&vehicles);
        let solution = Solution::new(vec![line_route()]);
        let metrics = evaluator.metrics(&solution);
        assert_eq!(
            evaluator.cost(&solution, Criterion::Distance),
            metrics.total_distance
        );
        assert_eq!(
            evaluator.cost(&solution, Criterion::Emissions),
            metrics.total_emissions
        );
        assert_eq!(
            evaluator.cost(&solution, Criterion::Time),
            metrics.total_delivery_time
        );
    }
}
