//! Solution and aggregate metric types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A complete assignment of routes to vehicles.
///
/// Routes are indexed by vehicle position in the instance's vehicle
/// ordering; an empty route means the vehicle is unused.
///
/// # Examples
///
/// ```
/// use gvrp::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::empty(), Route::empty()]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.customers_served(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution from per-vehicle routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Creates a solution with one empty route per vehicle.
    pub fn unused(num_vehicles: usize) -> Self {
        Self {
            routes: vec![Route::empty(); num_vehicles],
        }
    }

    /// Routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to the routes.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Route of the vehicle at the given index.
    pub fn route(&self, vehicle_index: usize) -> Option<&Route> {
        self.routes.get(vehicle_index)
    }

    /// Number of vehicle slots (used or not).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total customer stops across all routes.
    pub fn customers_served(&self) -> usize {
        self.routes.iter().map(|r| r.num_customers()).sum()
    }
}

/// Aggregate cost metrics of a solution.
///
/// `total_delivery_time` uses parallel (makespan) semantics: the slowest
/// route bounds the fleet, so it is a maximum, not a sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionMetrics {
    /// Sum of hop distances over all routes.
    pub total_distance: f64,
    /// Sum of per-hop emissions over all routes.
    pub total_emissions: f64,
    /// Maximum per-vehicle route completion time, recharge penalties
    /// included.
    pub total_delivery_time: f64,
}

/// The outcome of an optimizer run: routes plus their aggregate metrics.
///
/// When the MILP backend reports a non-optimal status the metrics are
/// advisory and the routes may be empty or partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResult {
    /// Vehicle-indexed routes.
    pub solution: Solution,
    /// Aggregate metrics of `solution`.
    pub metrics: SolutionMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Depot, Location};

    #[test]
    fn test_unused_solution() {
        let sol = Solution::unused(3);
        assert_eq!(sol.num_routes(), 3);
        assert!(sol.routes().iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_customers_served() {
        let depot = Location::from(Depot::new(1, 0.0, 0.0));
        let mut route = Route::new(vec![depot.clone(), depot]);
        route.insert(1, Location::from(Customer::new(1, 1.0, 1.0, 2)));
        route.insert(2, Location::from(Customer::new(2, 2.0, 2.0, 2)));

        let sol = Solution::new(vec![route, Route::empty()]);
        assert_eq!(sol.customers_served(), 2);
        assert_eq!(sol.route(1).map(|r| r.len()), Some(0));
    }
}
