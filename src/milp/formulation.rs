//! Binary-arc MILP formulation of the GVRP.
//!
//! Variables: `x[i][j][k]` selects arc i→j for vehicle k (diagonal arcs are
//! never created); `u[k][i] >= 0` are MTZ order variables for subtour
//! elimination; `max_time` is the epigraph variable of the makespan
//! objective.

use good_lp::constraint::{eq, leq, Constraint};
use good_lp::{variable, Expression, ProblemVariables, Variable};

use crate::distance::DistanceMatrix;
use crate::error::Error;
use crate::models::{Criterion, Instance, Solution};

/// Handles to the binary arc variables, indexed `(from, to, vehicle)`.
pub(crate) struct ArcVariables {
    vars: Vec<Option<Variable>>,
    num_locations: usize,
    num_vehicles: usize,
}

impl ArcVariables {
    fn add_to(problem: &mut ProblemVariables, num_locations: usize, num_vehicles: usize) -> Self {
        let mut vars = Vec::with_capacity(num_locations * num_locations * num_vehicles);
        for i in 0..num_locations {
            for j in 0..num_locations {
                for _ in 0..num_vehicles {
                    if i == j {
                        vars.push(None);
                    } else {
                        vars.push(Some(problem.add(variable().binary())));
                    }
                }
            }
        }
        Self {
            vars,
            num_locations,
            num_vehicles,
        }
    }

    /// Variable for arc i→j of vehicle k; `None` on the diagonal.
    pub(crate) fn get(&self, i: usize, j: usize, k: usize) -> Option<Variable> {
        self.vars[(i * self.num_locations + j) * self.num_vehicles + k]
    }

    /// Reads the solved arc selections as a boolean matrix.
    pub(crate) fn selected<S: good_lp::Solution>(&self, solution: &S) -> ArcMatrix {
        let values = self
            .vars
            .iter()
            .map(|v| v.map_or(false, |var| solution.value(var) > 0.5))
            .collect();
        ArcMatrix {
            values,
            num_locations: self.num_locations,
            num_vehicles: self.num_vehicles,
        }
    }

    pub(crate) fn empty_matrix(&self) -> ArcMatrix {
        ArcMatrix {
            values: vec![false; self.vars.len()],
            num_locations: self.num_locations,
            num_vehicles: self.num_vehicles,
        }
    }
}

/// Solved arc selections, indexed like [`ArcVariables`].
#[derive(Debug, Clone)]
pub(crate) struct ArcMatrix {
    values: Vec<bool>,
    num_locations: usize,
    num_vehicles: usize,
}

impl ArcMatrix {
    #[cfg(test)]
    pub(crate) fn from_arcs(
        num_locations: usize,
        num_vehicles: usize,
        arcs: &[(usize, usize, usize)],
    ) -> Self {
        let mut matrix = Self {
            values: vec![false; num_locations * num_locations * num_vehicles],
            num_locations,
            num_vehicles,
        };
        for &(i, j, k) in arcs {
            matrix.values[(i * num_locations + j) * num_vehicles + k] = true;
        }
        matrix
    }

    /// Returns `true` if vehicle k traverses arc i→j.
    pub(crate) fn get(&self, i: usize, j: usize, k: usize) -> bool {
        self.values[(i * self.num_locations + j) * self.num_vehicles + k]
    }
}

/// A fully built model, ready to hand to the backend.
pub(crate) struct Formulation {
    pub(crate) variables: ProblemVariables,
    pub(crate) arcs: ArcVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
}

/// Builds the arc formulation for the given instance and criterion,
/// optionally pinning a warm-start solution's arcs.
pub(crate) fn build_model(
    instance: &Instance,
    distances: &DistanceMatrix,
    criterion: Criterion,
    warm_start: Option<&Solution>,
) -> Result<Formulation, Error> {
    let n = instance.num_locations();
    let num_vehicles = instance.vehicles().len();

    let mut variables = ProblemVariables::new();
    let arcs = ArcVariables::add_to(&mut variables, n, num_vehicles);
    let order: Vec<Variable> = (0..num_vehicles * n)
        .map(|_| variables.add(variable().min(0.0)))
        .collect();
    let u = |k: usize, i: usize| order[k * n + i];

    let mut constraints = Vec::new();

    // Objective
    let objective = match criterion {
        Criterion::Distance => {
            let mut total = Expression::default();
            for_each_arc(&arcs, |i, j, _, x| total += distances.get(i, j) * x);
            total
        }
        Criterion::Emissions => {
            let mut total = Expression::default();
            for_each_arc(&arcs, |i, j, k, x| {
                total += instance.vehicles()[k].emissions_for(distances.get(i, j)) * x;
            });
            total
        }
        Criterion::Time => {
            let max_time = variables.add(variable().min(0.0));
            for k in 0..num_vehicles {
                let mut route_time = Expression::default();
                for_each_vehicle_arc(&arcs, k, |i, j, x| route_time += distances.get(i, j) * x);
                constraints.push(leq(route_time, max_time));
            }
            Expression::from(max_time)
        }
    };

    // Each vehicle departs from and returns to exactly one depot, and both
    // ends land on the same depot (per-depot departure/return balance).
    for k in 0..num_vehicles {
        let mut departures = Expression::default();
        let mut returns = Expression::default();
        for d in instance.depot_indices() {
            let mut depot_out = Expression::default();
            let mut depot_in = Expression::default();
            for j in 0..n {
                if let Some(x) = arcs.get(d, j, k) {
                    depot_out += Expression::from(x);
                    departures += Expression::from(x);
                }
                if let Some(x) = arcs.get(j, d, k) {
                    depot_in += Expression::from(x);
                    returns += Expression::from(x);
                }
            }
            constraints.push(eq(depot_out - depot_in, 0.0));
        }
        constraints.push(eq(departures, 1.0));
        constraints.push(eq(returns, 1.0));
    }

    // Each customer has exactly one inbound and one outbound arc across all
    // vehicles.
    for c in instance.customer_indices() {
        let mut inbound = Expression::default();
        let mut outbound = Expression::default();
        for i in 0..n {
            for k in 0..num_vehicles {
                if let Some(x) = arcs.get(i, c, k) {
                    inbound += Expression::from(x);
                }
                if let Some(x) = arcs.get(c, i, k) {
                    outbound += Expression::from(x);
                }
            }
        }
        constraints.push(eq(inbound, 1.0));
        constraints.push(eq(outbound, 1.0));
    }

    // Flow conservation per vehicle at every customer.
    for k in 0..num_vehicles {
        for c in instance.customer_indices() {
            let mut flow = Expression::default();
            for i in 0..n {
                if let Some(x) = arcs.get(i, c, k) {
                    flow += Expression::from(x);
                }
                if let Some(x) = arcs.get(c, i, k) {
                    flow -= Expression::from(x);
                }
            }
            constraints.push(eq(flow, 0.0));
        }
    }

    // MTZ subtour elimination over non-depot index pairs.
    let big_m = n as f64;
    let non_depot = instance.depot_indices().end..n;
    for k in 0..num_vehicles {
        for i in non_depot.clone() {
            for j in non_depot.clone() {
                if let Some(x) = arcs.get(i, j, k) {
                    let lhs = Expression::from(u(k, i)) - u(k, j) + big_m * x;
                    constraints.push(leq(lhs, big_m - 1.0));
                }
            }
        }
    }

    // Range feasibility: any traversed arc must leave enough range to reach
    // a station of the vehicle's modality from the destination.
    for (k, vehicle) in instance.vehicles().iter().enumerate() {
        let stations = instance.stations_for(vehicle.kind());
        for j in 0..n {
            let nearest = stations
                .iter()
                .map(|s| instance.locations()[j].distance_to(s))
                .fold(f64::INFINITY, f64::min);
            for i in 0..n {
                if let Some(x) = arcs.get(i, j, k) {
                    constraints.push(leq(distances.get(i, j) * x, vehicle.range() - nearest));
                }
            }
        }
    }

    // Warm start: pin the heuristic solution's arcs.
    if let Some(solution) = warm_start {
        for (k, route) in solution.routes().iter().enumerate().take(num_vehicles) {
            for pair in route.stops().windows(2) {
                let i = instance
                    .location_index(&pair[0])
                    .ok_or_else(|| Error::UnknownLocation {
                        label: pair[0].to_string(),
                    })?;
                let j = instance
                    .location_index(&pair[1])
                    .ok_or_else(|| Error::UnknownLocation {
                        label: pair[1].to_string(),
                    })?;
                if let Some(x) = arcs.get(i, j, k) {
                    constraints.push(eq(Expression::from(x), 1.0));
                }
            }
        }
    }

    Ok(Formulation {
        variables,
        arcs,
        objective,
        constraints,
    })
}

fn for_each_arc(arcs: &ArcVariables, mut f: impl FnMut(usize, usize, usize, Variable)) {
    for i in 0..arcs.num_locations {
        for j in 0..arcs.num_locations {
            for k in 0..arcs.num_vehicles {
                if let Some(x) = arcs.get(i, j, k) {
                    f(i, j, k, x);
                }
            }
        }
    }
}

fn for_each_vehicle_arc(arcs: &ArcVariables, k: usize, mut f: impl FnMut(usize, usize, Variable)) {
    for i in 0..arcs.num_locations {
        for j in 0..arcs.num_locations {
            if let Some(x) = arcs.get(i, j, k) {
                f(i, j, x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, Customer, Depot, FuelKind, FuelStation, Vehicle};

    fn sample_instance() -> Instance {
        Instance::new(
            vec![Depot::new(1, 0.0, 0.0)],
            vec![Customer::new(1, 5.0, 5.0, 3)],
            vec![Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100)],
            vec![ChargingStation::new(1, 7.0, 7.0, "fast", 10.0)],
            vec![FuelStation::new(1, 3.0, 3.0, "type1")],
        )
    }

    #[test]
    fn test_arc_variables_skip_diagonal() {
        let mut problem = ProblemVariables::new();
        let arcs = ArcVariables::add_to(&mut problem, 3, 2);
        for i in 0..3 {
            for k in 0..2 {
                assert!(arcs.get(i, i, k).is_none());
            }
        }
        assert!(arcs.get(0, 1, 0).is_some());
        assert!(arcs.get(2, 1, 1).is_some());
    }

    #[test]
    fn test_arc_matrix_roundtrip() {
        let matrix = ArcMatrix::from_arcs(4, 2, &[(0, 2, 0), (2, 0, 0), (1, 3, 1)]);
        assert!(matrix.get(0, 2, 0));
        assert!(matrix.get(2, 0, 0));
        assert!(matrix.get(1, 3, 1));
        assert!(!matrix.get(0, 2, 1));
        assert!(!matrix.get(2, 1, 0));
    }

    #[test]
    fn test_build_model_all_criteria() {
        let instance = sample_instance();
        let distances = DistanceMatrix::from_locations(instance.locations());
        for criterion in [Criterion::Distance, Criterion::Emissions, Criterion::Time] {
            let model = build_model(&instance, &distances, criterion, None).expect("buildable");
            assert!(!model.constraints.is_empty());
        }
    }

    #[test]
    fn test_warm_start_unknown_stop_is_rejected() {
        let instance = sample_instance();
        let distances = DistanceMatrix::from_locations(instance.locations());
        let stranger = crate::models::Location::from(Depot::new(99, 1.0, 1.0));
        let warm = Solution::new(vec![crate::models::Route::new(vec![
            stranger.clone(),
            stranger,
        ])]);
        let err = build_model(&instance, &distances, Criterion::Distance, Some(&warm))
            .err()
            .expect("unknown stop");
        assert!(matches!(err, Error::UnknownLocation { .. }));
    }
}
