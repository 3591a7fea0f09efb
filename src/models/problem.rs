//! Problem instance, optimization criterion, and the optimizer seam.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::{
    ChargingStation, Customer, Depot, FuelKind, FuelStation, Location, OptimizeResult, Vehicle,
};

/// What an optimizer minimizes.
///
/// Parsed from the configuration strings `"distance"`, `"emissions"`, and
/// `"time"`; anything else is rejected before any model construction or
/// search begins.
///
/// # Examples
///
/// ```
/// use gvrp::models::Criterion;
///
/// assert_eq!("emissions".parse::<Criterion>().unwrap(), Criterion::Emissions);
/// assert!("cost".parse::<Criterion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Minimize total distance traveled.
    Distance,
    /// Minimize total emissions produced.
    Emissions,
    /// Minimize the parallel (makespan) delivery time.
    Time,
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(Criterion::Distance),
            "emissions" => Ok(Criterion::Emissions),
            "time" => Ok(Criterion::Time),
            other => Err(Error::InvalidCriterion(other.to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Distance => f.write_str("distance"),
            Criterion::Emissions => f.write_str("emissions"),
            Criterion::Time => f.write_str("time"),
        }
    }
}

/// A GVRP instance: the five entity collections plus the derived location
/// space shared by every optimizer.
///
/// Vehicles are sorted ascending by emission rate at construction; that
/// order is the vehicle-index mapping used by solutions, warm starts, and
/// cost evaluation for the lifetime of the instance.
///
/// # Examples
///
/// ```
/// use gvrp::models::{ChargingStation, Customer, Depot, FuelKind, FuelStation, Instance, Vehicle};
///
/// let instance = Instance::new(
///     vec![Depot::new(1, 0.0, 0.0)],
///     vec![Customer::new(1, 5.0, 5.0, 3)],
///     vec![
///         Vehicle::new(1, FuelKind::Fossil, 200.0, 3.0, 2.0, 100),
///         Vehicle::new(2, FuelKind::Electric, 100.0, 30.0, 0.5, 50),
///     ],
///     vec![ChargingStation::new(1, 7.0, 7.0, "fast", 10.0)],
///     vec![FuelStation::new(1, 3.0, 3.0, "type1")],
/// );
/// // Sorted by emission rate: the electric vehicle comes first.
/// assert_eq!(instance.vehicles()[0].id(), 2);
/// assert_eq!(instance.num_locations(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    depots: Vec<Depot>,
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    charging_stations: Vec<ChargingStation>,
    fuel_stations: Vec<FuelStation>,
    locations: Vec<Location>,
}

impl Instance {
    /// Builds an instance from entity collections.
    pub fn new(
        depots: Vec<Depot>,
        customers: Vec<Customer>,
        mut vehicles: Vec<Vehicle>,
        charging_stations: Vec<ChargingStation>,
        fuel_stations: Vec<FuelStation>,
    ) -> Self {
        vehicles.sort_by(|a, b| a.emission_rate().total_cmp(&b.emission_rate()));

        let mut locations =
            Vec::with_capacity(depots.len() + customers.len() + charging_stations.len() + fuel_stations.len());
        locations.extend(depots.iter().cloned().map(Location::from));
        locations.extend(customers.iter().cloned().map(Location::from));
        locations.extend(charging_stations.iter().cloned().map(Location::from));
        locations.extend(fuel_stations.iter().cloned().map(Location::from));

        Self {
            depots,
            customers,
            vehicles,
            charging_stations,
            fuel_stations,
            locations,
        }
    }

    /// Depots.
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    /// Customers.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Vehicles, ascending by emission rate.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Charging stations.
    pub fn charging_stations(&self) -> &[ChargingStation] {
        &self.charging_stations
    }

    /// Fuel stations.
    pub fn fuel_stations(&self) -> &[FuelStation] {
        &self.fuel_stations
    }

    /// The full location space: depots, then customers, then charging
    /// stations, then fuel stations. MILP arc indices refer to this order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations in the instance.
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Index range of depots within [`locations`](Self::locations).
    pub fn depot_indices(&self) -> std::ops::Range<usize> {
        0..self.depots.len()
    }

    /// Index range of customers within [`locations`](Self::locations).
    pub fn customer_indices(&self) -> std::ops::Range<usize> {
        self.depots.len()..self.depots.len() + self.customers.len()
    }

    /// Stations usable by the given modality, as locations.
    pub fn stations_for(&self, kind: FuelKind) -> &[Location] {
        let charging_start = self.depots.len() + self.customers.len();
        let fuel_start = charging_start + self.charging_stations.len();
        match kind {
            FuelKind::Electric => &self.locations[charging_start..fuel_start],
            FuelKind::Fossil => &self.locations[fuel_start..],
        }
    }

    /// Index of a stop within the location space, matching on kind and ID.
    pub fn location_index(&self, stop: &Location) -> Option<usize> {
        self.locations
            .iter()
            .position(|loc| loc.kind() == stop.kind() && loc.id() == stop.id())
    }

    /// Verifies that every vehicle's modality has at least one station.
    ///
    /// Without one, the refueling look-ahead can never be satisfied for that
    /// vehicle and the instance is infeasible.
    pub fn check_station_coverage(&self) -> Result<(), Error> {
        for vehicle in &self.vehicles {
            if self.stations_for(vehicle.kind()).is_empty() {
                return Err(Error::NoStationAvailable {
                    vehicle_id: vehicle.id(),
                    kind: vehicle.kind(),
                });
            }
        }
        Ok(())
    }
}

/// Common seam for the three optimizers.
pub trait Optimizer {
    /// Runs the optimization and returns routes plus aggregate metrics.
    fn optimize(&self) -> Result<OptimizeResult, Error>;
}
