//! Route feasibility repair: refueling/recharging stop insertion.
//!
//! # Algorithm
//!
//! Scans a route left to right with a fresh full-range state. Before each
//! hop it requires enough range to reach the next stop *and* still reach a
//! station from there; when the look-ahead fails, the station nearest to the
//! current stop is inserted right after it and the range is restored. The
//! pass is deterministic, never removes or reorders stops, and inserts
//! stations only.

use crate::error::Error;
use crate::models::{Instance, Location, RangeState, Route, Vehicle};

/// Inserts refueling/recharging stops wherever the vehicle would otherwise
/// run out of range.
///
/// The pass starts from a full tank or charge; the caller's vehicle value is
/// never mutated. Returns [`Error::NoStationAvailable`] when the vehicle's
/// modality has no stations and the route has at least one hop, since the
/// look-ahead can then never be satisfied.
///
/// # Examples
///
/// ```
/// use gvrp::models::{Customer, Depot, FuelKind, FuelStation, Instance, Location, Route, Vehicle};
/// use gvrp::repair::insert_refuel_stops;
///
/// let instance = Instance::new(
///     vec![Depot::new(1, 0.0, 0.0)],
///     vec![Customer::new(1, 40.0, 0.0, 2)],
///     vec![Vehicle::new(1, FuelKind::Fossil, 100.0, 3.0, 2.0, 100)],
///     vec![],
///     vec![FuelStation::new(1, 45.0, 0.0, "type1")],
/// );
/// let vehicle = &instance.vehicles()[0];
/// let depot = instance.locations()[0].clone();
/// let customer = instance.locations()[1].clone();
/// let route = Route::new(vec![depot.clone(), customer, depot]);
///
/// let repaired = insert_refuel_stops(&route, vehicle, &instance).unwrap();
/// assert_eq!(repaired.len(), 4); // fuel stop inserted before the return leg
/// ```
pub fn insert_refuel_stops(
    route: &Route,
    vehicle: &Vehicle,
    instance: &Instance,
) -> Result<Route, Error> {
    let stations = instance.stations_for(vehicle.kind());
    let mut repaired = route.clone();
    if repaired.len() < 2 {
        return Ok(repaired);
    }
    if stations.is_empty() {
        return Err(Error::NoStationAvailable {
            vehicle_id: vehicle.id(),
            kind: vehicle.kind(),
        });
    }

    let mut state = RangeState::full(vehicle);
    let mut i = 0;
    while i + 1 < repaired.len() {
        let (distance, reachable) = {
            let stops = repaired.stops();
            let distance = stops[i].distance_to(&stops[i + 1]);
            let reachable =
                can_reach_next_and_station(vehicle, &state, &stops[i], &stops[i + 1], stations);
            (distance, reachable)
        };

        if !reachable {
            add_refuel_stop(&mut repaired, i, vehicle, &mut state, stations);
        } else if !state.travel(distance) {
            log::debug!("vehicle {} needs to refuel again before hop {i}", vehicle.id());
            add_refuel_stop(&mut repaired, i, vehicle, &mut state, stations);
            state.travel(distance);
        }
        i += 1;
    }

    Ok(repaired)
}

/// Look-ahead feasibility: the vehicle must reach the next stop and still be
/// able to reach some station of its modality from there.
fn can_reach_next_and_station(
    vehicle: &Vehicle,
    state: &RangeState,
    current: &Location,
    next: &Location,
    stations: &[Location],
) -> bool {
    let distance_to_next = current.distance_to(next);
    let nearest_station_distance = stations
        .iter()
        .map(|s| next.distance_to(s))
        .fold(f64::INFINITY, f64::min);
    log::debug!(
        "vehicle {} at {current}: next {next} is {distance_to_next} away, \
         nearest station from there {nearest_station_distance}, remaining {}",
        vehicle.id(),
        state.remaining()
    );
    state.remaining() >= distance_to_next + nearest_station_distance
}

/// Inserts the station nearest to `route[i]` right after it and restores the
/// range, unless the current stop already is that station.
fn add_refuel_stop(
    route: &mut Route,
    i: usize,
    vehicle: &Vehicle,
    state: &mut RangeState,
    stations: &[Location],
) {
    let Some(station) = nearest_station(&route.stops()[i], stations) else {
        return;
    };
    let station = station.clone();
    if route.stops()[i] != station {
        route.insert(i + 1, station.clone());
        log::debug!(
            "vehicle {} added refuel stop {station} at index {}",
            vehicle.id(),
            i + 1
        );
        state.refuel_or_recharge(vehicle, &station);
    }
}

/// Station nearest to the given stop, by Euclidean distance.
pub fn nearest_station<'a>(from: &Location, stations: &'a [Location]) -> Option<&'a Location> {
    stations
        .iter()
        .min_by(|a, b| from.distance_to(a).total_cmp(&from.distance_to(b)))
}
