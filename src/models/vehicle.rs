//! Vehicle description and its mutable range state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Location;

/// Fuel modality of a vehicle, determining which station kind can restore
/// its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    /// Recharges at charging stations.
    Electric,
    /// Refuels at fuel stations.
    Fossil,
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelKind::Electric => f.write_str("electric"),
            FuelKind::Fossil => f.write_str("fossil"),
        }
    }
}

/// Charging port of an electric vehicle; scales the time cost of a
/// recharge event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Full charging time.
    Standard,
    /// Half charging time.
    Fast,
    /// Quarter charging time.
    Super,
}

impl PortType {
    /// Multiplier applied to a charging station's `charging_speed`.
    pub fn charge_multiplier(&self) -> f64 {
        match self {
            PortType::Standard => 1.0,
            PortType::Fast => 0.5,
            PortType::Super => 0.25,
        }
    }
}

/// Immutable description of a vehicle: modality, range, emission rate, and
/// charging characteristics.
///
/// Range consumption during a repair pass lives in [`RangeState`], not here,
/// so a vehicle can be shared freely between optimizer runs.
///
/// # Examples
///
/// ```
/// use gvrp::models::{FuelKind, PortType, Vehicle};
///
/// let v = Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50)
///     .with_port(PortType::Fast);
/// assert_eq!(v.kind(), FuelKind::Electric);
/// assert_eq!(v.emissions_for(10.0), 5.0);
/// assert_eq!(v.charge_multiplier(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: u32,
    kind: FuelKind,
    range: f64,
    recharge_time: f64,
    emission_rate: f64,
    package_capacity: u32,
    port: Option<PortType>,
}

impl Vehicle {
    /// Creates a vehicle. Electric vehicles usually also set a port
    /// via [`with_port`](Self::with_port).
    pub fn new(
        id: u32,
        kind: FuelKind,
        range: f64,
        recharge_time: f64,
        emission_rate: f64,
        package_capacity: u32,
    ) -> Self {
        Self {
            id,
            kind,
            range,
            recharge_time,
            emission_rate,
            package_capacity,
            port: None,
        }
    }

    /// Sets the charging port type.
    pub fn with_port(mut self, port: PortType) -> Self {
        self.port = Some(port);
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Fuel modality.
    pub fn kind(&self) -> FuelKind {
        self.kind
    }

    /// Maximum distance on a full tank or charge.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Time to recharge this vehicle.
    pub fn recharge_time(&self) -> f64 {
        self.recharge_time
    }

    /// Emissions per unit distance.
    pub fn emission_rate(&self) -> f64 {
        self.emission_rate
    }

    /// Maximum number of packages carried (informational).
    pub fn package_capacity(&self) -> u32 {
        self.package_capacity
    }

    /// Charging port, if any.
    pub fn port(&self) -> Option<PortType> {
        self.port
    }

    /// Emissions produced over the given distance (linear model).
    pub fn emissions_for(&self, distance: f64) -> f64 {
        distance * self.emission_rate
    }

    /// Recharge-duration multiplier from the port type (1.0 without a port).
    pub fn charge_multiplier(&self) -> f64 {
        self.port.map_or(1.0, |p| p.charge_multiplier())
    }
}

/// Mutable remaining-range tracker for one vehicle during a repair pass.
///
/// A fresh state starts at the vehicle's full range; `travel` consumes it
/// and `refuel_or_recharge` restores it at a modality-matching station. The
/// remaining range never leaves `[0, range]`.
///
/// # Examples
///
/// ```
/// use gvrp::models::{FuelKind, RangeState, Vehicle};
///
/// let v = Vehicle::new(1, FuelKind::Fossil, 100.0, 3.0, 2.0, 50);
/// let mut state = RangeState::full(&v);
/// assert!(state.travel(60.0));
/// assert!(!state.travel(60.0)); // would overrun; no mutation
/// assert_eq!(state.remaining(), 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeState {
    remaining: f64,
}

impl RangeState {
    /// Starts a pass with a full tank or charge.
    pub fn full(vehicle: &Vehicle) -> Self {
        Self {
            remaining: vehicle.range(),
        }
    }

    /// Remaining range.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Travels the given distance.
    ///
    /// Returns `false` and leaves the state untouched when the distance
    /// exceeds the remaining range.
    pub fn travel(&mut self, distance: f64) -> bool {
        if self.remaining - distance < 0.0 {
            log::debug!(
                "cannot travel {distance} units with {} remaining",
                self.remaining
            );
            return false;
        }
        self.remaining -= distance;
        true
    }

    /// Refuels or recharges at the given stop.
    ///
    /// Resets the remaining range to the vehicle's full range only when the
    /// stop matches the vehicle's modality (electric at a charging station,
    /// fossil at a fuel station). A mismatched stop is ignored.
    pub fn refuel_or_recharge(&mut self, vehicle: &Vehicle, station: &Location) -> bool {
        if station.is_station_for(vehicle.kind()) {
            self.remaining = vehicle.range();
            log::debug!(
                "vehicle {} restored to full range at {station}",
                vehicle.id()
            );
            true
        } else {
            log::debug!(
                "vehicle {} cannot refuel/recharge at {station}",
                vehicle.id()
            );
            false
        }
    }

    /// Returns `true` when the tank or charge is depleted.
    pub fn needs_refuel_or_recharge(&self) -> bool {
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, FuelStation};
    use proptest::prelude::*;

    fn electric() -> Vehicle {
        Vehicle::new(1, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Fast)
    }

    #[test]
    fn test_vehicle_accessors() {
        let v = electric();
        assert_eq!(v.id(), 1);
        assert_eq!(v.kind(), FuelKind::Electric);
        assert_eq!(v.range(), 100.0);
        assert_eq!(v.recharge_time(), 30.0);
        assert_eq!(v.emission_rate(), 0.5);
        assert_eq!(v.package_capacity(), 50);
        assert_eq!(v.port(), Some(PortType::Fast));
    }

    #[test]
    fn test_emissions_linear() {
        let v = electric();
        assert_eq!(v.emissions_for(0.0), 0.0);
        assert_eq!(v.emissions_for(10.0), 5.0);
    }

    #[test]
    fn test_charge_multiplier() {
        assert_eq!(electric().charge_multiplier(), 0.5);
        let standard = Vehicle::new(2, FuelKind::Electric, 100.0, 30.0, 0.5, 50)
            .with_port(PortType::Standard);
        assert_eq!(standard.charge_multiplier(), 1.0);
        let superfast =
            Vehicle::new(3, FuelKind::Electric, 100.0, 30.0, 0.5, 50).with_port(PortType::Super);
        assert_eq!(superfast.charge_multiplier(), 0.25);
        let fossil = Vehicle::new(4, FuelKind::Fossil, 200.0, 3.0, 2.0, 100);
        assert_eq!(fossil.charge_multiplier(), 1.0);
    }

    #[test]
    fn test_travel_insufficient_range_no_mutation() {
        let v = electric();
        let mut state = RangeState::full(&v);
        assert!(state.travel(50.0));
        assert_eq!(state.remaining(), 50.0);
        assert!(!state.travel(60.0));
        assert_eq!(state.remaining(), 50.0);
        assert!(state.travel(30.0));
        assert_eq!(state.remaining(), 20.0);
    }

    #[test]
    fn test_refuel_modality_mismatch_is_noop() {
        let v = electric();
        let mut state = RangeState::full(&v);
        assert!(state.travel(90.0));
        assert_eq!(state.remaining(), 10.0);

        let fuel = Location::from(FuelStation::new(1, 3.0, 3.0, "type1"));
        assert!(!state.refuel_or_recharge(&v, &fuel));
        assert_eq!(state.remaining(), 10.0);

        let charge = Location::from(ChargingStation::new(1, 7.0, 7.0, "fast", 10.0));
        assert!(state.refuel_or_recharge(&v, &charge));
        assert_eq!(state.remaining(), 100.0);
    }

    #[test]
    fn test_needs_refuel() {
        let v = electric();
        let mut state = RangeState::full(&v);
        assert!(!state.needs_refuel_or_recharge());
        assert!(state.travel(100.0));
        assert!(state.needs_refuel_or_recharge());
    }

    proptest! {
        #[test]
        fn prop_remaining_stays_in_bounds(distances in proptest::collection::vec(0.0f64..50.0, 0..20)) {
            let v = electric();
            let mut state = RangeState::full(&v);
            for d in distances {
                state.travel(d);
                prop_assert!(state.remaining() >= 0.0);
                prop_assert!(state.remaining() <= v.range());
            }
        }

        #[test]
        fn prop_emissions_exact(d in 0.0f64..1e6) {
            let v = electric();
            prop_assert_eq!(v.emissions_for(d), d * 0.5);
        }
    }
}
