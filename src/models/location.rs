//! Location entities: depots, customers, and refueling infrastructure.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FuelKind;

/// A depot where vehicle routes start and end.
///
/// # Examples
///
/// ```
/// use gvrp::models::Depot;
///
/// let d = Depot::new(1, 0.0, 0.0);
/// assert_eq!(d.id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    id: u32,
    x: f64,
    y: f64,
}

impl Depot {
    /// Creates a depot at the given coordinates.
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Depot ID (unique among depots).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// A customer to be served by exactly one vehicle.
///
/// The package count is informational; it does not constrain assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: u32,
    x: f64,
    y: f64,
    packages: u32,
}

impl Customer {
    /// Creates a customer with a package demand.
    pub fn new(id: u32, x: f64, y: f64, packages: u32) -> Self {
        Self { id, x, y, packages }
    }

    /// Customer ID (unique among customers).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Number of packages to deliver.
    pub fn packages(&self) -> u32 {
        self.packages
    }
}

/// A recharging point usable by electric vehicles.
///
/// `charging_speed` is the time cost of one recharge event; the port type of
/// the recharging vehicle scales it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStation {
    id: u32,
    x: f64,
    y: f64,
    station_type: String,
    charging_speed: f64,
}

impl ChargingStation {
    /// Creates a charging station.
    pub fn new(id: u32, x: f64, y: f64, station_type: impl Into<String>, charging_speed: f64) -> Self {
        Self {
            id,
            x,
            y,
            station_type: station_type.into(),
            charging_speed,
        }
    }

    /// Station ID (unique among charging stations).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Category label of this station.
    pub fn station_type(&self) -> &str {
        &self.station_type
    }

    /// Time cost of a recharge event at this station.
    pub fn charging_speed(&self) -> f64 {
        self.charging_speed
    }
}

/// A refueling point usable by fossil vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStation {
    id: u32,
    x: f64,
    y: f64,
    station_type: String,
}

impl FuelStation {
    /// Creates a fuel station.
    pub fn new(id: u32, x: f64, y: f64, station_type: impl Into<String>) -> Self {
        Self {
            id,
            x,
            y,
            station_type: station_type.into(),
        }
    }

    /// Station ID (unique among fuel stations).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Category label of this station.
    pub fn station_type(&self) -> &str {
        &self.station_type
    }
}

/// The kind of a [`Location`], for reporting and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Route start/end anchor.
    Depot,
    /// Delivery target.
    Customer,
    /// Electric recharging point.
    ChargingStation,
    /// Fossil refueling point.
    FuelStation,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationKind::Depot => "Depot",
            LocationKind::Customer => "Customer",
            LocationKind::ChargingStation => "ChargingStation",
            LocationKind::FuelStation => "FuelStation",
        };
        f.write_str(name)
    }
}

/// A stop in the routing plane: one of the four concrete entity kinds.
///
/// Route stops, the MILP location space, and the repair pass all work in
/// terms of this closed enum; coordinates and IDs are exposed through
/// capability accessors and variants are distinguished by pattern matching.
///
/// # Examples
///
/// ```
/// use gvrp::models::{Depot, Customer, Location};
///
/// let a = Location::from(Depot::new(1, 0.0, 0.0));
/// let b = Location::from(Customer::new(1, 3.0, 4.0, 2));
/// assert!(a.is_depot());
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Location {
    /// A depot stop.
    Depot(Depot),
    /// A customer stop.
    Customer(Customer),
    /// A charging-station stop.
    ChargingStation(ChargingStation),
    /// A fuel-station stop.
    FuelStation(FuelStation),
}

impl Location {
    /// ID of the underlying entity (unique within its own kind).
    pub fn id(&self) -> u32 {
        match self {
            Location::Depot(d) => d.id(),
            Location::Customer(c) => c.id(),
            Location::ChargingStation(s) => s.id(),
            Location::FuelStation(s) => s.id(),
        }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        match self {
            Location::Depot(d) => d.x(),
            Location::Customer(c) => c.x(),
            Location::ChargingStation(s) => s.x(),
            Location::FuelStation(s) => s.x(),
        }
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        match self {
            Location::Depot(d) => d.y(),
            Location::Customer(c) => c.y(),
            Location::ChargingStation(s) => s.y(),
            Location::FuelStation(s) => s.y(),
        }
    }

    /// The kind discriminant of this stop.
    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Depot(_) => LocationKind::Depot,
            Location::Customer(_) => LocationKind::Customer,
            Location::ChargingStation(_) => LocationKind::ChargingStation,
            Location::FuelStation(_) => LocationKind::FuelStation,
        }
    }

    /// Returns `true` if this stop is a depot.
    pub fn is_depot(&self) -> bool {
        matches!(self, Location::Depot(_))
    }

    /// Returns `true` if this stop is a customer.
    pub fn is_customer(&self) -> bool {
        matches!(self, Location::Customer(_))
    }

    /// Returns `true` if this stop can refuel or recharge the given modality.
    pub fn is_station_for(&self, kind: FuelKind) -> bool {
        match (self, kind) {
            (Location::ChargingStation(_), FuelKind::Electric) => true,
            (Location::FuelStation(_), FuelKind::Fossil) => true,
            _ => false,
        }
    }

    /// Euclidean distance to another stop.
    ///
    /// Symmetric, and zero for a stop paired with itself.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<Depot> for Location {
    fn from(d: Depot) -> Self {
        Location::Depot(d)
    }
}

impl From<Customer> for Location {
    fn from(c: Customer) -> Self {
        Location::Customer(c)
    }
}

impl From<ChargingStation> for Location {
    fn from(s: ChargingStation) -> Self {
        Location::ChargingStation(s)
    }
}

impl From<FuelStation> for Location {
    fn from(s: FuelStation) -> Self {
        Location::FuelStation(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
