//! Domain model types for the green vehicle routing problem.
//!
//! Provides the core abstractions: the closed [`Location`] kind space,
//! immutable [`Vehicle`] values with a separate mutable [`RangeState`],
//! stop-sequence [`Route`]s, vehicle-indexed [`Solution`]s, and the
//! [`Instance`] + [`Criterion`] configuration consumed by the optimizers.

mod location;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use location::{ChargingStation, Customer, Depot, FuelStation, Location, LocationKind};
pub use problem::{Criterion, Instance, Optimizer};
pub use route::Route;
pub use solution::{OptimizeResult, Solution, SolutionMetrics};
pub use vehicle::{FuelKind, PortType, RangeState, Vehicle};
