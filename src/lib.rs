//! # gvrp
//!
//! Green vehicle routing optimization: assign a heterogeneous fleet of
//! electric and fossil vehicles with limited range to geographically
//! distributed customers, inserting mandatory refueling/recharging detours,
//! while minimizing total distance, total emissions, or the worst-case
//! parallel delivery time.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location kinds, Vehicle + RangeState, Route,
//!   Solution, Instance, Criterion)
//! - [`distance`] — Dense distance matrix over the location space
//! - [`evaluation`] — Cost aggregation (distance, emissions, makespan time)
//! - [`repair`] — Route feasibility repair via refueling-stop insertion
//! - [`annealing`] — Simulated annealing metaheuristic
//! - [`milp`] — Exact binary-arc MILP formulation over a generic backend
//! - [`hybrid`] — Annealing-seeded MILP pipeline

pub mod annealing;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod hybrid;
pub mod milp;
pub mod models;
pub mod repair;

pub use error::Error;
