//! Error type shared by the optimizers.

use std::error::Error as StdError;
use std::fmt;

use crate::models::FuelKind;

/// Errors produced while configuring or running an optimizer.
///
/// Solver non-convergence is deliberately *not* an error: a non-optimal MILP
/// status degrades to whatever routes can be extracted and is only logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The optimization criterion string is not one of
    /// `"distance"`, `"emissions"`, `"time"`.
    InvalidCriterion(String),
    /// A vehicle's fuel modality has no station anywhere in the instance,
    /// so the refueling look-ahead can never be satisfied. This marks the
    /// instance itself as infeasible rather than looping on an unreachable
    /// predicate.
    NoStationAvailable {
        /// Vehicle that cannot be kept in range.
        vehicle_id: u32,
        /// The modality lacking stations.
        kind: FuelKind,
    },
    /// A warm-start route references a stop that is not part of the
    /// instance's location space.
    UnknownLocation {
        /// Display label of the offending stop.
        label: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCriterion(s) => {
                write!(f, "invalid optimization criteria: {s:?}")
            }
            Error::NoStationAvailable { vehicle_id, kind } => {
                write!(
                    f,
                    "no {kind} station available for vehicle {vehicle_id}; instance is infeasible"
                )
            }
            Error::UnknownLocation { label } => {
                write!(f, "warm-start stop {label} is not in the instance")
            }
        }
    }
}

impl StdError for Error {}
