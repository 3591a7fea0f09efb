//! Distance computation over the location space.

mod matrix;

pub use matrix::DistanceMatrix;
