//! Dense distance matrix over the instance location space.

use crate::models::Location;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once per MILP optimizer from the instance's location space so arc
/// weights are O(1) lookups during constraint generation and extraction.
///
/// # Examples
///
/// ```
/// use gvrp::distance::DistanceMatrix;
/// use gvrp::models::{Customer, Depot, Location};
///
/// let locations = vec![
///     Location::from(Depot::new(1, 0.0, 0.0)),
///     Location::from(Customer::new(1, 3.0, 4.0, 2)),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix for the given locations.
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, Customer, Depot};

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::from(Depot::new(1, 0.0, 0.0)),
            Location::from(Customer::new(1, 3.0, 4.0, 2)),
            Location::from(ChargingStation::new(1, 0.0, 8.0, "fast", 10.0)),
        ]
    }

    #[test]
    fn test_from_locations() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        for i in 0..dm.size() {
            for j in 0..dm.size() {
                assert!((dm.get(i, j) - dm.get(j, i)).abs() < 1e-10);
            }
        }
    }
}
