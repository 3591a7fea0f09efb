//! Route: an ordered sequence of stops for one vehicle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Location;

/// An ordered sequence of stops assigned to a single vehicle.
///
/// A finalized route is either empty or starts and ends at the same depot;
/// interior stops are customers interleaved with any stations inserted by
/// the refueling repair.
///
/// # Examples
///
/// ```
/// use gvrp::models::{Customer, Depot, Location, Route};
///
/// let depot = Location::from(Depot::new(1, 0.0, 0.0));
/// let mut route = Route::new(vec![depot.clone(), depot]);
/// route.insert(1, Location::from(Customer::new(1, 5.0, 5.0, 3)));
/// assert!(route.is_closed());
/// assert_eq!(route.num_customers(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<Location>,
}

impl Route {
    /// Creates a route from an initial stop sequence.
    pub fn new(stops: Vec<Location>) -> Self {
        Self { stops }
    }

    /// Creates a route with no stops (an unused vehicle).
    pub fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    /// The ordered stops.
    pub fn stops(&self) -> &[Location] {
        &self.stops
    }

    /// Number of stops (depots and stations included).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// First stop, if any.
    pub fn first(&self) -> Option<&Location> {
        self.stops.first()
    }

    /// Last stop, if any.
    pub fn last(&self) -> Option<&Location> {
        self.stops.last()
    }

    /// Stop at the given index.
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.stops.get(index)
    }

    /// Appends a stop at the end.
    pub fn push(&mut self, stop: Location) {
        self.stops.push(stop);
    }

    /// Inserts a stop at the given index, shifting later stops right.
    pub fn insert(&mut self, index: usize, stop: Location) {
        self.stops.insert(index, stop);
    }

    /// Removes and returns the stop at the given index.
    pub fn remove(&mut self, index: usize) -> Location {
        self.stops.remove(index)
    }

    /// Returns `true` if the route is non-empty and its first and last stop
    /// are the same location.
    pub fn is_closed(&self) -> bool {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => self.stops.len() >= 2 && first == last,
            _ => false,
        }
    }

    /// Closes the route by appending its first stop when it is still open.
    pub fn close(&mut self) {
        if let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) {
            if first != last {
                let start = first.clone();
                self.stops.push(start);
            }
        }
    }

    /// Number of customer stops in this route.
    pub fn num_customers(&self) -> usize {
        self.stops.iter().filter(|s| s.is_customer()).count()
    }

    /// IDs of the customers visited, in stop order.
    pub fn customer_ids(&self) -> Vec<u32> {
        self.stops
            .iter()
            .filter(|s| s.is_customer())
            .map(|s| s.id())
            .collect()
    }

    /// Returns `true` if any stop is a customer.
    pub fn serves_customers(&self) -> bool {
        self.stops.iter().any(|s| s.is_customer())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for stop in &self.stops {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{stop}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargingStation, Customer, Depot};

    fn depot() -> Location {
        Location::from(Depot::new(1, 0.0, 0.0))
    }

    #[test]
    fn test_empty_route() {
        let r = Route::empty();
        assert!(r.is_empty());
        assert!(!r.is_closed());
        assert_eq!(r.num_customers(), 0);
    }

    #[test]
    fn test_close_open_route() {
        let mut r = Route::new(vec![depot(), Location::from(Customer::new(1, 5.0, 5.0, 2))]);
        assert!(!r.is_closed());
        r.close();
        assert!(r.is_closed());
        assert_eq!(r.len(), 3);
        // Closing again is a no-op.
        r.close();
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_single_stop_is_not_closed() {
        let r = Route::new(vec![depot()]);
        assert!(!r.is_closed());
    }

    #[test]
    fn test_customer_queries() {
        let mut r = Route::new(vec![depot(), depot()]);
        r.insert(1, Location::from(Customer::new(2, 1.0, 1.0, 1)));
        r.insert(2, Location::from(ChargingStation::new(1, 2.0, 2.0, "fast", 5.0)));
        r.insert(3, Location::from(Customer::new(5, 3.0, 3.0, 1)));
        assert_eq!(r.num_customers(), 2);
        assert_eq!(r.customer_ids(), vec![2, 5]);
        assert!(r.serves_customers());
    }

    #[test]
    fn test_display() {
        let mut r = Route::new(vec![depot(), depot()]);
        r.insert(1, Location::from(Customer::new(2, 1.0, 1.0, 1)));
        assert_eq!(r.to_string(), "Depot 1 -> Customer 2 -> Depot 1");
    }
}
