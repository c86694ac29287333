//! A single rider.

use std::fmt;

use lift_core::{Floor, Tick};

use crate::timing::ideal_trip_time;

#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    pub destination: Floor,
    pub arrival:     Tick,
    completion:      Option<Tick>,
}

impl Passenger {
    pub fn new(destination: Floor, arrival: Tick) -> Self {
        Self { destination, arrival, completion: None }
    }

    /// The tick the rider stepped off at their floor, `None` while in transit.
    #[inline]
    pub fn completion(&self) -> Option<Tick> {
        self.completion
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    pub(crate) fn complete(&mut self, at: Tick) {
        debug_assert!(at >= self.arrival, "completion {at} before arrival {}", self.arrival);
        self.completion = Some(at);
    }

    /// Ticks from arrival in the lobby to stepping off.
    pub fn total_travel_time(&self) -> Option<u64> {
        self.completion.map(|done| done.since(self.arrival))
    }

    /// Excess trip time as a fraction of the ideal trip time.
    pub fn normalized_delay(&self) -> Option<f64> {
        let ideal = ideal_trip_time(self.destination) as f64;
        self.total_travel_time()
            .map(|total| (total as f64 - ideal) / ideal)
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.completion, self.total_travel_time(), self.normalized_delay()) {
            (Some(done), Some(total), Some(delay)) => write!(
                f,
                "destination {} | travel {} | arrived {} | completed {} | delay {:.5}",
                self.destination.0, total, self.arrival, done, delay
            ),
            _ => write!(
                f,
                "destination {} | arrived {} | in transit",
                self.destination.0, self.arrival
            ),
        }
    }
}
