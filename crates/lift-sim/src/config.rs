//! Building configuration and the fixed scenario constants.

use crate::{SimError, SimResult};

/// Riders destined for each floor over one simulated day.
pub const POPULATION_PER_FLOOR: u32 = 100;

/// Maximum riders per car.
pub const ELEVATOR_CAPACITY: usize = 10;

/// Shape of the building for one run.
///
/// Only `floors` and `elevators` come from the command line; the other two
/// fields default to the scenario constants and are overridden only to build
/// small, hand-checkable scenarios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingConfig {
    /// Floors above ground.  Destinations are `1..=floors`.
    pub floors: u32,

    /// Cars in the fleet, all starting idle at the ground floor.
    pub elevators: u32,

    /// Riders per floor; a day ends once every floor has received this many.
    pub population_per_floor: u32,

    /// Riders per car.  Never more than [`ELEVATOR_CAPACITY`].
    pub capacity: usize,
}

impl BuildingConfig {
    pub fn new(floors: u32, elevators: u32) -> Self {
        Self {
            floors,
            elevators,
            population_per_floor: POPULATION_PER_FLOOR,
            capacity:             ELEVATOR_CAPACITY,
        }
    }

    pub fn with_population(mut self, population_per_floor: u32) -> Self {
        self.population_per_floor = population_per_floor;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Total riders generated per day.
    pub fn riders_per_day(&self) -> u64 {
        self.floors as u64 * self.population_per_floor as u64
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.floors == 0 {
            return Err(SimError::Config("building needs at least one floor".into()));
        }
        if self.elevators == 0 {
            return Err(SimError::Config("building needs at least one elevator".into()));
        }
        if self.population_per_floor == 0 {
            return Err(SimError::Config("population per floor must be positive".into()));
        }
        if self.capacity == 0 || self.capacity > ELEVATOR_CAPACITY {
            return Err(SimError::Config(format!(
                "capacity {} outside 1..={ELEVATOR_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }
}
