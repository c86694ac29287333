//! One simulated day: group arrivals feeding the building until every floor
//! has received its population.
//!
//! # Draw order
//!
//! Each loop iteration consumes deviates in this order, and only this order:
//!
//! ```text
//! gap        — when no gap is pending
//! group size — when the pending gap has elapsed
//! floor pick — once per rider in the group, while any floor is still open
//! ```

use lift_core::{DeviateSource, Floor, Tick};

use crate::building::Building;
use crate::config::BuildingConfig;
use crate::observer::DayObserver;
use crate::passenger::Passenger;
use crate::SimResult;

/// Everything a finished day contributes to the run's statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct DayOutcome {
    pub day:         u32,
    /// Normalized delay of every rider, floor by floor.
    pub delays:      Vec<f64>,
    /// Stops made by each car, in fleet order.
    pub stops:       Vec<u64>,
    pub max_waiting: usize,
    pub passengers:  u64,
    pub final_tick:  Tick,
}

/// Driver for a single day.
pub struct DaySim {
    day:        u32,
    building:   Building,
    /// Riders still to be assigned to each floor.
    remaining:  Vec<u32>,
    last_group: Tick,
    /// Gap to the next group; `None` means a new one must be drawn.
    next_gap:   Option<u64>,
    generated:  u64,
    finished:   bool,
}

impl DaySim {
    pub fn new(config: &BuildingConfig, day: u32) -> SimResult<Self> {
        let building = Building::new(config)?;
        Ok(Self {
            day,
            building,
            remaining:  vec![config.population_per_floor; config.floors as usize],
            last_group: Tick::ZERO,
            next_gap:   None,
            generated:  0,
            finished:   false,
        })
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    /// Riders created so far today.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run the day to completion.
    pub fn run<S, O>(&mut self, source: &mut S, observer: &mut O) -> SimResult<DayOutcome>
    where
        S: DeviateSource,
        O: DayObserver,
    {
        tracing::debug!(
            day = self.day,
            floors = self.building.config().floors,
            elevators = self.building.config().elevators,
            "day started"
        );

        while self.step(source, observer)? {}

        let outcome = self.outcome();
        tracing::debug!(
            day = self.day,
            clock = %self.building.clock(),
            passengers = outcome.passengers,
            max_waiting = outcome.max_waiting,
            "day finished"
        );
        observer.on_day_end(&outcome);
        Ok(outcome)
    }

    /// One iteration of the day loop: maybe admit a group, then tick the
    /// building unless every floor is already full.
    ///
    /// Returns `false` when the day ends; later calls draw nothing.
    pub fn step<S, O>(&mut self, source: &mut S, observer: &mut O) -> SimResult<bool>
    where
        S: DeviateSource,
        O: DayObserver,
    {
        if self.finished {
            return Ok(false);
        }

        let now = self.building.now();
        let gap = match self.next_gap {
            Some(gap) => gap,
            None => {
                let gap = source.arrival_gap()?;
                self.next_gap = Some(gap);
                gap
            }
        };

        if now.since(self.last_group) >= gap {
            self.last_group = now;
            self.next_gap = None;
            let size = source.group_size()?;
            let placed = self.admit_group(now, size, source)?;
            tracing::trace!(day = self.day, tick = now.0, size, placed, "group arrived");
            observer.on_group_arrival(now, size, placed);
        }

        if self.building.all_floors_full() {
            self.finished = true;
            return Ok(false);
        }

        let summary = self.building.tick()?;
        observer.on_tick_end(&summary);
        Ok(true)
    }

    /// Statistics for the day so far.
    pub fn outcome(&self) -> DayOutcome {
        DayOutcome {
            day:         self.day,
            delays:      self.building.normalized_delays(),
            stops:       self.building.stop_counts(),
            max_waiting: self.building.max_waiting(),
            passengers:  self.generated,
            final_tick:  self.building.now(),
        }
    }

    /// Give each rider of the group a random still-open floor and queue them.
    fn admit_group<S: DeviateSource>(
        &mut self,
        now:    Tick,
        size:   u32,
        source: &mut S,
    ) -> SimResult<u32> {
        let mut placed = 0;
        for _ in 0..size {
            let open: Vec<usize> = self
                .remaining
                .iter()
                .enumerate()
                .filter(|&(_, &left)| left > 0)
                .map(|(i, _)| i)
                .collect();
            if open.is_empty() {
                continue;
            }

            let floor = open[source.pick_index(open.len())?];
            self.remaining[floor] -= 1;
            self.building.enqueue(Passenger::new(Floor(floor as u32 + 1), now));
            self.generated += 1;
            placed += 1;
        }
        Ok(placed)
    }
}
