//! `lift-sim` — elevator-bank dispatch and the day loop.
//!
//! # Day loop
//!
//! ```text
//! while some floor has not received its population:
//!   ① Gap      — draw the time to the next group if none is pending.
//!   ② Arrivals — once the gap has elapsed, draw a group size and give each
//!                rider a random floor that still has room.
//!   ③ Tick     — Building::tick:
//!                  record queue length
//!                  load idle ground-floor cars round-robin, send them up
//!                  unload cars whose cursor is exactly now
//!                  advance the clock
//! ```
//!
//! Days are independent; [`Experiment`] runs them back to back on one
//! deviate source and pools stop counts and delays into a [`Report`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::DeviateStream;
//! use lift_sim::{BuildingConfig, Experiment, NoopObserver};
//!
//! let mut source = DeviateStream::open(path)?;
//! let report = Experiment::new(BuildingConfig::new(12, 4), 10)?
//!     .run(&mut source, &mut NoopObserver)?;
//! println!("{report}");
//! ```

pub mod building;
pub mod config;
pub mod day;
pub mod elevator;
pub mod error;
pub mod experiment;
pub mod observer;
pub mod passenger;
pub mod timing;

#[cfg(test)]
mod tests;

pub use building::{Building, TickSummary};
pub use config::{BuildingConfig, ELEVATOR_CAPACITY, POPULATION_PER_FLOOR};
pub use day::{DayOutcome, DaySim};
pub use elevator::{Elevator, ElevatorState};
pub use error::{SimError, SimResult};
pub use experiment::{Experiment, Report};
pub use observer::{DayObserver, NoopObserver};
pub use passenger::Passenger;
