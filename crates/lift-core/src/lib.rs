//! `lift-core` — foundational types for the elevator-bank simulator.
//!
//! This crate has no simulator dependencies and minimal external ones
//! (`rand`, `csv`, `thiserror`).  Everything here is independent of
//! how a building is laid out or how elevators are dispatched.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `ElevatorId`, `Floor`                                     |
//! | [`time`]        | `Tick`, `SimClock`                                        |
//! | [`deviates`]    | `DeviateSource` trait, `DeviateStream`, `DeviateSeq`, inverse-CDF samplers |
//! | [`rng`]         | `SimRng` (seeded deviate source), `write_deviates`        |
//! | [`stats`]       | `OnlineStats` (Welford mean / sample variance)            |
//! | [`error`]       | `LiftError`, `LiftResult`                                 |

pub mod deviates;
pub mod error;
pub mod ids;
pub mod rng;
pub mod stats;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use deviates::{DeviateSeq, DeviateSource, DeviateStream};
pub use error::{LiftError, LiftResult};
pub use ids::{ElevatorId, Floor};
pub use rng::{SimRng, write_deviates};
pub use stats::OnlineStats;
pub use time::{SimClock, Tick};
