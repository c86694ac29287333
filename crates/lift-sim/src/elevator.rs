//! A single car and its load / move / unload transitions.
//!
//! # Derived state
//!
//! The car carries no explicit state tag.  Its phase is read off
//! `(current_floor, time_cursor)` relative to the building clock:
//!
//! | Floor   | Cursor         | State                                    |
//! |---------|----------------|------------------------------------------|
//! | ground  | `<= now`       | `IdleAtGround` — may take riders          |
//! | above   | `== now`       | `AwaitingAction` — must unload this tick  |
//! | any     | otherwise      | `Dispatched` — boarding or travelling     |

use std::fmt;
use std::mem;

use lift_core::{ElevatorId, Floor, Tick};

use crate::passenger::Passenger;
use crate::timing::{boarding_time, travel_time};
use crate::{SimError, SimResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElevatorState {
    IdleAtGround,
    Dispatched,
    AwaitingAction,
}

#[derive(Clone, Debug)]
pub struct Elevator {
    pub id:        ElevatorId,
    capacity:      usize,
    current_floor: Floor,
    occupants:     Vec<Passenger>,
    /// Next tick at which this car can be acted on.
    time_cursor:   Tick,
    total_stops:   u64,
}

impl Elevator {
    /// An empty car idle at the ground floor.
    pub fn new(id: ElevatorId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            current_floor: Floor::GROUND,
            occupants:     Vec::with_capacity(capacity),
            time_cursor:   Tick::ZERO,
            total_stops:   0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    #[inline]
    pub fn occupants(&self) -> &[Passenger] {
        &self.occupants
    }

    #[inline]
    pub fn time_cursor(&self) -> Tick {
        self.time_cursor
    }

    #[inline]
    pub fn total_stops(&self) -> u64 {
        self.total_stops
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.occupants.len() < self.capacity
    }

    pub fn state(&self, now: Tick) -> ElevatorState {
        if self.current_floor.is_ground() {
            if self.time_cursor <= now {
                ElevatorState::IdleAtGround
            } else {
                ElevatorState::Dispatched
            }
        } else if self.time_cursor == now {
            ElevatorState::AwaitingAction
        } else {
            ElevatorState::Dispatched
        }
    }

    /// Idle at the ground floor with at least one free place.
    #[inline]
    pub fn can_board(&self, now: Tick) -> bool {
        self.state(now) == ElevatorState::IdleAtGround && self.has_room()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Take one rider on board.  A full car hands the rider back.
    pub fn board(&mut self, passenger: Passenger) -> Result<(), Passenger> {
        if !self.has_room() {
            return Err(passenger);
        }
        self.occupants.push(passenger);
        Ok(())
    }

    /// Close the doors on whoever boarded and head for the first stop.
    pub fn load_and_go(&mut self, now: Tick) -> SimResult<()> {
        self.time_cursor = now + boarding_time(self.occupants.len());
        self.advance()
    }

    /// Let off everyone bound for this floor and head for the next stop.
    ///
    /// Returns the riders who got off, in boarding order.
    pub fn unload_and_go(&mut self, now: Tick) -> SimResult<Vec<Passenger>> {
        let floor = self.current_floor;
        let (leaving, staying): (Vec<Passenger>, Vec<Passenger>) = mem::take(&mut self.occupants)
            .into_iter()
            .partition(|p| p.destination == floor);
        self.occupants = staying;
        self.time_cursor = now + boarding_time(self.occupants.len());
        self.advance()?;
        Ok(leaving)
    }

    /// Move to the lowest destination on board, or home to the ground floor
    /// when empty.  Every call counts as one stop.
    pub fn advance(&mut self) -> SimResult<()> {
        self.total_stops += 1;

        let Some(target) = self.occupants.iter().map(|p| p.destination).min() else {
            self.time_cursor = self.time_cursor + travel_time(self.current_floor.0);
            self.current_floor = Floor::GROUND;
            return Ok(());
        };

        let Some(rise) = self.current_floor.rise_to(target) else {
            tracing::error!(
                elevator = self.id.0,
                from = self.current_floor.0,
                to = target.0,
                "negative travel height"
            );
            return Err(SimError::InvalidFloorHeight {
                elevator: self.id,
                from:     self.current_floor,
                to:       target,
            });
        };
        self.time_cursor = self.time_cursor + travel_time(rise);
        self.current_floor = target;
        Ok(())
    }
}

impl fmt::Display for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at floor {} until {} carrying [",
            self.id, self.current_floor.0, self.time_cursor
        )?;
        for (i, p) in self.occupants.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", p.destination.0)?;
        }
        write!(f, "]")
    }
}
