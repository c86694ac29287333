//! The building: lobby queue, fleet, delivered riders, and the per-tick
//! dispatch sequence.

use std::collections::VecDeque;

use lift_core::{ElevatorId, SimClock, Tick};

use crate::config::BuildingConfig;
use crate::elevator::{Elevator, ElevatorState};
use crate::passenger::Passenger;
use crate::timing::boarding_time;
use crate::{SimError, SimResult};

/// What happened during one call to [`Building::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:      Tick,
    /// Lobby queue length at the start of the tick.
    pub waiting:   usize,
    pub boarded:   usize,
    pub delivered: usize,
}

/// All state for one simulated day.
///
/// Every rider handed to [`enqueue`][Self::enqueue] is, at any instant, in
/// exactly one of: the lobby queue, one car, or one floor's delivered list.
pub struct Building {
    config:      BuildingConfig,
    clock:       SimClock,
    waiting:     VecDeque<Passenger>,
    elevators:   Vec<Elevator>,
    /// `floors[i]` holds riders delivered to floor `i + 1`.
    floors:      Vec<Vec<Passenger>>,
    max_waiting: usize,
}

impl Building {
    pub fn new(config: &BuildingConfig) -> SimResult<Self> {
        config.validate()?;
        let elevators = (0..config.elevators)
            .map(|i| Elevator::new(ElevatorId(i), config.capacity))
            .collect();
        let floors = (0..config.floors)
            .map(|_| Vec::with_capacity(config.population_per_floor as usize))
            .collect();
        Ok(Self {
            config: config.clone(),
            clock: SimClock::new(),
            waiting: VecDeque::new(),
            elevators,
            floors,
            max_waiting: 0,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &BuildingConfig {
        &self.config
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn floors(&self) -> &[Vec<Passenger>] {
        &self.floors
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Largest lobby queue seen at the start of any tick so far.
    pub fn max_waiting(&self) -> usize {
        self.max_waiting
    }

    /// Riders currently inside a car.
    pub fn in_flight(&self) -> usize {
        self.elevators.iter().map(|e| e.occupants().len()).sum()
    }

    pub fn delivered_count(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }

    /// Every rider the building knows about, wherever they are.
    pub fn passenger_count(&self) -> usize {
        self.waiting.len() + self.in_flight() + self.delivered_count()
    }

    /// True once every floor has received its full population.
    pub fn all_floors_full(&self) -> bool {
        let quota = self.config.population_per_floor as usize;
        self.floors.iter().all(|f| f.len() >= quota)
    }

    /// Normalized delay of every delivered rider, floor by floor.
    pub fn normalized_delays(&self) -> Vec<f64> {
        self.floors
            .iter()
            .flatten()
            .filter_map(Passenger::normalized_delay)
            .collect()
    }

    pub fn stop_counts(&self) -> Vec<u64> {
        self.elevators.iter().map(Elevator::total_stops).collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Put a new arrival at the back of the lobby queue.
    pub fn enqueue(&mut self, passenger: Passenger) {
        self.waiting.push_back(passenger);
    }

    /// Advance the building by one tick.
    ///
    /// ```text
    /// ① record the lobby queue length
    /// ② load   — idle ground-floor cars take riders round-robin, then leave
    /// ③ unload — cars whose cursor is exactly now let riders off
    /// ④ clock += 1
    /// ```
    pub fn tick(&mut self) -> SimResult<TickSummary> {
        let now = self.now();
        let waiting = self.waiting.len();
        self.max_waiting = self.max_waiting.max(waiting);

        let boarded = self.load(now)?;
        let delivered = self.unload(now)?;

        self.clock.advance();
        Ok(TickSummary { tick: now, waiting, boarded, delivered })
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn load(&mut self, now: Tick) -> SimResult<usize> {
        if self.waiting.is_empty() {
            return Ok(0);
        }

        let eligible: Vec<usize> = self
            .elevators
            .iter()
            .enumerate()
            .filter(|(_, e)| e.can_board(now))
            .map(|(i, _)| i)
            .collect();

        // One rider per car per pass, until the queue or the room runs out.
        let mut boarded = 0;
        let mut progress = true;
        while progress {
            progress = false;
            for &i in &eligible {
                let car = &mut self.elevators[i];
                if !car.has_room() {
                    continue;
                }
                let Some(rider) = self.waiting.pop_front() else {
                    break;
                };
                if let Err(rider) = car.board(rider) {
                    self.waiting.push_front(rider);
                    continue;
                }
                boarded += 1;
                progress = true;
            }
        }

        for &i in &eligible {
            let car = &mut self.elevators[i];
            if !car.occupants().is_empty() {
                car.load_and_go(now)?;
                tracing::trace!(tick = now.0, car = %car, "departed");
            }
        }
        Ok(boarded)
    }

    fn unload(&mut self, now: Tick) -> SimResult<usize> {
        let mut delivered = 0;
        for car in &mut self.elevators {
            if car.state(now) != ElevatorState::AwaitingAction {
                continue;
            }
            let leaving = car.unload_and_go(now)?;
            let done_at = now + boarding_time(leaving.len());
            delivered += leaving.len();
            for mut rider in leaving {
                rider.complete(done_at);
                let floor = rider
                    .destination
                    .bucket()
                    .and_then(|b| self.floors.get_mut(b))
                    .ok_or(SimError::InvalidDestination(rider.destination))?;
                floor.push(rider);
            }
        }
        Ok(delivered)
    }
}
