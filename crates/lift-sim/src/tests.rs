//! Unit and scenario tests for lift-sim.

use lift_core::{DeviateSeq, ElevatorId, Floor, SimRng, Tick};

use crate::{Building, BuildingConfig, DayObserver, DayOutcome, Passenger, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two floors, one car, one rider per floor.
fn tiny_config() -> BuildingConfig {
    BuildingConfig::new(2, 1).with_population(1)
}

/// Deviates that pin the gap to 2 ticks, groups to 2 riders, and always pick
/// the lowest open floor.
fn all_zero() -> DeviateSeq {
    DeviateSeq::repeat(0.0, 500)
}

fn rider(floor: u32, at: u64) -> Passenger {
    Passenger::new(Floor(floor), Tick(at))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

/// Observer that counts callbacks.
#[derive(Default)]
struct Counter {
    groups:    usize,
    placed:    u32,
    ticks:     usize,
    days:      usize,
    max_queue: usize,
}

impl DayObserver for Counter {
    fn on_group_arrival(&mut self, _tick: Tick, _size: u32, placed: u32) {
        self.groups += 1;
        self.placed += placed;
    }
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.ticks += 1;
        self.max_queue = self.max_queue.max(summary.waiting);
    }
    fn on_day_end(&mut self, _outcome: &DayOutcome) {
        self.days += 1;
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timing {
    use lift_core::Floor;

    use crate::timing::{boarding_time, ideal_trip_time, travel_time};

    #[test]
    fn travel_times() {
        assert_eq!(travel_time(0), 0);
        assert_eq!(travel_time(1), 8);
        assert_eq!(travel_time(2), 16);
        assert_eq!(travel_time(3), 21);
        assert_eq!(travel_time(5), 31);
    }

    #[test]
    fn boarding_times() {
        assert_eq!(boarding_time(10), 22);
        assert_eq!(boarding_time(3), 7);
        for n in 0..10 {
            assert_eq!(boarding_time(n), 1 + 2 * n as u64);
        }
    }

    #[test]
    fn ideal_trip_is_travel_plus_two_single_boardings() {
        assert_eq!(ideal_trip_time(Floor(1)), 14);
        assert_eq!(ideal_trip_time(Floor(2)), 22);
        assert_eq!(ideal_trip_time(Floor(4)), 32);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{BuildingConfig, ELEVATOR_CAPACITY, POPULATION_PER_FLOOR, SimError};

    #[test]
    fn defaults_use_scenario_constants() {
        let cfg = BuildingConfig::new(5, 2);
        assert_eq!(cfg.population_per_floor, POPULATION_PER_FLOOR);
        assert_eq!(cfg.capacity, ELEVATOR_CAPACITY);
        assert_eq!(cfg.riders_per_day(), 500);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_empty_building() {
        assert!(matches!(BuildingConfig::new(0, 2).validate(), Err(SimError::Config(_))));
        assert!(matches!(BuildingConfig::new(3, 0).validate(), Err(SimError::Config(_))));
        assert!(BuildingConfig::new(3, 1).with_population(0).validate().is_err());
    }

    #[test]
    fn rejects_oversized_car() {
        let cfg = BuildingConfig::new(3, 1).with_capacity(ELEVATOR_CAPACITY + 1);
        assert!(cfg.validate().is_err());
        assert!(BuildingConfig::new(3, 1).with_capacity(0).validate().is_err());
    }
}

// ── Passenger ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod passenger {
    use super::*;

    #[test]
    fn new_rider_is_in_transit() {
        let p = rider(3, 5);
        assert!(!p.is_complete());
        assert_eq!(p.completion(), None);
        assert_eq!(p.total_travel_time(), None);
        assert_eq!(p.normalized_delay(), None);
        assert!(p.to_string().contains("in transit"));
    }

    #[test]
    fn delay_relative_to_ideal_trip() {
        let mut p = rider(1, 2);
        p.complete(Tick(18));
        assert_eq!(p.total_travel_time(), Some(16));
        assert!(approx(p.normalized_delay().unwrap(), 2.0 / 14.0));
    }

    #[test]
    fn ideal_trip_has_zero_delay() {
        let mut p = rider(2, 10);
        p.complete(Tick(32));
        assert!(approx(p.normalized_delay().unwrap(), 0.0));
        assert!(p.to_string().contains("delay 0.00000"));
    }
}

// ── Elevator ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod elevator {
    use super::*;
    use crate::{Elevator, ElevatorState, SimError};

    fn car() -> Elevator {
        Elevator::new(ElevatorId(0), 10)
    }

    #[test]
    fn starts_idle_at_ground() {
        let e = car();
        assert_eq!(e.current_floor(), Floor::GROUND);
        assert_eq!(e.state(Tick(0)), ElevatorState::IdleAtGround);
        assert!(e.can_board(Tick(0)));
        assert_eq!(e.total_stops(), 0);
    }

    #[test]
    fn full_car_refuses_boarding() {
        let mut e = Elevator::new(ElevatorId(0), 2);
        assert!(e.board(rider(1, 0)).is_ok());
        assert!(e.board(rider(2, 0)).is_ok());
        let bounced = e.board(rider(3, 0)).unwrap_err();
        assert_eq!(bounced.destination, Floor(3));
        assert_eq!(e.occupants().len(), 2);
        assert!(!e.can_board(Tick(0)));
    }

    #[test]
    fn load_goes_to_lowest_destination() {
        let mut e = car();
        e.board(rider(2, 0)).unwrap();
        e.board(rider(1, 0)).unwrap();
        e.load_and_go(Tick(2)).unwrap();

        // 2 + boarding(2) + travel(1)
        assert_eq!(e.time_cursor(), Tick(15));
        assert_eq!(e.current_floor(), Floor(1));
        assert_eq!(e.total_stops(), 1);
        assert_eq!(e.state(Tick(14)), ElevatorState::Dispatched);
        assert_eq!(e.state(Tick(15)), ElevatorState::AwaitingAction);
        assert_eq!(e.state(Tick(16)), ElevatorState::Dispatched);
    }

    #[test]
    fn unload_drops_only_this_floor_then_returns_home() {
        let mut e = car();
        e.board(rider(2, 0)).unwrap();
        e.board(rider(1, 0)).unwrap();
        e.load_and_go(Tick(2)).unwrap();

        let off = e.unload_and_go(Tick(15)).unwrap();
        assert_eq!(off.len(), 1);
        assert_eq!(off[0].destination, Floor(1));
        // 15 + boarding(1) + travel(1)
        assert_eq!(e.time_cursor(), Tick(26));
        assert_eq!(e.current_floor(), Floor(2));

        let off = e.unload_and_go(Tick(26)).unwrap();
        assert_eq!(off.len(), 1);
        assert!(e.occupants().is_empty());
        // 26 + boarding(0) + travel(2) back down
        assert_eq!(e.time_cursor(), Tick(43));
        assert_eq!(e.current_floor(), Floor::GROUND);
        assert_eq!(e.total_stops(), 3);
        assert_eq!(e.state(Tick(42)), ElevatorState::Dispatched);
        assert_eq!(e.state(Tick(43)), ElevatorState::IdleAtGround);
    }

    #[test]
    fn unload_keeps_boarding_order() {
        let mut e = car();
        for f in [3, 3, 5, 3] {
            e.board(rider(f, 0)).unwrap();
        }
        e.load_and_go(Tick(0)).unwrap();
        let now = e.time_cursor();
        let off = e.unload_and_go(now).unwrap();
        assert_eq!(off.len(), 3);
        assert_eq!(e.occupants().len(), 1);
        assert_eq!(e.current_floor(), Floor(5));
    }

    #[test]
    fn moving_down_to_a_rider_is_an_error() {
        let mut e = car();
        e.board(rider(3, 0)).unwrap();
        e.load_and_go(Tick(0)).unwrap();
        assert_eq!(e.current_floor(), Floor(3));

        // Nobody boards above ground in a real run; force it here.
        e.board(rider(1, 0)).unwrap();
        let now = e.time_cursor();
        let err = e.unload_and_go(now).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidFloorHeight { from: Floor(3), to: Floor(1), .. }
        ));
    }

    #[test]
    fn display_lists_destinations() {
        let mut e = car();
        e.board(rider(4, 0)).unwrap();
        e.board(rider(2, 0)).unwrap();
        assert_eq!(e.to_string(), "ElevatorId(0) at floor 0 until T0 carrying [4 2]");
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod building {
    use super::*;
    use crate::ElevatorState;

    #[test]
    fn load_round_robins_across_idle_cars() {
        let mut b = Building::new(&BuildingConfig::new(5, 2)).unwrap();
        for f in [1, 2, 3] {
            b.enqueue(rider(f, 0));
        }
        let summary = b.tick().unwrap();
        assert_eq!(summary.boarded, 3);
        assert_eq!(summary.waiting, 3);
        assert_eq!(b.waiting_len(), 0);

        let first: Vec<u32> = b.elevators()[0].occupants().iter().map(|p| p.destination.0).collect();
        let second: Vec<u32> = b.elevators()[1].occupants().iter().map(|p| p.destination.0).collect();
        assert_eq!(first, vec![1, 3]);
        assert_eq!(second, vec![2]);
        assert_eq!(b.now(), Tick(1));
    }

    #[test]
    fn overflow_stays_in_lobby() {
        let mut b = Building::new(&BuildingConfig::new(3, 1)).unwrap();
        for _ in 0..12 {
            b.enqueue(rider(2, 0));
        }
        b.tick().unwrap();
        let car = &b.elevators()[0];
        assert_eq!(car.occupants().len(), 10);
        assert_eq!(b.waiting_len(), 2);
        // 0 + boarding(10) + travel(2)
        assert_eq!(car.time_cursor(), Tick(38));
        assert_eq!(b.max_waiting(), 12);

        // The car is away; the two left behind keep waiting.
        let summary = b.tick().unwrap();
        assert_eq!(summary.boarded, 0);
        assert_eq!(b.waiting_len(), 2);
        assert_eq!(b.passenger_count(), 12);
    }

    #[test]
    fn delivers_with_completion_after_unload() {
        let mut b = Building::new(&tiny_config()).unwrap();
        b.enqueue(rider(1, 0));
        b.enqueue(rider(2, 0));

        while !b.all_floors_full() {
            b.tick().unwrap();
        }

        let floor1 = &b.floors()[0][0];
        let floor2 = &b.floors()[1][0];
        // Leaves at 0 + 5 + 8 = 13, off by 13 + boarding(1).
        assert_eq!(floor1.completion(), Some(Tick(16)));
        // 13 + 3 + 8 = 24, off by 24 + boarding(1).
        assert_eq!(floor2.completion(), Some(Tick(27)));
        assert_eq!(b.now(), Tick(25));
        assert_eq!(b.stop_counts(), vec![3]);
        assert_eq!(b.elevators()[0].state(Tick(41)), ElevatorState::IdleAtGround);

        let delays = b.normalized_delays();
        assert!(approx(delays[0], 2.0 / 14.0));
        assert!(approx(delays[1], 5.0 / 22.0));
    }

    #[test]
    fn riders_sharing_a_floor_leave_together() {
        let mut b = Building::new(&BuildingConfig::new(1, 1).with_population(2)).unwrap();
        b.enqueue(rider(1, 0));
        b.enqueue(rider(1, 0));
        while !b.all_floors_full() {
            b.tick().unwrap();
        }
        // Leaves at 0 + 5 + 8 = 13, both off by 13 + boarding(2).
        for p in &b.floors()[0] {
            assert_eq!(p.completion(), Some(Tick(18)));
        }
    }

    #[test]
    fn empty_lobby_tick_only_advances_clock() {
        let mut b = Building::new(&tiny_config()).unwrap();
        let summary = b.tick().unwrap();
        assert_eq!(summary, TickSummary { tick: Tick(0), waiting: 0, boarded: 0, delivered: 0 });
        assert_eq!(b.stop_counts(), vec![0]);
        assert_eq!(b.now(), Tick(1));
    }
}

// ── Day ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod day {
    use lift_core::{DeviateSource, LiftError};

    use super::*;
    use crate::{DaySim, NoopObserver, SimError};

    #[test]
    fn minimal_day_is_hand_checkable() {
        let mut source = all_zero();
        let mut sim = DaySim::new(&tiny_config(), 0).unwrap();
        let outcome = sim.run(&mut source, &mut NoopObserver).unwrap();

        assert_eq!(outcome.passengers, 2);
        assert_eq!(outcome.stops, vec![3]);
        assert_eq!(outcome.max_waiting, 2);
        assert_eq!(outcome.final_tick, Tick(27));
        assert_eq!(outcome.delays.len(), 2);
        // Group arrives at T2; floor 1 off at 18, floor 2 off at 29.
        assert!(approx(outcome.delays[0], 2.0 / 14.0));
        assert!(approx(outcome.delays[1], 5.0 / 22.0));

        let floors = sim.building().floors();
        assert_eq!(floors[0].len(), 1);
        assert_eq!(floors[1].len(), 1);
        assert!(sim.is_finished());
    }

    #[test]
    fn finished_day_draws_nothing_more() {
        let mut source = all_zero();
        let mut sim = DaySim::new(&tiny_config(), 0).unwrap();
        sim.run(&mut source, &mut NoopObserver).unwrap();
        let drawn = source.drawn();
        assert!(!sim.step(&mut source, &mut NoopObserver).unwrap());
        assert_eq!(source.drawn(), drawn);
    }

    #[test]
    fn observer_sees_groups_ticks_and_end() {
        let mut counter = Counter::default();
        let mut sim = DaySim::new(&tiny_config(), 0).unwrap();
        sim.run(&mut all_zero(), &mut counter).unwrap();

        assert_eq!(counter.ticks, 27);
        assert_eq!(counter.placed, 2);
        assert!(counter.groups >= 1);
        assert_eq!(counter.max_queue, 2);
        assert_eq!(counter.days, 1);
    }

    #[test]
    fn exhaustion_is_fatal() {
        let mut source = DeviateSeq::repeat(0.0, 3);
        let mut sim = DaySim::new(&tiny_config(), 0).unwrap();
        let err = sim.run(&mut source, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Source(LiftError::Exhausted { drawn: 3 })));
    }

    #[test]
    fn every_floor_receives_exactly_its_population() {
        let config = BuildingConfig::new(4, 2).with_population(7);
        let mut sim = DaySim::new(&config, 0).unwrap();
        let outcome = sim.run(&mut SimRng::new(3), &mut NoopObserver).unwrap();

        assert_eq!(outcome.passengers, 28);
        assert_eq!(outcome.delays.len(), 28);
        for floor in sim.building().floors() {
            assert_eq!(floor.len(), 7);
        }
        assert_eq!(sim.building().waiting_len(), 0);
        assert_eq!(sim.building().in_flight(), 0);
    }

    #[test]
    fn riders_are_conserved_every_tick() {
        let config = BuildingConfig::new(6, 3).with_population(15);
        let mut sim = DaySim::new(&config, 0).unwrap();
        let mut source = SimRng::new(11);

        while sim.step(&mut source, &mut NoopObserver).unwrap() {
            let b = sim.building();
            assert_eq!(b.passenger_count() as u64, sim.generated());
            for car in b.elevators() {
                assert!(car.occupants().len() <= config.capacity);
            }
            for p in b.floors().iter().flatten() {
                assert!(p.completion().unwrap() >= p.arrival);
            }
        }
        assert_eq!(sim.generated(), config.riders_per_day());
    }

    #[test]
    fn identical_prefix_gives_identical_day() {
        let config = BuildingConfig::new(5, 2).with_population(20);
        let first = DaySim::new(&config, 0)
            .unwrap()
            .run(&mut SimRng::new(42), &mut NoopObserver)
            .unwrap();
        let second = DaySim::new(&config, 0)
            .unwrap()
            .run(&mut SimRng::new(42), &mut NoopObserver)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn delays_are_never_negative() {
        let config = BuildingConfig::new(8, 3).with_population(10);
        let outcome = DaySim::new(&config, 0)
            .unwrap()
            .run(&mut SimRng::new(5), &mut NoopObserver)
            .unwrap();
        assert!(outcome.delays.iter().all(|&d| d >= 0.0));
    }
}

// ── Experiment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod experiment {
    use lift_core::{LiftError, OnlineStats};

    use super::*;
    use crate::{Experiment, NoopObserver, Report, SimError};

    #[test]
    fn zero_days_rejected() {
        assert!(matches!(Experiment::new(tiny_config(), 0), Err(SimError::Config(_))));
    }

    #[test]
    fn pools_stops_and_delays_across_days() {
        let mut counter = Counter::default();
        let report = Experiment::new(tiny_config(), 2)
            .unwrap()
            .run(&mut all_zero(), &mut counter)
            .unwrap();

        let expected: OnlineStats = [2.0 / 14.0, 5.0 / 22.0, 2.0 / 14.0, 5.0 / 22.0]
            .into_iter()
            .collect();
        assert_eq!(report.days, 2);
        assert_eq!(report.avg_stops, Some(3.0));
        assert_eq!(report.max_queue, 2);
        assert!(approx(report.avg_delay.unwrap(), expected.mean().unwrap()));
        assert!(approx(report.std_delay.unwrap(), expected.std_dev().unwrap()));
        assert_eq!(counter.days, 2);
    }

    #[test]
    fn exhaustion_on_a_later_day_aborts_the_run() {
        // Enough for the first day only.
        let mut first_day = all_zero();
        crate::DaySim::new(&tiny_config(), 0)
            .unwrap()
            .run(&mut first_day, &mut NoopObserver)
            .unwrap();
        let needed = lift_core::DeviateSource::drawn(&first_day) as usize;

        let mut source = DeviateSeq::repeat(0.0, needed + 1);
        let err = Experiment::new(tiny_config(), 2)
            .unwrap()
            .run(&mut source, &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, SimError::Source(LiftError::Exhausted { .. })));
    }

    #[test]
    fn report_lines() {
        let report = Report {
            days:      3,
            avg_stops: Some(41.5),
            max_queue: 17,
            avg_delay: Some(0.123456789),
            std_delay: None,
        };
        assert_eq!(
            report.to_string(),
            "OUTPUT stops 41.50000\n\
             OUTPUT max qsize 17\n\
             OUTPUT average delay 0.12346\n\
             OUTPUT stddev delay nan"
        );
    }
}
