//! Travel and boarding durations, in ticks.

use lift_core::Floor;

use crate::config::ELEVATOR_CAPACITY;

/// Ticks to climb a single floor, including acceleration and braking.
const ONE_FLOOR_TICKS: u64 = 8;

/// Ticks per additional floor once the car is cruising.
const CRUISE_FLOOR_TICKS: u64 = 5;

/// Boarding time for a full car.
const FULL_CAR_BOARDING_TICKS: u64 = 22;

/// Ticks to travel `h` floors.
///
/// ```text
/// h = 0  →  0
/// h = 1  →  8
/// h ≥ 2  →  16 + 5·(h − 2)
/// ```
#[inline]
pub fn travel_time(h: u32) -> u64 {
    match h {
        0 => 0,
        1 => ONE_FLOOR_TICKS,
        h => 2 * ONE_FLOOR_TICKS + CRUISE_FLOOR_TICKS * (h as u64 - 2),
    }
}

/// Ticks for `n` riders to get on or off: `1 + 2n`, flat 22 for a full car.
#[inline]
pub fn boarding_time(n: usize) -> u64 {
    if n == ELEVATOR_CAPACITY {
        FULL_CAR_BOARDING_TICKS
    } else {
        1 + 2 * n as u64
    }
}

/// Best possible trip to `destination`: board alone, ride straight up, get
/// off alone.
#[inline]
pub fn ideal_trip_time(destination: Floor) -> u64 {
    travel_time(destination.0) + 2 * boarding_time(1)
}
