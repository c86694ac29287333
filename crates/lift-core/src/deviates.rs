//! Deviate sources and the inverse-CDF samplers built on them.
//!
//! # Determinism
//!
//! Every random decision in a run draws from one [`DeviateSource`], in a
//! fixed order.  Given the same sequence of uniform(0, 1) values the whole
//! simulation is reproducible, so the source is passed explicitly (`&mut`)
//! to whoever needs it instead of living in a global.
//!
//! # Samplers
//!
//! | Method            | Distribution                                            |
//! |-------------------|---------------------------------------------------------|
//! | `arrival_gap`     | exponential(scale 10) truncated to [2, 90], floored     |
//! | `group_size`      | geometric(p 0.65) truncated to [1, 8], searched from 4  |
//! | `pick_index`      | uniform index in `0..n`                                 |

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};

use crate::{LiftError, LiftResult};

// ── Distribution constants ────────────────────────────────────────────────────

/// Success probability of the group-size geometric distribution.
pub const GEOMETRIC_P: f64 = 0.65;

/// Scale (mean) of the inter-arrival exponential distribution, in ticks.
pub const EXPONENTIAL_SCALE: f64 = 10.0;

/// Truncation bounds of the inter-arrival gap, in ticks.
pub const GAP_MIN: f64 = 2.0;
pub const GAP_MAX: f64 = 90.0;

/// Truncation bounds of the group-size distribution.
pub const GROUP_MIN: u32 = 1;
pub const GROUP_MAX: u32 = 8;

/// Where the group-size search starts.
const GROUP_SEARCH_START: u32 = 4;

/// Smallest group the search can return.
const GROUP_FLOOR: u32 = 2;

// ── Distribution math ─────────────────────────────────────────────────────────

/// `F(x) = 1 - e^(-x / 10)`.
#[inline]
pub fn exponential_cdf(x: f64) -> f64 {
    1.0 - std::f64::consts::E.powf(-x / EXPONENTIAL_SCALE)
}

/// `F⁻¹(u) = -10 · ln(1 - u)`.
#[inline]
pub fn inverse_exponential_cdf(u: f64) -> f64 {
    -EXPONENTIAL_SCALE * (1.0 - u).ln()
}

/// `G(x) = 1 - (1 - p)^(x + 1)`.
#[inline]
pub fn geometric_cdf(x: u32) -> f64 {
    1.0 - (1.0 - GEOMETRIC_P).powi(x as i32 + 1)
}

/// `G` restricted to [`GROUP_MIN`, `GROUP_MAX`] and renormalised, so that
/// `T(1) = 0` and `T(8) = 1`.
#[inline]
pub fn truncated_geometric_cdf(x: u32) -> f64 {
    let lo = geometric_cdf(GROUP_MIN);
    let hi = geometric_cdf(GROUP_MAX);
    (geometric_cdf(x) - lo) / (hi - lo)
}

// ── DeviateSource ─────────────────────────────────────────────────────────────

/// A sequential cursor over uniform(0, 1) deviates.
///
/// Implementors only supply [`next_deviate`][Self::next_deviate]; the
/// samplers are provided on top of it and each consume exactly one value.
pub trait DeviateSource {
    /// The next deviate, or [`LiftError::Exhausted`] once the sequence ends.
    fn next_deviate(&mut self) -> LiftResult<f64>;

    /// Number of deviates successfully drawn so far.
    fn drawn(&self) -> u64;

    /// Ticks until the next group arrives.
    ///
    /// Maps `r` linearly onto the exponential CDF between `F(2)` and `F(90)`
    /// and inverts, then truncates to whole ticks.
    fn arrival_gap(&mut self) -> LiftResult<u64> {
        let r = self.next_deviate()?;
        let alpha = exponential_cdf(GAP_MIN);
        let beta = 1.0 - exponential_cdf(GAP_MAX);
        let u = ((1.0 - beta) - alpha) * r + alpha;
        Ok(inverse_exponential_cdf(u) as u64)
    }

    /// Number of riders in the next group (always ≥ 2).
    ///
    /// The comparisons are deliberately asymmetric: the upward search stops
    /// at the first `T(c) > u`, the downward search at the first
    /// `T(c - 1) <= u`.
    fn group_size(&mut self) -> LiftResult<u32> {
        let u = self.next_deviate()?;
        let mut candidate = GROUP_SEARCH_START;
        if truncated_geometric_cdf(candidate) <= u {
            while truncated_geometric_cdf(candidate) <= u {
                candidate += 1;
            }
        } else if truncated_geometric_cdf(GROUP_FLOOR) <= u {
            while truncated_geometric_cdf(candidate - 1) > u {
                candidate -= 1;
            }
        } else {
            candidate = GROUP_FLOOR;
        }
        Ok(candidate)
    }

    /// Uniform index in `0..n`, clamped so a deviate of exactly 1.0 still
    /// lands on `n - 1`.  `n` must be non-zero.
    fn pick_index(&mut self, n: usize) -> LiftResult<usize> {
        debug_assert!(n > 0, "pick_index over an empty range");
        let u = self.next_deviate()?;
        let i = (u * n as f64).floor() as usize;
        Ok(i.min(n.saturating_sub(1)))
    }
}

/// Reject values the samplers are not defined for.
fn unit_deviate(index: u64, value: f64) -> LiftResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LiftError::Parse {
            index,
            message: format!("{value} is outside [0, 1]"),
        })
    }
}

// ── DeviateStream ─────────────────────────────────────────────────────────────

/// Lazily reads one deviate per line from any `Read` source.
///
/// Lines are trimmed; blank lines are skipped.  Values are parsed only when
/// drawn, so a long file costs nothing until the simulation needs it.
pub struct DeviateStream<R: Read> {
    records: DeserializeRecordsIntoIter<R, (f64,)>,
    drawn:   u64,
}

impl DeviateStream<File> {
    /// Open a deviate file.  Failure to open is reported as [`LiftError::Io`].
    pub fn open(path: &Path) -> LiftResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> DeviateStream<R> {
    /// Like [`DeviateStream::open`] but accepts any `Read` source.
    ///
    /// Useful for testing (pass a `std::io::Cursor`).
    pub fn from_reader(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(reader)
            .into_deserialize::<(f64,)>();
        Self { records, drawn: 0 }
    }
}

impl<R: Read> DeviateSource for DeviateStream<R> {
    fn next_deviate(&mut self) -> LiftResult<f64> {
        let index = self.drawn;
        match self.records.next() {
            None => Err(LiftError::Exhausted { drawn: index }),
            Some(Err(e)) => Err(LiftError::Parse { index, message: e.to_string() }),
            Some(Ok((value,))) => {
                let value = unit_deviate(index, value)?;
                self.drawn += 1;
                Ok(value)
            }
        }
    }

    fn drawn(&self) -> u64 {
        self.drawn
    }
}

// ── DeviateSeq ────────────────────────────────────────────────────────────────

/// A finite in-memory deviate sequence with the same exhaustion semantics as
/// a file.
#[derive(Clone, Debug, Default)]
pub struct DeviateSeq {
    values: Vec<f64>,
    cursor: usize,
}

impl DeviateSeq {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// `count` copies of `value`.
    pub fn repeat(value: f64, count: usize) -> Self {
        Self::new(vec![value; count])
    }

    /// Values not yet drawn.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl DeviateSource for DeviateSeq {
    fn next_deviate(&mut self) -> LiftResult<f64> {
        let index = self.cursor as u64;
        let value = *self
            .values
            .get(self.cursor)
            .ok_or(LiftError::Exhausted { drawn: index })?;
        let value = unit_deviate(index, value)?;
        self.cursor += 1;
        Ok(value)
    }

    fn drawn(&self) -> u64 {
        self.cursor as u64
    }
}
