//! Seeded deviate generation.
//!
//! Runs are driven by a deviate file so that results can be reproduced and
//! compared across implementations.  `SimRng` produces such sequences from a
//! 64-bit seed: the same seed always yields the same values, whether they are
//! consumed directly or written out with [`write_deviates`] first.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{DeviateSource, LiftResult};

/// Seeded uniform(0, 1) generator.  Never exhausts.
pub struct SimRng {
    inner: SmallRng,
    drawn: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng { inner: SmallRng::seed_from_u64(seed), drawn: 0 }
    }

    /// Sample one value in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.drawn += 1;
        self.inner.r#gen::<f64>()
    }
}

impl DeviateSource for SimRng {
    fn next_deviate(&mut self) -> LiftResult<f64> {
        Ok(self.uniform())
    }

    fn drawn(&self) -> u64 {
        self.drawn
    }
}

/// Write `count` deviates from `rng` to `writer`, one per line, in the format
/// [`DeviateStream`][crate::DeviateStream] reads.
pub fn write_deviates<W: Write>(mut writer: W, rng: &mut SimRng, count: u64) -> LiftResult<()> {
    for _ in 0..count {
        writeln!(writer, "{}", rng.uniform())?;
    }
    writer.flush()?;
    Ok(())
}
