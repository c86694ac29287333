//! Single-pass mean and variance (Welford's algorithm).
//!
//! ```text
//! k     += 1
//! delta  = x - mean
//! mean  += delta / k
//! m2    += delta * (x - mean)
//! ```
//!
//! The sample variance is `m2 / (k - 1)`; it is undefined for fewer than two
//! samples and reported as `None` in that case.

/// Running `(count, mean, m2)` accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OnlineStats {
    count: u64,
    mean:  f64,
    m2:    f64,
}

impl OnlineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the accumulator.
    #[inline]
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combine two accumulators as if every observation had gone through one.
    ///
    /// Chan et al.'s pairwise update; order of merging does not matter up to
    /// floating-point rounding.
    pub fn merge(&mut self, other: &OnlineStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of all observations, `None` if there are none.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance (`n - 1` denominator), `None` below two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation, `None` below two observations.
    pub fn std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

impl Extend<f64> for OnlineStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for OnlineStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = OnlineStats::new();
        stats.extend(iter);
        stats
    }
}
