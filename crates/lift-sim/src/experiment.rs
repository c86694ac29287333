//! Multi-day runs and the final report.

use std::fmt;

use lift_core::{DeviateSource, OnlineStats};
use serde::Serialize;

use crate::config::BuildingConfig;
use crate::day::DaySim;
use crate::observer::DayObserver;
use crate::{SimError, SimResult};

/// Runs `days` independent days back to back on one deviate source.
pub struct Experiment {
    config: BuildingConfig,
    days:   u32,
}

impl Experiment {
    pub fn new(config: BuildingConfig, days: u32) -> SimResult<Self> {
        config.validate()?;
        if days == 0 {
            return Err(SimError::Config("need at least one day".into()));
        }
        Ok(Self { config, days })
    }

    pub fn config(&self) -> &BuildingConfig {
        &self.config
    }

    /// Run every day in order and summarise.
    ///
    /// Stop counts are pooled per car per day; delays are pooled per rider
    /// across all days.  A source error on any day aborts the whole run.
    pub fn run<S, O>(&self, source: &mut S, observer: &mut O) -> SimResult<Report>
    where
        S: DeviateSource,
        O: DayObserver,
    {
        let mut stops = OnlineStats::new();
        let mut delays = OnlineStats::new();
        let mut max_queue = 0;

        for day in 0..self.days {
            let outcome = DaySim::new(&self.config, day)?.run(source, observer)?;
            stops.extend(outcome.stops.iter().map(|&s| s as f64));
            delays.extend(outcome.delays.iter().copied());
            max_queue = max_queue.max(outcome.max_waiting);
        }

        tracing::debug!(
            days = self.days,
            deviates = source.drawn(),
            riders = delays.count(),
            "experiment finished"
        );

        Ok(Report {
            days:      self.days,
            avg_stops: stops.mean(),
            max_queue,
            avg_delay: delays.mean(),
            std_delay: delays.std_dev(),
        })
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Run-level summary.  Undefined statistics (too few samples) are `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub days:      u32,
    /// Mean stops per car per day.
    pub avg_stops: Option<f64>,
    /// Longest lobby queue on any day.
    pub max_queue: usize,
    pub avg_delay: Option<f64>,
    /// Sample standard deviation of the normalized delay.
    pub std_delay: Option<f64>,
}

/// Five-decimal rendering, `nan` when undefined.
struct Fixed5(Option<f64>);

impl fmt::Display for Fixed5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.5}"),
            None => write!(f, "nan"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OUTPUT stops {}", Fixed5(self.avg_stops))?;
        writeln!(f, "OUTPUT max qsize {}", self.max_queue)?;
        writeln!(f, "OUTPUT average delay {}", Fixed5(self.avg_delay))?;
        write!(f, "OUTPUT stddev delay {}", Fixed5(self.std_delay))
    }
}
