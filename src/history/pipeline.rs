//! normalize -> bucket-by-day -> filter-by-interval.
//!
//! Bucketing runs before filtering so the window sees one candidate per day
//! instead of several same-day samples straddling the cutoff. The candidate
//! is judged by its full timestamp, not by the day key it is emitted under.

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::HistoryError;
use crate::history::bucket::bucket_with_times;
use crate::history::{HistorySeries, interval_cutoff, normalize_timestamps};

/// The transform behind every "portfolio history" query.
pub struct HistoryPipeline {
    clock: Box<dyn Clock + Send + Sync>,
}

impl Default for HistoryPipeline {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl HistoryPipeline {
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Reject a negative interval without touching any data.
    pub fn check_interval(&self, interval_days: i64) -> Result<(), HistoryError> {
        interval_cutoff(self.clock.now(), interval_days).map(|_| ())
    }

    /// Run the three stages over an epoch-keyed series.
    pub fn run(&self, raw: &HistorySeries, interval_days: i64) -> Result<HistorySeries, HistoryError> {
        let cutoff = interval_cutoff(self.clock.now(), interval_days)?;

        let normalized = normalize_timestamps(raw, self.clock())?;
        let daily = bucket_with_times(&normalized)?;
        let days = daily.len();
        let kept: HistorySeries = daily
            .into_iter()
            .filter(|winner| winner.at >= cutoff)
            .map(|winner| (winner.day, winner.value))
            .collect();

        debug!(
            raw = raw.len(),
            days,
            kept = kept.len(),
            interval_days,
            %cutoff,
            "history pipeline"
        );
        Ok(kept)
    }
}
