//! Wall-clock access for the history normalizer.
//!
//! Epoch keys are rendered in a local time zone and the interval cutoff is
//! computed against "now". Both come from a `Clock` so that tests can pin
//! the time and zone instead of depending on the machine running them.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};

pub trait Clock {
    /// Current wall time in the clock's zone.
    fn now(&self) -> NaiveDateTime;

    /// Current time as seconds since the UNIX epoch.
    fn now_epoch(&self) -> i64;

    /// Render an epoch second in the clock's zone.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    fn local_datetime(&self, epoch_secs: i64) -> Option<NaiveDateTime>;
}

/// The host's local time zone and system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }

    fn local_datetime(&self, epoch_secs: i64) -> Option<NaiveDateTime> {
        Local
            .timestamp_opt(epoch_secs, 0)
            .single()
            .map(|dt| dt.naive_local())
    }
}

/// UTC rendering with the system clock; used by `wh normalize --utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }

    fn local_datetime(&self, epoch_secs: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(epoch_secs, 0).map(|dt| dt.naive_utc())
    }
}

/// A clock pinned to one instant, rendering in a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Pin "now" to a UTC wall time and render epochs in UTC.
    pub fn utc(now: NaiveDateTime) -> Self {
        Self {
            now: Utc.from_utc_datetime(&now).fixed_offset(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.naive_local()
    }

    fn now_epoch(&self) -> i64 {
        self.now.timestamp()
    }

    fn local_datetime(&self, epoch_secs: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(epoch_secs, 0)
            .map(|dt| dt.with_timezone(self.now.offset()).naive_local())
    }
}
