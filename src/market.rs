//! Exchange session state.
//!
//! Whether quotes are live is a pure function of the current instant, the
//! exchange timezone, the holiday calendar and the regular session bounds.
//! The current instant is supplied by a [`Clock`] so tests can pin it.

use crate::holidays::HolidayCalendar;
use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::ToSchema;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Regular trading session bounds in exchange-local time, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHours {
    /// Session open.
    pub open: NaiveTime,
    /// Session close.
    pub close: NaiveTime,
}

impl Default for SessionHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl SessionHours {
    /// Returns true if `time` lies within the session.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.close
    }
}

/// Market session state at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    /// Saturday or Sunday.
    Weekend,
    /// Listed public holiday.
    Holiday,
    /// Within regular session hours.
    Open,
    /// Trading day, outside session hours.
    AfterHours,
}

impl MarketStatus {
    /// Returns true only during the regular session.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekend => write!(f, "weekend"),
            Self::Holiday => write!(f, "holiday"),
            Self::Open => write!(f, "open"),
            Self::AfterHours => write!(f, "after_hours"),
        }
    }
}

/// Classifies an exchange-local date and time.
///
/// Weekends take precedence over holidays, which take precedence over the
/// session-hours check.
#[must_use]
pub fn session_status(
    local: NaiveDateTime,
    hours: &SessionHours,
    holidays: &dyn HolidayCalendar,
) -> MarketStatus {
    let date = local.date();
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        MarketStatus::Weekend
    } else if holidays.is_holiday(date) {
        MarketStatus::Holiday
    } else if hours.contains(local.time()) {
        MarketStatus::Open
    } else {
        MarketStatus::AfterHours
    }
}

/// Exchange calendar: timezone, session bounds and holidays.
#[derive(Clone)]
pub struct MarketCalendar {
    timezone: Tz,
    hours: SessionHours,
    holidays: Arc<dyn HolidayCalendar>,
}

impl MarketCalendar {
    /// Creates a calendar.
    #[must_use]
    pub fn new(timezone: Tz, hours: SessionHours, holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self {
            timezone,
            hours,
            holidays,
        }
    }

    /// Exchange timezone.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Session bounds.
    #[must_use]
    pub fn hours(&self) -> SessionHours {
        self.hours
    }

    /// Session state at `instant`.
    #[must_use]
    pub fn status_at(&self, instant: DateTime<Utc>) -> MarketStatus {
        let local = instant.with_timezone(&self.timezone).naive_local();
        session_status(local, &self.hours, self.holidays.as_ref())
    }
}

impl fmt::Debug for MarketCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketCalendar")
            .field("timezone", &self.timezone)
            .field("hours", &self.hours)
            .finish_non_exhaustive()
    }
}
