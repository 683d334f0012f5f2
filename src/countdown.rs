use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use serde::Serialize;

use crate::config::EventConfig;

/// Where "now" falls relative to the event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the start; counting down to it
    Upcoming,
    /// During the event; counting down to the end
    Ongoing,
    /// After the event; counting up from the end
    Over,
}

/// Time to (or since) the relevant edge of the event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub phase: Phase,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Compute the countdown at `now` for the given event window.
    ///
    /// The end date is inclusive, so the event closes one day after `end`.
    pub fn at<Tz: TimeZone>(event: &EventConfig, now: &DateTime<Tz>) -> Self {
        let now = now.fixed_offset();
        let closes_at = event.end + Duration::days(1);

        let (phase, remaining) = if now < event.start {
            (Phase::Upcoming, event.start - now)
        } else if now < closes_at {
            (Phase::Ongoing, closes_at - now)
        } else {
            (Phase::Over, now - closes_at)
        };

        Self::from_duration(phase, remaining)
    }

    fn from_duration(phase: Phase, duration: Duration) -> Self {
        let total = duration.num_seconds();
        Self {
            phase,
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self.phase {
            Phase::Upcoming => "until Hacktoberfest starts",
            Phase::Ongoing => "until Hacktoberfest ends",
            Phase::Over => "since Hacktoberfest ended",
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02} days {:02} hours {:02} minutes {:02} seconds {}",
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.caption()
        )
    }
}

/// Parse an RFC 3339 moment such as the one given to `--now`.
pub fn parse_moment(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}
