//! Validity window of a form (`startAt`/`endAt`).
//!
//! The backend is inconsistent about formats, so bounds accept a bare date,
//! a civil date-time with `T` or a space separator, or an RFC 3339 timestamp
//! (converted to the system time zone). A bare end date covers the whole day.

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::Timestamp;

use crate::error::CoreError;
use crate::models::descriptor::FormDescriptor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityWindow {
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

impl ValidityWindow {
    pub fn from_descriptor(descriptor: &FormDescriptor) -> Result<Self, CoreError> {
        Ok(Self {
            start: parse_bound(descriptor.start_at.as_deref(), Bound::Start)?,
            end: parse_bound(descriptor.end_at.as_deref(), Bound::End)?,
        })
    }

    /// Both bounds are inclusive; a missing bound is open.
    pub fn contains(&self, now: DateTime) -> bool {
        self.start.is_none_or(|start| now >= start) && self.end.is_none_or(|end| now <= end)
    }
}

fn parse_bound(raw: Option<&str>, bound: Bound) -> Result<Option<DateTime>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let invalid = |reason: String| CoreError::InvalidDateTime {
        value: raw.to_string(),
        reason,
    };

    if !raw.contains(['T', 't', ' ']) {
        let date: Date = raw.parse().map_err(|e: jiff::Error| invalid(e.to_string()))?;
        let time = match bound {
            Bound::Start => Time::midnight(),
            Bound::End => Time::MAX,
        };
        return Ok(Some(date.to_datetime(time)));
    }

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(Some(ts.to_zoned(TimeZone::system()).datetime()));
    }

    raw.replacen(' ', "T", 1)
        .parse::<DateTime>()
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}
