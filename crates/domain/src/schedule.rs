//! Read-only work schedules a role can be assigned to.

use std::fmt::{Display, Formatter};

use callops_core::{AppResult, NonEmptyString};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Identifier of an externally owned schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(u64);

impl ScheduleId {
    /// Creates a schedule identifier from its raw value.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ScheduleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ScheduleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Assignable working time window, supplied read-only by the schedule source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    id: ScheduleId,
    name: NonEmptyString,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl Schedule {
    /// Creates a schedule. Overnight windows (end before start) are allowed.
    pub fn new(
        id: ScheduleId,
        name: impl Into<String>,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            start_time,
            end_time,
        })
    }

    /// Returns the schedule identifier.
    #[must_use]
    pub fn id(&self) -> ScheduleId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the window start, if any.
    #[must_use]
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    /// Returns the window end, if any.
    #[must_use]
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }
}
