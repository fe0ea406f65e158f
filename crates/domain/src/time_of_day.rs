// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const PADDED_HOUR_MINUTE: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

const HOUR_MINUTE: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:none]:[minute]");

const HOUR_MINUTE_SECOND: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:none]:[minute]:[second]");

/// A wall-clock time with minute precision, always rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// Default start of a photographer's working day.
pub const DEFAULT_START: TimeOfDay = TimeOfDay { hour: 8, minute: 0 };

/// Default end of a photographer's working day.
pub const DEFAULT_END: TimeOfDay = TimeOfDay {
    hour: 17,
    minute: 0,
};

impl TimeOfDay {
    /// Creates a time of day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTime` if the hour or minute is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        Time::from_hms(hour, minute, 0)
            .map(Self::from)
            .map_err(|err| DomainError::InvalidTime {
                value: format!("{hour}:{minute}"),
                reason: err.to_string(),
            })
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Parses `H:MM`, `HH:MM`, or `HH:MM:SS` (seconds are dropped).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTime` for anything else.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let parsed: Time = Time::parse(trimmed, HOUR_MINUTE)
            .or_else(|_| Time::parse(trimmed, HOUR_MINUTE_SECOND))
            .map_err(|err| DomainError::InvalidTime {
                value: value.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self::from(parsed))
    }

    /// Normalizes a loosely formatted time into zero-padded `HH:MM`.
    #[must_use]
    pub fn normalize(value: &str) -> Option<String> {
        Self::parse(value).ok().map(|t| t.to_string())
    }
}

impl From<time::Time> for TimeOfDay {
    fn from(value: time::Time) -> Self {
        Self {
            hour: value.hour(),
            minute: value.minute(),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Time = Time::from_hms(self.hour, self.minute, 0).map_err(|_| std::fmt::Error)?;
        let rendered: String = value
            .format(PADDED_HOUR_MINUTE)
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
