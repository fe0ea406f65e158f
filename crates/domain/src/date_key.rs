// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-day keys.
//!
//! A `DateKey` identifies one calendar day as `YYYY-MM-DD`. Keys are built
//! from the local calendar components of a value, never from a UTC
//! conversion, so two instants on the same local day always share a key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// The canonical zero-padded form.
const CANONICAL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Tolerates single-digit month and day components.
const LOOSE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month padding:none]-[day padding:none]");

/// A canonical `YYYY-MM-DD` key for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Builds a key from the local calendar components of an offset date-time.
    ///
    /// The value's own offset is used; it is not converted to UTC first.
    #[must_use]
    pub const fn from_local(value: OffsetDateTime) -> Self {
        Self(value.date())
    }

    /// Parses a `YYYY-MM-DD` key.
    ///
    /// Components may be unpadded (`2024-6-1`). Missing, zero, non-numeric,
    /// or out-of-range components yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Date::parse(value.trim(), LOOSE_FORMAT)
            .ok()
            .filter(|date| date.year() > 0)
            .map(Self)
    }

    /// Parses only the canonical zero-padded `YYYY-MM-DD` form.
    #[must_use]
    pub fn parse_canonical(value: &str) -> Option<Self> {
        Date::parse(value, CANONICAL_FORMAT)
            .ok()
            .filter(|date| date.year() > 0)
            .map(Self)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0
    }

    /// Returns the key for the following day.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Returns the key for the preceding day.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.0.previous_day().map(Self)
    }

    /// Returns every key between `from` and `to`, both inclusive.
    ///
    /// The walk starts at `from` and steps one day toward `to`, so the
    /// result is descending when `to` is earlier than `from`.
    #[must_use]
    pub fn inclusive_range(from: Self, to: Self) -> Vec<Self> {
        let mut keys: Vec<Self> = vec![from];
        let mut cursor: Self = from;
        while cursor != to {
            let step: Option<Self> = if cursor < to {
                cursor.next()
            } else {
                cursor.previous()
            };
            match step {
                Some(key) => {
                    keys.push(key);
                    cursor = key;
                }
                None => break,
            }
        }
        keys
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: String = self
            .0
            .format(CANONICAL_FORMAT)
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date key '{raw}'")))
    }
}

/// Formats a local date-time as a `DateKey`.
#[must_use]
pub const fn to_date_key(value: OffsetDateTime) -> DateKey {
    DateKey::from_local(value)
}

/// Parses a `DateKey` string back into a calendar date.
///
/// Returns `None` on malformed input instead of failing.
#[must_use]
pub fn from_date_key(value: &str) -> Option<Date> {
    DateKey::parse(value).map(|key| key.date())
}
