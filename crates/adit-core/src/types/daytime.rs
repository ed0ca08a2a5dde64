use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

const MINUTES_PER_DAY: u16 = 24 * 60;

///
/// TimeOfDay
///
/// Wall-clock time of day as minutes since midnight, always `< 1440`.
/// The engine assumes one implicit timezone for the whole system.
/// Serializes as `"HH:MM"`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    /// Construct from minutes since midnight; `None` if out of range.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Construct from an hour/minute pair; `None` if out of range.
    #[must_use]
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s.split_once(':').ok_or(TimeOfDayError::Malformed)?;
        let hour: u8 = hour.parse().map_err(|_| TimeOfDayError::Malformed)?;
        let minute: u8 = minute.parse().map_err(|_| TimeOfDayError::Malformed)?;

        Self::from_hm(hour, minute).ok_or(TimeOfDayError::OutOfRange { hour, minute })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

///
/// TimeOfDayError
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum TimeOfDayError {
    #[error("time of day must look like 'HH:MM'")]
    Malformed,

    #[error("{hour:02}:{minute:02} is not a valid time of day")]
    OutOfRange { hour: u8, minute: u8 },
}

///
/// TESTS
///
