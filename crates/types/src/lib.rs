//! Validated primitive types shared across the CPN client crates.
//!
//! Everything here is constructed through a fallible `new`/`parse` and is
//! therefore valid by construction:
//! - [`NonEmptyText`]: trimmed, guaranteed non-empty string.
//! - [`IsoDate`]: calendar date in `yyyy-mm-dd` form. Its string form sorts
//!   the same way the date does, which is what the form engine relies on
//!   when it compares date constraints lexicographically.
//!
//! Identifiers coming back from the server are plain numbers; they are kept
//! as type aliases rather than newtypes because the server owns their
//! meaning and the client never arithmetics on them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned patient identifier.
pub type PatientId = i64;
/// Server-assigned dossier identifier.
pub type DossierId = i64;
/// Server-assigned antecedent block identifier.
pub type AntecedentId = i64;
/// Server-assigned user identifier.
pub type UserId = i64;
/// Server-assigned role identifier.
pub type RoleId = i64;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during
/// construction; whitespace-only input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming the input first.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing calendar dates.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// The input was not a valid `yyyy-mm-dd` date
    #[error("invalid date '{0}', expected yyyy-mm-dd")]
    Invalid(String),
    /// Date arithmetic left the representable range
    #[error("date arithmetic out of range")]
    OutOfRange,
}

/// A calendar date carried on the wire as a `yyyy-mm-dd` string.
///
/// Ordering is the calendar ordering, which for this format coincides with
/// lexicographic ordering of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Parses a `yyyy-mm-dd` string.
    ///
    /// # Errors
    ///
    /// Returns `DateError::Invalid` if the input is not a valid ISO date.
    pub fn parse(raw: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError::Invalid(raw.to_owned()))
    }

    /// Wraps an already-parsed date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying `chrono` date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The date `days` days later.
    ///
    /// # Errors
    ///
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn plus_days(&self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Self)
            .ok_or(DateError::OutOfRange)
    }

    /// The date `weeks` whole weeks later.
    ///
    /// # Errors
    ///
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn plus_weeks(&self, weeks: u64) -> Result<Self, DateError> {
        self.plus_days(weeks * 7)
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
