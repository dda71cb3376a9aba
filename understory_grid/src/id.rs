// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for containers, locations, and occupants.

use core::fmt;
use core::str::FromStr;

/// Server-side identifier of a container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

/// Server-side identifier of a single location within a container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u64);

/// The kind of record a [`GlobalId`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// A sample (`SA`).
    Sample,
    /// A subsample of a sample (`SS`).
    Subsample,
    /// A container, which may itself be stored in another container (`IC`).
    Container,
    /// A sample template (`IT`).
    Template,
    /// A user's bench (`BE`).
    Bench,
}

impl RecordKind {
    /// All kinds, in prefix-table order.
    pub const ALL: [Self; 5] = [
        Self::Sample,
        Self::Subsample,
        Self::Container,
        Self::Template,
        Self::Bench,
    ];

    /// The two-letter prefix used in the text form of a [`GlobalId`].
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Sample => "SA",
            Self::Subsample => "SS",
            Self::Container => "IC",
            Self::Template => "IT",
            Self::Bench => "BE",
        }
    }

    /// Looks up a kind by its two-letter prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

/// A stable, unique identifier for anything that can occupy a location.
///
/// The text form is the kind prefix followed by the numeric id, e.g. `SA12`.
///
/// ```rust
/// use understory_grid::{GlobalId, RecordKind};
///
/// let id: GlobalId = "SS42".parse().unwrap();
/// assert_eq!(id, GlobalId::new(RecordKind::Subsample, 42));
/// assert_eq!(id.to_string(), "SS42");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalId {
    /// What kind of record this is.
    pub kind: RecordKind,
    /// The numeric id, unique within `kind`.
    pub id: u64,
}

impl GlobalId {
    /// Creates a global id.
    #[must_use]
    pub const fn new(kind: RecordKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.id)
    }
}

/// Error returned when a string is not a valid [`GlobalId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseGlobalIdError {
    /// The string is shorter than a prefix plus one digit.
    TooShort,
    /// The first two characters are not a known prefix.
    UnknownPrefix,
    /// The part after the prefix is not a decimal number.
    InvalidNumber,
}

impl fmt::Display for ParseGlobalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::TooShort => "global id is too short",
            Self::UnknownPrefix => "global id has an unknown prefix",
            Self::InvalidNumber => "global id does not end in a decimal number",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ParseGlobalIdError {}

impl FromStr for GlobalId {
    type Err = ParseGlobalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 3 {
            return Err(ParseGlobalIdError::TooShort);
        }
        if !s.is_char_boundary(2) {
            return Err(ParseGlobalIdError::UnknownPrefix);
        }
        let (prefix, digits) = s.split_at(2);
        let kind = RecordKind::from_prefix(prefix).ok_or(ParseGlobalIdError::UnknownPrefix)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseGlobalIdError::InvalidNumber);
        }
        let id = digits
            .parse::<u64>()
            .map_err(|_| ParseGlobalIdError::InvalidNumber)?;
        Ok(Self { kind, id })
    }
}
