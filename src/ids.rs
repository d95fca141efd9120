//! Typed 64-bit identifiers.
//!
//! Every aggregate gets its own id type via a marker parameter, so a
//! `ScheduleId` can never be passed where a `TimeSlotId` is expected.
//! Externally ids travel as decimal strings; [`parse_id`] is the boundary
//! that turns them back into typed ids.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid id")]
    InvalidId,
}

pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedId<T> {
    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        Self(value, PhantomData)
    }

    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }
}

/// Parse an external string id into a typed identifier.
///
/// # Errors
///
/// Returns [`IdError::InvalidId`] for anything but a positive decimal
/// integer that fits in 64 bits.
pub fn parse_id<T>(raw: &str) -> Result<TypedId<T>, IdError> {
    let value: i64 = raw.parse().map_err(|_| IdError::InvalidId)?;

    if value <= 0 {
        return Err(IdError::InvalidId);
    }

    Ok(TypedId::from_i64(value))
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(value: TypedId<T>) -> Self {
        value.into_i64()
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    #[test]
    fn parse_roundtrips_through_display() {
        let id: TypedId<Thing> = parse_id("12345").unwrap();

        assert_eq!(id.into_i64(), 12345);
        assert_eq!(id.to_string(), "12345");
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "abc", "12x", "1.5", " 1"] {
            assert_eq!(parse_id::<Thing>(raw), Err(IdError::InvalidId), "{raw:?}");
        }
    }

    #[test]
    fn parse_rejects_non_positive() {
        assert_eq!(parse_id::<Thing>("0"), Err(IdError::InvalidId));
        assert_eq!(parse_id::<Thing>("-3"), Err(IdError::InvalidId));
    }

    #[test]
    fn parse_rejects_overflow() {
        assert_eq!(
            parse_id::<Thing>("9223372036854775808"),
            Err(IdError::InvalidId)
        );
    }
}
