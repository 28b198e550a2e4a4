//! Snapshot versions
//!
//! A snapshot version is the watermark up to which an index is known to
//! reflect all writes. The zero version (`none`) means "no lower bound":
//! scans starting from it see every document.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A totally ordered version marker backed by a UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotVersion(DateTime<Utc>);

impl SnapshotVersion {
    /// The zero version: earlier than every real version.
    pub fn none() -> Self {
        Self(Utc.timestamp_opt(0, 0).single().unwrap_or_default())
    }

    /// Creates a version from a timestamp.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// Returns the underlying timestamp.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns true if this is the zero version.
    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }
}

impl Default for SnapshotVersion {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_minimum() {
        let none = SnapshotVersion::none();
        let later = SnapshotVersion::new(Utc.timestamp_opt(100, 0).unwrap());
        assert!(none < later);
        assert!(none.is_none());
        assert!(!later.is_none());
    }

    #[test]
    fn test_min_folds_to_oldest() {
        let v1 = SnapshotVersion::new(Utc.timestamp_opt(50, 0).unwrap());
        let v2 = SnapshotVersion::new(Utc.timestamp_opt(20, 0).unwrap());
        let v3 = SnapshotVersion::new(Utc.timestamp_opt(80, 0).unwrap());
        let oldest = [v1, v2, v3].into_iter().min().unwrap();
        assert_eq!(oldest, v2);
    }
}
