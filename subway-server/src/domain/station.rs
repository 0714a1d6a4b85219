//! Station identity types.

use std::fmt;

/// Opaque identifier of a station.
///
/// Ids are allocated by the store and referenced everywhere else; the
/// numeric value carries no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station: an id and a display name.
///
/// Immutable once created. Names are unique across the network; the store
/// enforces this at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    /// Create a station record.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", StationId(42)), "42");
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", StationId(7)), "StationId(7)");
    }

    #[test]
    fn equality() {
        assert_eq!(StationId(1), StationId(1));
        assert_ne!(StationId(1), StationId(2));
        assert_eq!(
            Station::new(StationId(1), "Gangnam"),
            Station::new(StationId(1), "Gangnam")
        );
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StationId(3));
        assert!(set.contains(&StationId(3)));
        assert!(!set.contains(&StationId(4)));
    }
}
