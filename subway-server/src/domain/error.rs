//! Domain error types.
//!
//! These errors represent chain-maintenance failures in the domain layer.
//! They are distinct from service and web errors.

use super::StationId;

/// Errors from segment-chain maintenance on a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The station is already part of the line's chain.
    #[error("station {0} is already on the line")]
    DuplicateStation(StationId),

    /// The referenced station is not part of the line's chain.
    #[error("station {0} is not on the line")]
    StationNotFound(StationId),

    /// Chain traversal detected a cycle, a branch, or a dangling link.
    ///
    /// This signals a prior invariant violation rather than bad input, and
    /// callers escalate it instead of recovering.
    #[error("corrupted segment chain: {0}")]
    Corrupted(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ChainError::DuplicateStation(StationId(4));
        assert_eq!(err.to_string(), "station 4 is already on the line");

        let err = ChainError::StationNotFound(StationId(9));
        assert_eq!(err.to_string(), "station 9 is not on the line");

        let err = ChainError::Corrupted("cycle in segment chain");
        assert_eq!(
            err.to_string(),
            "corrupted segment chain: cycle in segment chain"
        );
    }
}
