//! Engine event types.

use serde::{Deserialize, Serialize};

/// Something the engine reports to its listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A tile was spawned.
    Generated {
        row: usize,
        column: usize,
        value: u64,
        /// Empty cells left after the spawn.
        remaining: usize,
    },

    /// A move resolved with changes and the engine latched.
    ///
    /// Carries no payload: listeners read committed vs. pending fields off
    /// the tiles themselves.
    MoveStarted,

    /// A merge was committed at `(row, column)`, producing `value`.
    Merged { row: usize, column: usize, value: u64 },
}

impl EngineEvent {
    /// Discriminant without payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::Generated { .. } => EventKind::Generated,
            EngineEvent::MoveStarted => EventKind::MoveStarted,
            EngineEvent::Merged { .. } => EventKind::Merged,
        }
    }
}

/// Payload-free event discriminant, for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Generated,
    MoveStarted,
    Merged,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Generated => "generated",
            EventKind::MoveStarted => "move_started",
            EventKind::Merged => "merged",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let event = EngineEvent::Generated {
            row: 0,
            column: 1,
            value: 2,
            remaining: 14,
        };
        assert_eq!(event.kind(), EventKind::Generated);
        assert_eq!(EngineEvent::MoveStarted.kind(), EventKind::MoveStarted);
        assert_eq!(EventKind::Merged.to_string(), "merged");
    }

    #[test]
    fn test_event_serialization() {
        let event = EngineEvent::Merged {
            row: 3,
            column: 0,
            value: 128,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
