//! Core identifier types used throughout the engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for puzzles
///
/// Generated fresh at puzzle creation, so two puzzles over the same
/// sentence never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub Uuid);

impl PuzzleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PuzzleId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for game sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque player identifier, supplied by the surrounding identity layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_ids_are_unique() {
        let a = PuzzleId::new();
        let b = PuzzleId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<PlayerId, &str> = HashMap::new();
        map.insert(PlayerId::from("alice"), "open");
        assert_eq!(map.get(&PlayerId::new("alice")), Some(&"open"));
    }
}
