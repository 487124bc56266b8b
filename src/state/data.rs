/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status of a character, as reported by the API.
///
/// The API uses the exact strings "Alive", "Dead" and "unknown",
/// both in character bodies and in the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterStatus::Alive => write!(f, "Alive"),
            CharacterStatus::Dead => write!(f, "Dead"),
            CharacterStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A named place a character comes from or currently lives in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
}

/// Represents a single character from the catalog
///
/// Supplied entirely by the remote API; never constructed or
/// mutated locally. Unknown response fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique API id, stable across requests
    pub id: u32,
    /// Display name (e.g., "Rick Sanchez")
    pub name: String,
    /// Alive, Dead or unknown
    pub status: CharacterStatus,
    /// Species label (e.g., "Human")
    pub species: String,
    /// Gender label as reported by the API
    pub gender: String,
    /// Place of origin
    pub origin: LocationRef,
    /// Last known location
    pub location: LocationRef,
    /// URL of the character portrait
    pub image: String,
}

/// Counters shown in the stats panel
///
/// Derived from the currently rendered list (plus the favorites
/// store for the badge) on every render; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Number of characters currently rendered
    pub total: usize,
    /// How many of them are alive
    pub alive: usize,
    /// How many of them are dead
    pub dead: usize,
    /// Size of the favorites set
    pub favorites: usize,
}

impl Stats {
    /// Tally a rendered character list.
    ///
    /// Characters with unknown status count toward `total` only,
    /// so `alive + dead <= total` always holds.
    pub fn tally(characters: &[Character], favorites: usize) -> Self {
        let alive = characters
            .iter()
            .filter(|c| c.status == CharacterStatus::Alive)
            .count();
        let dead = characters
            .iter()
            .filter(|c| c.status == CharacterStatus::Dead)
            .count();

        Stats {
            total: characters.len(),
            alive,
            dead,
            favorites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: u32, status: CharacterStatus) -> Character {
        Character {
            id,
            name: format!("Character {}", id),
            status,
            species: "Human".to_string(),
            gender: "Male".to_string(),
            origin: LocationRef {
                name: "Earth (C-137)".to_string(),
            },
            location: LocationRef {
                name: "Citadel of Ricks".to_string(),
            },
            image: format!("https://example.com/{}.jpeg", id),
        }
    }

    #[test]
    fn test_tally_counts_by_status() {
        let list = vec![
            character(1, CharacterStatus::Alive),
            character(2, CharacterStatus::Dead),
            character(3, CharacterStatus::Unknown),
            character(4, CharacterStatus::Alive),
        ];

        let stats = Stats::tally(&list, 2);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.alive, 2);
        assert_eq!(stats.dead, 1);
        assert_eq!(stats.favorites, 2);
    }

    #[test]
    fn test_alive_plus_dead_never_exceeds_total() {
        let list = vec![
            character(1, CharacterStatus::Unknown),
            character(2, CharacterStatus::Alive),
            character(3, CharacterStatus::Unknown),
        ];

        let stats = Stats::tally(&list, 0);

        assert!(stats.alive + stats.dead <= stats.total);
    }

    #[test]
    fn test_empty_list_tallies_to_zero() {
        let stats = Stats::tally(&[], 0);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_status_deserializes_from_api_strings() {
        let alive: CharacterStatus = serde_json::from_str("\"Alive\"").unwrap();
        let dead: CharacterStatus = serde_json::from_str("\"Dead\"").unwrap();
        let unknown: CharacterStatus = serde_json::from_str("\"unknown\"").unwrap();

        assert_eq!(alive, CharacterStatus::Alive);
        assert_eq!(dead, CharacterStatus::Dead);
        assert_eq!(unknown, CharacterStatus::Unknown);
    }
}
