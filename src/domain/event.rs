//! Upcoming match listings shown next to the player.
//!
//! Events are read-only and only ever come from the built-in seed.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// One side of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Full team or player name
    pub name: String,

    /// Three-letter badge text
    pub short_code: String,
}

impl Team {
    pub fn new(name: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_code: short_code.into(),
        }
    }
}

/// A scheduled match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u64,
    pub team1: Team,
    pub team2: Team,

    /// Display string such as "Today, 20:00"
    pub time: String,

    pub category: Category,
}

/// Built-in upcoming events
pub fn default_events() -> Vec<EventRecord> {
    let event = |id: u64, team1: Team, team2: Team, time: &str, category: &str| EventRecord {
        id,
        team1,
        team2,
        time: time.to_string(),
        category: Category::new(category),
    };

    vec![
        event(
            1,
            Team::new("FC Barcelona", "FCB"),
            Team::new("Real Madrid", "RMA"),
            "Today, 20:00",
            "football",
        ),
        event(
            2,
            Team::new("Golden State Warriors", "GSW"),
            Team::new("Boston Celtics", "BOS"),
            "Tomorrow, 18:30",
            "basketball",
        ),
        event(
            3,
            Team::new("India", "IND"),
            Team::new("Australia", "AUS"),
            "Oct 15, 14:00",
            "cricket",
        ),
        event(
            4,
            Team::new("Roger Federer", "FED"),
            Team::new("Rafael Nadal", "NAD"),
            "Oct 18, 16:00",
            "tennis",
        ),
    ]
}
