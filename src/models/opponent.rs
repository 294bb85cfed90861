//! Opponents and the summaries shown when picking one for a new match.

use crate::models::match_state::MatchId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for the registered user keeping score.
pub type PlayerId = Uuid;

/// Unique identifier for an opponent in the directory.
pub type OpponentId = Uuid;

/// Record against one opponent, from the scorekeeper's point of view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins: u32,
    pub losses: u32,
}

/// The most recent finished match against an opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LastMatchSummary {
    pub match_id: MatchId,
    /// True when the scorekeeper won.
    pub won: bool,
    /// Games won, winner's tally first (e.g. `3–1`).
    pub score: String,
    pub played_at: DateTime<Utc>,
}

/// An opponent that can be picked in the new-match setup flow.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub id: OpponentId,
    pub name: String,
    /// None until a match against this opponent has been saved.
    pub head_to_head: Option<HeadToHead>,
    pub last_match: Option<LastMatchSummary>,
}

impl Opponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            head_to_head: None,
            last_match: None,
        }
    }

    /// Case-insensitive substring match on the name. Blank search matches everyone.
    pub fn matches_search(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        needle.is_empty() || self.name.to_lowercase().contains(&needle)
    }
}
