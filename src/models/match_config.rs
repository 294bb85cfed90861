//! MatchLength and MatchConfiguration (new-match setup).

use crate::models::match_state::MatchError;
use crate::models::game::Side;
use crate::models::opponent::{OpponentId, PlayerId};
use serde::{Deserialize, Serialize};

/// Best-of-N series length. One of the lengths offered at setup (3, 5 or 7).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MatchLength(u32);

impl MatchLength {
    /// Lengths offered by the new-match setup screen.
    pub const CHOICES: [u32; 3] = [3, 5, 7];

    pub fn new(games: u32) -> Result<Self, MatchError> {
        if !Self::CHOICES.contains(&games) {
            return Err(MatchError::InvalidMatchLength(games));
        }
        Ok(Self(games))
    }

    /// Number of games in the series.
    pub fn games(self) -> u32 {
        self.0
    }

    /// Games a side must win to take the match: ceil(length / 2).
    pub fn games_to_win(self) -> u32 {
        self.0.div_ceil(2)
    }
}

impl Default for MatchLength {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u32> for MatchLength {
    type Error = MatchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchLength> for u32 {
    fn from(value: MatchLength) -> Self {
        value.0
    }
}

/// Settings chosen when a match starts. Never changed afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfiguration {
    pub match_length: MatchLength,
    pub player_name: String,
    pub opponent_name: String,
    /// Registered user keeping score, if signed in.
    pub player_id: Option<PlayerId>,
    /// Opponent picked from the directory, if any.
    pub opponent_id: Option<OpponentId>,
}

impl MatchConfiguration {
    /// Build a configuration with trimmed names. Blank names are rejected.
    pub fn new(
        match_length: MatchLength,
        player_name: impl Into<String>,
        opponent_name: impl Into<String>,
    ) -> Result<Self, MatchError> {
        let player_name = player_name.into().trim().to_string();
        let opponent_name = opponent_name.into().trim().to_string();
        if player_name.is_empty() || opponent_name.is_empty() {
            return Err(MatchError::BlankName);
        }
        Ok(Self {
            match_length,
            player_name,
            opponent_name,
            player_id: None,
            opponent_id: None,
        })
    }

    pub fn with_player_id(mut self, id: PlayerId) -> Self {
        self.player_id = Some(id);
        self
    }

    pub fn with_opponent_id(mut self, id: OpponentId) -> Self {
        self.opponent_id = Some(id);
        self
    }

    /// Display name for a side.
    pub fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_name,
            Side::Opponent => &self.opponent_name,
        }
    }
}
