//! MatchState (live scoring) and MatchRecord (finished match handed to the archive).

use crate::logic::{derive_match_progress_with_entries, MatchProgress};
use crate::models::game::{GameScore, Side};
use crate::models::match_config::{MatchConfiguration, MatchLength};
use crate::models::opponent::{OpponentId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (live or saved).
pub type MatchId = Uuid;

/// Message shown when a manually entered game score is level.
pub const TIED_SCORES_MESSAGE: &str = "Game scores must have a winner. Adjust one of the scores.";

/// Errors that can occur while setting up, scoring, or finishing a match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Match length is not one of the setup choices.
    InvalidMatchLength(u32),
    /// Player and opponent names must not be blank.
    BlankName,
    /// No game at this index.
    GameIndexOutOfRange { index: usize, games: usize },
    /// Game has not been reached yet; earlier games must finish first.
    GameLocked(usize),
    /// Neither side has won enough games.
    MatchNotComplete,
    /// Manually entered scores are level.
    TiedScores,
    /// A manually entered score is blank or not a number.
    IncompleteScores,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidMatchLength(n) => {
                write!(f, "Match length must be 3, 5 or 7 games (got {})", n)
            }
            MatchError::BlankName => write!(f, "Player and opponent names are required"),
            MatchError::GameIndexOutOfRange { index, games } => {
                write!(f, "Game {} does not exist (match has {} games)", index + 1, games)
            }
            MatchError::GameLocked(index) => {
                write!(f, "Game {} cannot be scored until earlier games finish", index + 1)
            }
            MatchError::MatchNotComplete => write!(f, "Match is not complete"),
            MatchError::TiedScores => write!(f, "{}", TIED_SCORES_MESSAGE),
            MatchError::IncompleteScores => write!(f, "Enter a score for both sides"),
        }
    }
}

impl std::error::Error for MatchError {}

/// A match being scored: one GameScore per game, fixed at the configured length.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub id: MatchId,
    pub config: MatchConfiguration,
    /// Always `config.match_length.games()` entries.
    pub games: Vec<GameScore>,
    /// Winner accepted by typed final-score entry, per game. Cleared when the game is rescored.
    #[serde(default)]
    pub entered_winners: Vec<Option<Side>>,
    pub created_at: DateTime<Utc>,
}

impl MatchState {
    /// Start a match with every game at 0-0.
    pub fn new(config: MatchConfiguration) -> Self {
        let len = config.match_length.games() as usize;
        Self {
            id: Uuid::new_v4(),
            config,
            games: vec![GameScore::default(); len],
            entered_winners: vec![None; len],
            created_at: Utc::now(),
        }
    }

    pub fn match_length(&self) -> MatchLength {
        self.config.match_length
    }

    /// Progress view, recomputed from the current scores.
    pub fn progress(&self) -> MatchProgress {
        derive_match_progress_with_entries(&self.games, &self.entered_winners, self.config.match_length)
    }

    /// Registered id for a side, if any.
    pub fn id_of(&self, side: Side) -> Option<Uuid> {
        match side {
            Side::Player => self.config.player_id,
            Side::Opponent => self.config.opponent_id,
        }
    }

    pub fn game(&self, index: usize) -> Result<&GameScore, MatchError> {
        self.games.get(index).ok_or(MatchError::GameIndexOutOfRange {
            index,
            games: self.games.len(),
        })
    }
}

/// A finished match as handed to the archive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub match_length: MatchLength,
    pub player_id: Option<PlayerId>,
    pub opponent_id: Option<OpponentId>,
    pub player_name: String,
    pub opponent_name: String,
    /// Played games only; games never reached are left out.
    pub games: Vec<GameScore>,
    /// Winner of each entry in `games`.
    pub game_winners: Vec<Side>,
    pub winner_side: Side,
    /// Id of the winning side, when that side is registered.
    pub winner_id: Option<Uuid>,
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Games won by a side in this record.
    pub fn games_won(&self, side: Side) -> u32 {
        self.game_winners.iter().filter(|w| **w == side).count() as u32
    }

    /// Match score with the winner's tally first (e.g. `3–1`).
    pub fn games_score(&self) -> String {
        let won = self.games_won(self.winner_side);
        let lost = self.games_won(self.winner_side.other());
        format!("{won}\u{2013}{lost}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_match_has_one_zeroed_game_per_length() {
        let cfg = MatchConfiguration::new(MatchLength::new(7).unwrap(), "Ann", "Bob").unwrap();
        let m = MatchState::new(cfg);
        assert_eq!(m.games.len(), 7);
        assert!(m.games.iter().all(|g| *g == GameScore::default()));
        assert_eq!(m.entered_winners, vec![None; 7]);
    }

    #[test]
    fn tied_scores_message_is_exact() {
        assert_eq!(
            MatchError::TiedScores.to_string(),
            "Game scores must have a winner. Adjust one of the scores."
        );
    }

    #[test]
    fn game_out_of_range_is_an_error() {
        let cfg = MatchConfiguration::new(MatchLength::new(3).unwrap(), "Ann", "Bob").unwrap();
        let m = MatchState::new(cfg);
        assert_eq!(
            m.game(3),
            Err(MatchError::GameIndexOutOfRange { index: 3, games: 3 })
        );
    }
}
