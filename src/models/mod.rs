//! Data structures for table tennis scoring: games, match setup, live matches, opponents.

mod game;
mod match_config;
mod match_state;
mod opponent;

pub use game::{GameScore, Side};
pub use match_config::{MatchConfiguration, MatchLength};
pub use match_state::{MatchError, MatchId, MatchRecord, MatchState, TIED_SCORES_MESSAGE};
pub use opponent::{HeadToHead, LastMatchSummary, Opponent, OpponentId, PlayerId};
