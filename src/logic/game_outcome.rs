//! Game completion under live (tap-to-score) rules: first to 11, win by 2.

use crate::models::{GameScore, Side};

/// Points the leader needs to close out a game outside deuce.
pub const POINTS_TO_WIN: u32 = 11;
/// Both sides at or past this score is deuce.
pub const DEUCE_THRESHOLD: u32 = 10;
/// Required lead to close out a game.
pub const WINNING_MARGIN: u32 = 2;

/// Whether a game is over.
///
/// Complete when the leader has at least 11 with a 2-point lead, or when both sides have
/// reached 10 and one leads by 2. `9-7` is still in progress; `10-10` is deuce.
pub fn is_game_complete(score: &GameScore) -> bool {
    let high = score.player.max(score.opponent);
    let low = score.player.min(score.opponent);
    let margin = high - low;
    let standard = high >= POINTS_TO_WIN && margin >= WINNING_MARGIN;
    let deuce = low >= DEUCE_THRESHOLD && margin >= WINNING_MARGIN;
    standard || deuce
}

/// Winner of a completed game; None while the game is in progress.
pub fn game_winner(score: &GameScore) -> Option<Side> {
    if is_game_complete(score) {
        score.leader()
    } else {
        None
    }
}
