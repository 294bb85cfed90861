//! Match progress: wins per side, the active game, locked games, match completion.
//!
//! Always recomputed from the game list; nothing here is cached on the match.

use crate::logic::game_outcome::game_winner;
use crate::models::{GameScore, MatchLength, Side};
use serde::Serialize;

/// Derived state of one game within a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct GameProgress {
    pub is_complete: bool,
    /// The earliest unfinished game; the only one open to live scoring.
    pub is_active: bool,
    /// Not reached yet: cannot be scored out of order.
    pub is_locked: bool,
    pub winner: Option<Side>,
}

impl GameProgress {
    /// Active or already complete games can be edited.
    pub fn is_editable(&self) -> bool {
        !self.is_locked
    }
}

/// Derived state of a whole match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchProgress {
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub games_to_win: u32,
    /// None once the match is decided or every game is complete.
    pub active_game_index: Option<usize>,
    pub is_match_complete: bool,
    /// Side that took the match, once complete.
    pub winner: Option<Side>,
    /// Side ahead on games; None when level.
    pub leader: Option<Side>,
    pub per_game: Vec<GameProgress>,
}

impl MatchProgress {
    /// Whether the game at `index` may be changed. Out-of-range indexes are not editable.
    pub fn is_game_editable(&self, index: usize) -> bool {
        self.per_game.get(index).is_some_and(GameProgress::is_editable)
    }
}

/// Derive the progress view for a list of game scores, judged by the live rule alone.
pub fn derive_match_progress(games: &[GameScore], match_length: MatchLength) -> MatchProgress {
    derive_match_progress_with_entries(games, &[], match_length)
}

/// Derive the progress view where some games were settled by typed entry.
///
/// `entered_winners[i]` is the winner accepted by the typed-entry form for game `i`. Such a
/// game counts as complete for that side even when the live rule would still call it open
/// (e.g. `9-7`). Missing or `None` entries fall back to the live rule.
pub fn derive_match_progress_with_entries(
    games: &[GameScore],
    entered_winners: &[Option<Side>],
    match_length: MatchLength,
) -> MatchProgress {
    let winners: Vec<Option<Side>> = games
        .iter()
        .enumerate()
        .map(|(i, g)| entered_winners.get(i).copied().flatten().or_else(|| game_winner(g)))
        .collect();
    // A live-complete game always has a leader, so having a winner is completion.
    let complete: Vec<bool> = winners.iter().map(Option::is_some).collect();

    let player_wins = winners.iter().filter(|w| **w == Some(Side::Player)).count() as u32;
    let opponent_wins = winners.iter().filter(|w| **w == Some(Side::Opponent)).count() as u32;

    let games_to_win = match_length.games_to_win();
    let winner = if player_wins >= games_to_win {
        Some(Side::Player)
    } else if opponent_wins >= games_to_win {
        Some(Side::Opponent)
    } else {
        None
    };
    let is_match_complete = winner.is_some();

    let active_game_index = if is_match_complete {
        None
    } else {
        complete.iter().position(|c| !c)
    };

    let per_game = complete
        .iter()
        .zip(&winners)
        .enumerate()
        .map(|(index, (&is_complete, &won_by))| {
            let is_active = active_game_index == Some(index);
            let reached = active_game_index.is_some_and(|active| index <= active);
            GameProgress {
                is_complete,
                is_active,
                is_locked: !is_active && !is_complete && !reached,
                winner: won_by,
            }
        })
        .collect();

    let leader = match player_wins.cmp(&opponent_wins) {
        std::cmp::Ordering::Greater => Some(Side::Player),
        std::cmp::Ordering::Less => Some(Side::Opponent),
        std::cmp::Ordering::Equal => None,
    };

    MatchProgress {
        player_wins,
        opponent_wins,
        games_to_win,
        active_game_index,
        is_match_complete,
        winner,
        leader,
        per_game,
    }
}
