//! Score mutations: point increment/decrement and typed numeric entry.
//!
//! These functions only produce a new game list. Deciding whether a game may be edited is
//! up to the caller (see `match_flow`).

use crate::models::{GameScore, Side};
use serde::{Deserialize, Serialize};

/// Point change requested by a tap.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAction {
    Increment,
    Decrement,
}

/// A tap on one side's score in one game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub game_index: usize,
    pub side: Side,
    pub action: ScoreAction,
}

/// Typed numeric entry for one side's score in one game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntryEvent {
    pub game_index: usize,
    pub side: Side,
    pub raw_text: String,
}

/// Return `games` with one side's points moved by the action, floored at zero.
///
/// An out-of-range index leaves the list unchanged.
pub fn apply_delta(
    games: &[GameScore],
    game_index: usize,
    side: Side,
    action: ScoreAction,
) -> Vec<GameScore> {
    let mut next = games.to_vec();
    if let Some(game) = next.get_mut(game_index) {
        let points = match action {
            ScoreAction::Increment => game.get(side).saturating_add(1),
            ScoreAction::Decrement => game.get(side).saturating_sub(1),
        };
        game.set(side, points);
    }
    next
}

/// Strip everything but ASCII digits, as the entry field does while typing.
pub fn sanitize_score_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parse sanitized input. None for empty input or a number too large for a score.
pub fn parse_score_input(raw: &str) -> Option<u32> {
    sanitize_score_input(raw).parse().ok()
}

/// Return `games` with one side's points set from typed text.
///
/// Non-digits are dropped first. Empty input sets the score to 0; input too large to be a
/// score leaves the previous value in place.
pub fn set_score(games: &[GameScore], game_index: usize, side: Side, raw_value: &str) -> Vec<GameScore> {
    let mut next = games.to_vec();
    if let Some(game) = next.get_mut(game_index) {
        if sanitize_score_input(raw_value).is_empty() {
            game.set(side, 0);
        } else if let Some(points) = parse_score_input(raw_value) {
            game.set(side, points);
        }
    }
    next
}
