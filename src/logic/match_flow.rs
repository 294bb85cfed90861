//! Live match flow: gated score changes on a MatchState, then finishing the match.
//!
//! Every operation checks editability against freshly derived progress before it writes.

use crate::logic::manual_entry::{submit_entered_scores, EnteredGame};
use crate::logic::mutation::{apply_delta, set_score, ScoreEntryEvent, ScoreEvent};
use crate::logic::progress::MatchProgress;
use crate::models::{GameScore, MatchError, MatchRecord, MatchState, Side};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// A typed game score recorded into a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RecordedEntry {
    pub game_index: usize,
    pub game: EnteredGame,
    /// Registered id of the game winner, if any.
    pub winner_id: Option<Uuid>,
    pub progress: MatchProgress,
}

/// Fail unless `index` exists and is the active game or an already complete one.
fn ensure_editable(state: &MatchState, index: usize) -> Result<(), MatchError> {
    state.game(index)?;
    if !state.progress().is_game_editable(index) {
        return Err(MatchError::GameLocked(index));
    }
    Ok(())
}

/// Forget a typed-entry decision once the game's points are changed by other means.
fn clear_entered_winner(state: &mut MatchState, index: usize) {
    if let Some(w) = state.entered_winners.get_mut(index) {
        *w = None;
    }
}

/// Apply a tap (+1 / -1) to one side of one game.
pub fn apply_score_event(state: &mut MatchState, event: ScoreEvent) -> Result<MatchProgress, MatchError> {
    ensure_editable(state, event.game_index)?;
    state.games = apply_delta(&state.games, event.game_index, event.side, event.action);
    clear_entered_winner(state, event.game_index);
    log::debug!(
        "match {}: game {} {:?} {:?} -> {:?}",
        state.id,
        event.game_index + 1,
        event.side,
        event.action,
        state.games[event.game_index]
    );
    Ok(state.progress())
}

/// Set one side of one game from typed text (table view).
pub fn set_entered_score(state: &mut MatchState, event: &ScoreEntryEvent) -> Result<MatchProgress, MatchError> {
    ensure_editable(state, event.game_index)?;
    state.games = set_score(&state.games, event.game_index, event.side, &event.raw_text);
    clear_entered_winner(state, event.game_index);
    log::debug!(
        "match {}: game {} {:?} set to {:?}",
        state.id,
        event.game_index + 1,
        event.side,
        state.games[event.game_index]
    );
    Ok(state.progress())
}

/// Record a typed final score for one game. `score1` is the player's, `score2` the opponent's.
///
/// Tied or blank input is refused. An unusual result is recorded and its warning returned.
/// The accepted winner settles the game, so the match moves on even when the live rule would
/// still call the score open.
pub fn record_entered_game(
    state: &mut MatchState,
    game_index: usize,
    score1: &str,
    score2: &str,
) -> Result<RecordedEntry, MatchError> {
    ensure_editable(state, game_index)?;
    let game = submit_entered_scores(score1, score2)?;
    state.games[game_index] = game.score;
    if state.entered_winners.len() < state.games.len() {
        state.entered_winners.resize(state.games.len(), None);
    }
    state.entered_winners[game_index] = Some(game.winner);
    if let Some(warning) = game.warning {
        log::info!(
            "match {}: game {} recorded as {}: {}",
            state.id,
            game_index + 1,
            game.score.display_score(),
            warning
        );
    }
    Ok(RecordedEntry {
        game_index,
        winner_id: state.id_of(game.winner),
        game,
        progress: state.progress(),
    })
}

/// Build the record to save once a side has won the match.
///
/// Games never reached (still 0-0 after the decider) are left out. Games settled by typed
/// entry are kept with their accepted winner.
pub fn finish_match(state: &MatchState) -> Result<MatchRecord, MatchError> {
    let progress = state.progress();
    let winner_side: Side = progress.winner.ok_or(MatchError::MatchNotComplete)?;
    let (games, game_winners): (Vec<GameScore>, Vec<Side>) = state
        .games
        .iter()
        .zip(&progress.per_game)
        .filter_map(|(g, p)| p.winner.map(|w| (*g, w)))
        .unzip();
    Ok(MatchRecord {
        id: state.id,
        match_length: state.config.match_length,
        player_id: state.config.player_id,
        opponent_id: state.config.opponent_id,
        player_name: state.config.player_name.clone(),
        opponent_name: state.config.opponent_name.clone(),
        games,
        game_winners,
        winner_side,
        winner_id: state.id_of(winner_side),
        played_at: Utc::now(),
    })
}
