//! Scoring rules: game completion, match progress, score mutations, typed entry, match flow.

mod game_outcome;
mod manual_entry;
mod match_flow;
mod mutation;
mod progress;

pub use game_outcome::{game_winner, is_game_complete, DEUCE_THRESHOLD, POINTS_TO_WIN, WINNING_MARGIN};
pub use manual_entry::{
    submit_entered_scores, validate_entered_scores, EnteredGame, EntryValidation,
    UNUSUAL_SCORE_WARNING,
};
pub use match_flow::{
    apply_score_event, finish_match, record_entered_game, set_entered_score, RecordedEntry,
};
pub use mutation::{
    apply_delta, parse_score_input, sanitize_score_input, set_score, ScoreAction,
    ScoreEntryEvent, ScoreEvent,
};
pub use progress::{
    derive_match_progress, derive_match_progress_with_entries, GameProgress, MatchProgress,
};
