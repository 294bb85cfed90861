//! Table tennis scorekeeper: library with models, scoring rules, and in-memory stores.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_delta, apply_score_event, derive_match_progress, derive_match_progress_with_entries,
    finish_match, game_winner, is_game_complete, record_entered_game, sanitize_score_input, set_entered_score, set_score,
    submit_entered_scores, validate_entered_scores, EnteredGame, EntryValidation, GameProgress,
    MatchProgress, RecordedEntry, ScoreAction, ScoreEntryEvent, ScoreEvent,
    UNUSUAL_SCORE_WARNING,
};
pub use models::{
    GameScore, HeadToHead, LastMatchSummary, MatchConfiguration, MatchError, MatchId,
    MatchLength, MatchRecord, MatchState, Opponent, OpponentId, PlayerId, Side,
    TIED_SCORES_MESSAGE,
};
pub use store::{MatchArchive, MatchCache, MemoryArchive, MemoryMatchCache, OpponentDirectory, StoreError};
