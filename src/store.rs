//! Collaborators around the scoring rules: match archive, opponent directory, live match cache.
//!
//! All in memory. The archive and cache are traits so another backend can be swapped in.

use crate::models::{
    HeadToHead, LastMatchSummary, MatchId, MatchRecord, MatchState, Opponent, OpponentId, Side,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Errors from the archive or opponent directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// A record with this id was already saved.
    AlreadySaved(MatchId),
    /// Opponent name is blank.
    BlankName,
    /// An opponent with this name already exists (case-insensitive).
    DuplicateOpponentName,
    /// No opponent with this id.
    OpponentNotFound(OpponentId),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::AlreadySaved(_) => write!(f, "Match has already been saved"),
            StoreError::BlankName => write!(f, "Opponent name is required"),
            StoreError::DuplicateOpponentName => write!(f, "An opponent with this name already exists"),
            StoreError::OpponentNotFound(_) => write!(f, "Opponent not found"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Where finished matches are saved.
pub trait MatchArchive: Send + Sync {
    /// Save a finished match, returning the id of the created record.
    fn save(&mut self, record: MatchRecord) -> Result<MatchId, StoreError>;

    /// Saved matches, most recent first.
    fn records(&self) -> Vec<MatchRecord>;
}

/// Archive kept in a Vec for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    records: Vec<MatchRecord>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchArchive for MemoryArchive {
    fn save(&mut self, record: MatchRecord) -> Result<MatchId, StoreError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::AlreadySaved(record.id));
        }
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn records(&self) -> Vec<MatchRecord> {
        let mut out = self.records.clone();
        out.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        out
    }
}

/// Opponents that can be picked for a new match.
#[derive(Debug, Default)]
pub struct OpponentDirectory {
    opponents: Vec<Opponent>,
}

impl OpponentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an opponent. Names are trimmed and must be unique (case-insensitive).
    pub fn add(&mut self, name: &str) -> Result<Opponent, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::BlankName);
        }
        if self.opponents.iter().any(|o| o.name.eq_ignore_ascii_case(name)) {
            return Err(StoreError::DuplicateOpponentName);
        }
        let opponent = Opponent::new(name);
        self.opponents.push(opponent.clone());
        Ok(opponent)
    }

    pub fn get(&self, id: OpponentId) -> Result<&Opponent, StoreError> {
        self.opponents
            .iter()
            .find(|o| o.id == id)
            .ok_or(StoreError::OpponentNotFound(id))
    }

    /// Opponents matching `search`, sorted by name, with head-to-head and last-match
    /// summaries filled in from `records`.
    pub fn search(&self, search: Option<&str>, records: &[MatchRecord]) -> Vec<Opponent> {
        let mut found: Vec<Opponent> = self
            .opponents
            .iter()
            .filter(|o| o.matches_search(search.unwrap_or("")))
            .map(|o| with_summaries(o, records))
            .collect();
        found.sort_by_key(|o| o.name.to_lowercase());
        found
    }
}

/// Fill head-to-head and last-match fields for one opponent.
fn with_summaries(opponent: &Opponent, records: &[MatchRecord]) -> Opponent {
    let played: Vec<&MatchRecord> = records
        .iter()
        .filter(|r| r.opponent_id == Some(opponent.id))
        .collect();
    let mut out = opponent.clone();
    if played.is_empty() {
        return out;
    }
    let wins = played.iter().filter(|r| r.winner_side == Side::Player).count() as u32;
    out.head_to_head = Some(HeadToHead {
        wins,
        losses: played.len() as u32 - wins,
    });
    out.last_match = played
        .iter()
        .max_by_key(|r| r.played_at)
        .map(|r| LastMatchSummary {
            match_id: r.id,
            won: r.winner_side == Side::Player,
            score: r.games_score(),
            played_at: r.played_at,
        });
    out
}

/// Key-value cache for matches in progress.
pub trait MatchCache: Send + Sync {
    fn get(&mut self, id: MatchId) -> Option<&mut MatchState>;
    fn put(&mut self, state: MatchState);
    /// Remove one match, returning it if present.
    fn clear(&mut self, id: MatchId) -> Option<MatchState>;
}

struct CacheEntry {
    state: MatchState,
    last_activity: Instant,
}

/// In-memory match cache. Each access refreshes the entry's activity time.
#[derive(Default)]
pub struct MemoryMatchCache {
    entries: HashMap<MatchId, CacheEntry>,
}

impl MemoryMatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop matches untouched for at least `max_idle`. Returns how many were removed.
    pub fn evict_idle(&mut self, max_idle: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.last_activity.elapsed() < max_idle);
        before - self.entries.len()
    }
}

impl MatchCache for MemoryMatchCache {
    fn get(&mut self, id: MatchId) -> Option<&mut MatchState> {
        self.entries.get_mut(&id).map(|e| {
            e.last_activity = Instant::now();
            &mut e.state
        })
    }

    fn put(&mut self, state: MatchState) {
        self.entries.insert(
            state.id,
            CacheEntry {
                state,
                last_activity: Instant::now(),
            },
        );
    }

    fn clear(&mut self, id: MatchId) -> Option<MatchState> {
        self.entries.remove(&id).map(|e| e.state)
    }
}
