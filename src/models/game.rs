//! GameScore and Side for a single game of table tennis.

use serde::{Deserialize, Serialize};

/// Which side of the table a point, game, or match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Player,
    Opponent,
}

impl Side {
    /// The side across the table.
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Point tally for one game in a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub player: u32,
    pub opponent: u32,
}

impl GameScore {
    pub fn new(player: u32, opponent: u32) -> Self {
        Self { player, opponent }
    }

    /// Points for one side.
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn set(&mut self, side: Side, points: u32) {
        match side {
            Side::Player => self.player = points,
            Side::Opponent => self.opponent = points,
        }
    }

    /// Side with more points, or None when level.
    pub fn leader(&self) -> Option<Side> {
        match self.player.cmp(&self.opponent) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute point difference.
    pub fn margin(&self) -> u32 {
        self.player.abs_diff(self.opponent)
    }

    /// Score as shown to users: higher score first, joined by an en dash (e.g. `11–8`).
    pub fn display_score(&self) -> String {
        let high = self.player.max(self.opponent);
        let low = self.player.min(self.opponent);
        format!("{high}\u{2013}{low}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_puts_higher_score_first() {
        assert_eq!(GameScore::new(5, 11).display_score(), "11–5");
        assert_eq!(GameScore::new(11, 5).display_score(), "11–5");
        assert_eq!(GameScore::new(10, 10).display_score(), "10–10");
    }

    #[test]
    fn leader_is_none_when_level() {
        assert_eq!(GameScore::new(3, 3).leader(), None);
        assert_eq!(GameScore::new(4, 3).leader(), Some(Side::Player));
        assert_eq!(GameScore::new(4, 9).leader(), Some(Side::Opponent));
    }
}
