//! Typed final-score entry: validate two text fields and classify the result.
//!
//! Separate from the live completion rule in `game_outcome`. Live scoring never treats
//! `9-7` as finished, while a typed `9-7` is accepted here with a warning.

use crate::logic::mutation::parse_score_input;
use crate::models::{GameScore, MatchError, Side, TIED_SCORES_MESSAGE};
use serde::Serialize;

/// Advisory text for a non-standard but accepted result.
pub const UNUSUAL_SCORE_WARNING: &str =
    "This score is unusual for standard rules (first to 11, win by 2).";

const STANDARD_WINNING_SCORE: u32 = 11;
const STANDARD_MARGIN: u32 = 2;

/// Outcome of validating two typed scores. `score1` is the player's, `score2` the opponent's.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EntryValidation {
    /// A field is blank or not a number; submit stays disabled, no message.
    Empty,
    /// Both scores are equal; submission is refused.
    Tied,
    /// Winner reached 11 with a 2-point lead.
    Valid { winner: Side, score: GameScore, display: String },
    /// Any other decided score; accepted with a warning.
    Unusual { winner: Side, score: GameScore, display: String },
}

impl EntryValidation {
    pub fn can_submit(&self) -> bool {
        matches!(self, EntryValidation::Valid { .. } | EntryValidation::Unusual { .. })
    }

    /// Blocking message, shown as an alert.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            EntryValidation::Tied => Some(TIED_SCORES_MESSAGE),
            _ => None,
        }
    }

    /// Advisory message; never blocks submission.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            EntryValidation::Unusual { .. } => Some(UNUSUAL_SCORE_WARNING),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            EntryValidation::Valid { winner, .. } | EntryValidation::Unusual { winner, .. } => {
                Some(*winner)
            }
            _ => None,
        }
    }
}

/// A typed game score ready to be recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnteredGame {
    pub score: GameScore,
    pub winner: Side,
    pub warning: Option<&'static str>,
}

/// A typed final score: surrounding whitespace is ignored, anything but digits is rejected.
fn parse_field(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    parse_score_input(raw)
}

/// Classify two typed scores.
pub fn validate_entered_scores(score1: &str, score2: &str) -> EntryValidation {
    let (Some(s1), Some(s2)) = (parse_field(score1), parse_field(score2)) else {
        return EntryValidation::Empty;
    };
    let score = GameScore::new(s1, s2);
    let Some(winner) = score.leader() else {
        return EntryValidation::Tied;
    };
    let high = s1.max(s2);
    let display = score.display_score();
    if high >= STANDARD_WINNING_SCORE && score.margin() >= STANDARD_MARGIN {
        EntryValidation::Valid { winner, score, display }
    } else {
        EntryValidation::Unusual { winner, score, display }
    }
}

/// Validate and turn typed scores into a recordable game, refusing tied or blank input.
pub fn submit_entered_scores(score1: &str, score2: &str) -> Result<EnteredGame, MatchError> {
    let validation = validate_entered_scores(score1, score2);
    let warning = validation.warning();
    match validation {
        EntryValidation::Empty => Err(MatchError::IncompleteScores),
        EntryValidation::Tied => Err(MatchError::TiedScores),
        EntryValidation::Valid { winner, score, .. } | EntryValidation::Unusual { winner, score, .. } => {
            Ok(EnteredGame { score, winner, warning })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_non_numeric_is_empty() {
        assert_eq!(validate_entered_scores("", "11"), EntryValidation::Empty);
        assert_eq!(validate_entered_scores("11", "  "), EntryValidation::Empty);
        assert_eq!(validate_entered_scores("x", "3"), EntryValidation::Empty);
        assert_eq!(validate_entered_scores("+5", "11"), EntryValidation::Empty);
        assert_eq!(validate_entered_scores("1a1", "3"), EntryValidation::Empty);
        assert_eq!(validate_entered_scores("99999999999", "3"), EntryValidation::Empty);
        assert!(validate_entered_scores(" 11 ", "5").can_submit());
        assert!(!EntryValidation::Empty.can_submit());
        assert_eq!(EntryValidation::Empty.error_message(), None);
    }

    #[test]
    fn level_scores_are_refused() {
        let v = validate_entered_scores("11", "11");
        assert_eq!(v, EntryValidation::Tied);
        assert!(!v.can_submit());
        assert_eq!(
            v.error_message(),
            Some("Game scores must have a winner. Adjust one of the scores.")
        );
        assert_eq!(submit_entered_scores("0", "0"), Err(MatchError::TiedScores));
    }

    #[test]
    fn short_game_is_unusual_but_accepted() {
        let v = validate_entered_scores("9", "7");
        assert_eq!(v.winner(), Some(Side::Player));
        assert!(v.can_submit());
        assert_eq!(v.warning(), Some(UNUSUAL_SCORE_WARNING));
        assert!(matches!(v, EntryValidation::Unusual { ref display, .. } if display == "9–7"));
    }

    #[test]
    fn one_point_lead_past_eleven_is_unusual() {
        let v = validate_entered_scores("11", "10");
        assert!(matches!(v, EntryValidation::Unusual { winner: Side::Player, .. }));
    }

    #[test]
    fn standard_win_shows_higher_score_first() {
        let v = validate_entered_scores("8", "11");
        assert_eq!(
            v,
            EntryValidation::Valid {
                winner: Side::Opponent,
                score: GameScore::new(8, 11),
                display: "11–8".to_string(),
            }
        );
        assert_eq!(v.warning(), None);
    }

    #[test]
    fn submit_carries_warning_through() {
        let game = submit_entered_scores("9", "7").unwrap();
        assert_eq!(game.winner, Side::Player);
        assert_eq!(game.warning, Some(UNUSUAL_SCORE_WARNING));
        assert_eq!(submit_entered_scores("", "7"), Err(MatchError::IncompleteScores));
    }
}
