//! Integration tests for scoring a match end to end: taps, typed entry, finishing, archiving.

use table_tennis_scorer::{
    apply_score_event, derive_match_progress, finish_match, record_entered_game,
    set_entered_score, validate_entered_scores, EntryValidation, GameScore, MatchArchive,
    MatchConfiguration, MatchError, MatchLength, MatchState, MemoryArchive, OpponentDirectory,
    ScoreAction, ScoreEntryEvent, ScoreEvent, Side, UNUSUAL_SCORE_WARNING,
};

fn new_match(length: u32) -> MatchState {
    let cfg = MatchConfiguration::new(MatchLength::new(length).unwrap(), "Ann", "Bob").unwrap();
    MatchState::new(cfg)
}

fn games(scores: &[(u32, u32)]) -> Vec<GameScore> {
    scores.iter().map(|&(p, o)| GameScore::new(p, o)).collect()
}

/// Tap one side `points` times in the active game.
fn win_points(m: &mut MatchState, side: Side, points: u32) {
    for _ in 0..points {
        let game_index = m.progress().active_game_index.unwrap();
        apply_score_event(
            m,
            ScoreEvent {
                game_index,
                side,
                action: ScoreAction::Increment,
            },
        )
        .unwrap();
    }
}

#[test]
fn best_of_five_two_games_in() {
    let g = games(&[(11, 7), (11, 9), (0, 0), (0, 0), (0, 0)]);
    let p = derive_match_progress(&g, MatchLength::new(5).unwrap());
    assert_eq!(p.player_wins, 2);
    assert_eq!(p.opponent_wins, 0);
    assert_eq!(p.active_game_index, Some(2));
    assert!(!p.is_match_complete);
}

#[test]
fn best_of_five_decided_in_three() {
    let g = games(&[(11, 7), (11, 9), (11, 5), (0, 0), (0, 0)]);
    let p = derive_match_progress(&g, MatchLength::new(5).unwrap());
    assert_eq!(p.player_wins, 3);
    assert!(p.is_match_complete);
    assert_eq!(p.active_game_index, None);
}

#[test]
fn tapping_through_a_deuce_game() {
    let mut m = new_match(3);
    win_points(&mut m, Side::Player, 10);
    win_points(&mut m, Side::Opponent, 10);
    assert_eq!(m.games[0], GameScore::new(10, 10));
    assert_eq!(m.progress().active_game_index, Some(0));
    win_points(&mut m, Side::Player, 1);
    assert_eq!(m.progress().active_game_index, Some(0));
    win_points(&mut m, Side::Player, 1);
    assert_eq!(m.games[0], GameScore::new(12, 10));
    assert_eq!(m.progress().active_game_index, Some(1));
}

#[test]
fn tap_scored_match_is_finished_and_archived() {
    let mut m = new_match(3);
    win_points(&mut m, Side::Opponent, 11);
    win_points(&mut m, Side::Player, 11);
    win_points(&mut m, Side::Opponent, 11);
    let p = m.progress();
    assert!(p.is_match_complete);
    assert_eq!(p.winner, Some(Side::Opponent));

    let record = finish_match(&m).unwrap();
    assert_eq!(record.games.len(), 3);
    assert_eq!(record.winner_side, Side::Opponent);
    assert_eq!(record.games_score(), "2–1");

    let mut archive = MemoryArchive::new();
    assert_eq!(archive.save(record).unwrap(), m.id);
}

#[test]
fn no_taps_after_match_is_decided_on_unplayed_games() {
    let mut m = new_match(3);
    win_points(&mut m, Side::Player, 11);
    win_points(&mut m, Side::Player, 11);
    let err = apply_score_event(
        &mut m,
        ScoreEvent {
            game_index: 2,
            side: Side::Player,
            action: ScoreAction::Increment,
        },
    );
    assert_eq!(err, Err(MatchError::GameLocked(2)));
}

#[test]
fn completed_game_can_be_corrected_from_the_table() {
    let mut m = new_match(5);
    m.games = games(&[(11, 7), (3, 2), (0, 0), (0, 0), (0, 0)]);
    let p = set_entered_score(
        &mut m,
        &ScoreEntryEvent {
            game_index: 0,
            side: Side::Opponent,
            raw_text: "9a".to_string(),
        },
    )
    .unwrap();
    assert_eq!(m.games[0], GameScore::new(11, 9));
    assert_eq!(p.active_game_index, Some(1));
}

#[test]
fn typed_tie_is_refused_with_exact_message() {
    let v = validate_entered_scores("11", "11");
    assert_eq!(v, EntryValidation::Tied);
    assert!(!v.can_submit());
    assert_eq!(
        v.error_message(),
        Some("Game scores must have a winner. Adjust one of the scores.")
    );
}

#[test]
fn typed_nine_seven_is_unusual_but_submittable() {
    let v = validate_entered_scores("9", "7");
    assert!(matches!(
        &v,
        EntryValidation::Unusual { winner: Side::Player, display, .. } if display == "9–7"
    ));
    assert_eq!(v.warning(), Some(UNUSUAL_SCORE_WARNING));
    assert!(v.can_submit());
}

#[test]
fn typed_eight_eleven_is_a_standard_win() {
    let v = validate_entered_scores("8", "11");
    assert!(matches!(
        &v,
        EntryValidation::Valid { winner: Side::Opponent, display, .. } if display == "11–8"
    ));
    assert_eq!(v.warning(), None);
}

#[test]
fn typed_games_can_decide_a_match() {
    let mut m = new_match(3);
    record_entered_game(&mut m, 0, "11", "4").unwrap();
    let entry = record_entered_game(&mut m, 1, "13", "11").unwrap();
    assert!(entry.progress.is_match_complete);
    let record = finish_match(&m).unwrap();
    assert_eq!(record.winner_side, Side::Player);
}

#[test]
fn unusual_typed_games_still_complete_the_match() {
    let mut m = new_match(3);
    let first = record_entered_game(&mut m, 0, "9", "7").unwrap();
    assert_eq!(first.game.warning, Some(UNUSUAL_SCORE_WARNING));
    record_entered_game(&mut m, 1, "11", "4").unwrap();

    let record = finish_match(&m).unwrap();
    assert_eq!(record.winner_side, Side::Player);
    assert_eq!(record.games.len(), 2);
    assert_eq!(record.games_score(), "2–0");
}

#[test]
fn opponent_summary_after_saving() {
    let mut dir = OpponentDirectory::new();
    let bob = dir.add("Bob").unwrap();
    let cfg = MatchConfiguration::new(MatchLength::new(3).unwrap(), "Ann", "Bob")
        .unwrap()
        .with_opponent_id(bob.id);
    let mut m = MatchState::new(cfg);
    win_points(&mut m, Side::Player, 11);
    win_points(&mut m, Side::Player, 11);

    let mut archive = MemoryArchive::new();
    archive.save(finish_match(&m).unwrap()).unwrap();

    let found = dir.search(Some("b"), &archive.records());
    let h2h = found[0].head_to_head.unwrap();
    assert_eq!((h2h.wins, h2h.losses), (1, 0));
    assert!(found[0].last_match.as_ref().unwrap().won);
}
