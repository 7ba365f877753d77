// Integration tests for the full scoring pipeline over the built-in
// standard rule template

use mj_score::{Hand, HandScorer, HandType, ScoreMethod, StandardRules, Winds};

fn scorer() -> HandScorer {
    let (_, tables) = StandardRules::load().unwrap();
    HandScorer::new(tables)
}

fn winds() -> Winds {
    Winds::new(27, 28)
}

// ============ Winning hands ============

#[test]
fn test_chow_hand_with_flower_scores_24() {
    // four chows and a pair, one flower set aside
    let hand = Hand {
        concealed: vec![3, 4, 5, 5, 6, 7, 11, 12, 13, 14, 15, 16, 16, 16],
        bonus: vec![36],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Winner, &hand, winds()).unwrap();
    assert_eq!(breakdown.win_points, 20);
    // only the flower earns tile points
    assert_eq!(breakdown.tile_points, 4);
    assert_eq!(breakdown.multipliers, 0);
    assert_eq!(breakdown.total, 24);
    assert!(scorer
        .breakdown()
        .iter()
        .any(|line| line.contains("four sets and a pair")));
}

#[test]
fn test_breakdown_carries_the_chosen_reading() {
    use mj_score::types::SET_BIN;
    use mj_score::GroupKind;
    // the winning interpretation of this hand is four chows and a pair,
    // and that is the pattern the breakdown reports
    let hand = Hand {
        concealed: vec![3, 4, 5, 5, 6, 7, 11, 12, 13, 14, 15, 16, 16, 16],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Winner, &hand, winds()).unwrap();
    assert_eq!(breakdown.pattern.generic(SET_BIN), 4);
    assert_eq!(breakdown.pattern.generic(GroupKind::Chow.bin()), 4);
    assert_eq!(breakdown.pattern.generic(GroupKind::Pair.bin()), 1);
}

#[test]
fn test_concealed_pungs_earn_doubled_tile_points() {
    let hand = Hand {
        concealed: vec![1, 1, 1, 5, 5, 5, 10, 10, 10, 14, 14, 14, 31, 31],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Winner, &hand, winds()).unwrap();
    assert_eq!(breakdown.win_points, 20);
    // concealed simple pungs 1, 5, 10, 14: 4 each; dragon pair: 2
    assert_eq!(breakdown.tile_points, 4 * 4 + 2);
    // one doubling for the chowless hand
    assert_eq!(breakdown.multipliers, 1);
    assert_eq!(breakdown.total, (20 + 18) * 2);
}

#[test]
fn test_open_groupings_score_single_value() {
    use mj_score::Claim;
    let hand = Hand {
        concealed: vec![5, 5, 5, 10, 10, 10, 14, 14, 14, 31, 31],
        open: vec![1, 1, 1],
        claims: vec![Claim::Pung],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Winner, &hand, winds()).unwrap();
    assert_eq!(breakdown.win_points, 20);
    // the claimed pung earns the open value 2, not the concealed 4
    assert_eq!(breakdown.tile_points, 2 + 4 + 4 + 4 + 2);
}

#[test]
fn test_loser_hand_gets_no_win_points() {
    let hand = Hand {
        concealed: vec![3, 4, 5, 9, 10, 11, 18, 19, 20, 31, 31, 31, 27, 27],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Normal, &hand, winds()).unwrap();
    assert_eq!(breakdown.win_points, 0);
    // concealed dragon pung 8, round-wind pair 2, doubled by the
    // individual dragon multiplier
    assert_eq!(breakdown.tile_points, 10);
    assert_eq!(breakdown.multipliers, 1);
    assert_eq!(breakdown.total, 20);
}

#[test]
fn test_score_never_exceeds_the_limit() {
    // four concealed honour pungs pile up points and doublings
    let hand = Hand {
        concealed: vec![27, 27, 27, 31, 31, 31, 32, 32, 32, 33, 33, 33, 28, 28],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let breakdown = scorer.score(HandType::Winner, &hand, winds()).unwrap();
    let limit = scorer.tables().limit();
    assert!(breakdown.total <= limit);
}

// ============ Limit hands ============

#[test]
fn test_all_honours_is_a_limit_hand() {
    let hand = Hand {
        concealed: vec![27, 27, 27, 28, 28, 28, 31, 31, 31, 32, 32, 32, 33, 33],
        ..Hand::default()
    };
    let mut scorer = scorer();
    let value = scorer.check_limit_hand(&hand, winds()).unwrap();
    assert_eq!(value, 1000);
    assert!(scorer
        .breakdown()
        .iter()
        .any(|line| line.contains("limit hand \"all honours\"")));
}

#[test]
fn test_plain_pung_hand_is_no_limit_hand() {
    let hand = Hand {
        concealed: vec![2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6],
        ..Hand::default()
    };
    let mut scorer = scorer();
    assert_eq!(scorer.check_limit_hand(&hand, winds()).unwrap(), 0);
}

// ============ Settlement ============

#[test]
fn test_arithmetic_settlement_with_east_double() {
    let (settings, _) = StandardRules::load().unwrap();
    assert_eq!(settings.method, ScoreMethod::Arithmetic);
    let scores = settings.settle([24, 0, 0, 0], 0, 0);
    // east wins: everyone pays double
    assert_eq!(scores, [144, -48, -48, -48]);
    assert_eq!(scores.iter().sum::<i32>(), 0);
}

#[test]
fn test_settlement_balances_between_losers() {
    let (settings, _) = StandardRules::load().unwrap();
    let scores = settings.settle([24, 10, 0, 0], 0, 3);
    // player 1's ten points flow in from the two other losers
    assert_eq!(scores.iter().sum::<i32>(), 0);
    assert!(scores[1] > scores[2]);
}
