use super::*;

#[test]
fn startpos_basics() {
    let board = GameBoard::new();
    assert_eq!(board.turn(), Color::White);
    assert!(!board.is_game_over());
    assert_eq!(
        board.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn fen_round_trip() {
    let mut board = GameBoard::new();
    board.apply_uci("e2e4").unwrap();
    board.apply_uci("c7c5").unwrap();
    let fen = board.fen();
    let rebuilt = GameBoard::from_fen(&fen).unwrap();
    assert_eq!(rebuilt.fen(), fen);
    assert_eq!(rebuilt.turn(), board.turn());
}

#[test]
fn invalid_fen_rejected() {
    assert!(matches!(
        GameBoard::from_fen("not a position"),
        Err(GameError::InvalidFen(_))
    ));
}

#[test]
fn apply_legal_move_yields_san() {
    let mut board = GameBoard::new();
    let applied = board.apply_uci("g1f3").unwrap();
    assert_eq!(applied.san, "Nf3");
    assert_eq!(applied.uci, "g1f3");
    assert_eq!(board.turn(), Color::Black);
}

#[test]
fn illegal_move_rejected() {
    let mut board = GameBoard::new();
    let err = board.apply_uci("e2e5").unwrap_err();
    assert!(matches!(err, GameError::IllegalMove(_)));
    // Board unchanged after the rejection.
    assert_eq!(board.turn(), Color::White);
}

#[test]
fn garbage_uci_rejected() {
    let mut board = GameBoard::new();
    assert!(matches!(
        board.apply_uci("zz9!"),
        Err(GameError::InvalidUci(_))
    ));
}

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut board = GameBoard::new();
    for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        board.apply_uci(mv).unwrap();
    }
    let term = board.termination().unwrap();
    assert_eq!(term, Termination::Checkmate(Color::Black));
    assert_eq!(term.result(), ResultTag::BlackWins);
}

#[test]
fn stalemate_is_draw() {
    let board = GameBoard::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let term = board.termination().unwrap();
    assert_eq!(term, Termination::Stalemate);
    assert_eq!(term.result(), ResultTag::Draw);
}

#[test]
fn bare_kings_is_insufficient_material() {
    let board = GameBoard::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert_eq!(board.termination(), Some(Termination::InsufficientMaterial));
}

#[test]
fn fifty_move_rule_claims_draw() {
    let board = GameBoard::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 80").unwrap();
    assert_eq!(board.halfmove_clock(), 100);
    let term = board.termination().unwrap();
    assert_eq!(term, Termination::FiftyMoveRule);
    assert_eq!(term.result(), ResultTag::Draw);
}

#[test]
fn threefold_repetition_claims_draw() {
    let mut board = GameBoard::new();
    // Knight shuffles return to the starting position twice over.
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..2 {
        for mv in shuffle {
            assert!(board.termination().is_none());
            board.apply_uci(mv).unwrap();
        }
    }
    assert_eq!(board.termination(), Some(Termination::ThreefoldRepetition));
}

#[test]
fn castling_uci_is_normalized() {
    let mut board = GameBoard::new();
    for mv in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"] {
        board.apply_uci(mv).unwrap();
    }
    let applied = board.apply_uci("e1g1").unwrap();
    assert_eq!(applied.san, "O-O");
    assert_eq!(applied.uci, "e1g1");
}
