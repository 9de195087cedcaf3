//! End-to-end scenarios against the public engine API.

use chess_core::{Board, Color, Fen, Move, MoveFlag, Piece, Square};
use chess_engine::movegen::perft::perft;
use chess_engine::{DrawReason, GameResult, GameState};

fn play_line(state: &mut GameState, line: &[&str]) {
    for notation in line {
        let (from, to, promo) = Move::parse_notation(notation).unwrap();
        let m = state
            .find_legal_move(from, to, promo)
            .unwrap_or_else(|| panic!("{notation} should be legal in {}", state.to_fen()));
        state.apply_move(m);
    }
}

#[test]
fn e2_pawn_has_single_and_double_push() {
    let state = GameState::new();
    let e2 = Square::new(6, 4);
    let pseudo: Vec<Square> = state
        .pseudo_legal_moves()
        .iter()
        .filter(|m| m.from() == e2)
        .map(|m| m.to())
        .collect();
    let legal: Vec<Square> = state
        .legal_moves()
        .iter()
        .filter(|m| m.from() == e2)
        .map(|m| m.to())
        .collect();
    assert_eq!(pseudo, vec![Square::new(5, 4), Square::new(4, 4)]);
    assert_eq!(legal, pseudo);
}

#[test]
fn double_push_then_undo_restores_start() {
    let mut state = GameState::new();
    let m = Move::new(Square::new(6, 4), Square::new(4, 4), state.board());
    let m = state.matching_legal_move(&m).unwrap();
    state.apply_move(m);
    state.undo_move();

    assert_eq!(state.board(), &Board::standard());
    assert!(state.white_to_move());
    assert!(state.move_log().is_empty());
}

#[test]
fn moves_from_different_boards_compare_equal() {
    let e2 = Square::new(6, 4);
    let e4 = Square::new(4, 4);
    let other = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap().board;
    assert_eq!(
        Move::new(e2, e4, &Board::standard()),
        Move::new(e2, e4, &other)
    );
}

#[test]
fn kingside_castling_depends_on_attacks() {
    let open = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castle = open.find_legal_move(Square::E1, Square::G1, None).unwrap();
    assert_eq!(castle.flag(), MoveFlag::CastleKingside);

    // A bishop on c4 covers f1, which the king would cross.
    let crossed = GameState::from_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1").unwrap();
    assert!(crossed.find_legal_move(Square::E1, Square::G1, None).is_none());

    // A rook on the g-file covers the landing square.
    let landing = GameState::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(landing.find_legal_move(Square::E1, Square::G1, None).is_none());
}

#[test]
fn castling_lost_after_king_returns() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play_line(&mut state, &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert!(state.legal_moves().iter().all(|m| !m.flag().is_castling()));
    assert_eq!(state.castling().to_fen(), "-");
}

#[test]
fn fools_mate() {
    let mut state = GameState::new();
    play_line(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(state.in_check());
    assert!(state.is_checkmate());
    assert!(!state.is_stalemate());
    assert_eq!(state.outcome(), Some(GameResult::BlackWins));
}

#[test]
fn scholars_mate() {
    let mut state = GameState::new();
    play_line(
        &mut state,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(state.outcome(), Some(GameResult::WhiteWins));
}

#[test]
fn stalemate_is_a_draw() {
    let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(state.is_stalemate());
    assert!(!state.is_checkmate());
    assert_eq!(
        state.outcome(),
        Some(GameResult::Draw(DrawReason::Stalemate))
    );
}

#[test]
fn check_must_be_answered() {
    let mut state = GameState::new();
    play_line(&mut state, &["e2e4", "f7f6", "d1h5"]);
    assert!(state.is_in_check(Color::Black));
    let replies: Vec<String> = state.legal_moves().iter().map(Move::notation).collect();
    assert_eq!(replies, vec!["g7g6"]);
}

#[test]
fn underpromotion_round_trip() {
    let mut state = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = state.clone();
    play_line(&mut state, &["b7b8r"]);
    assert_eq!(state.piece_at(Square::B8), Some((Piece::Rook, Color::White)));
    assert!(state.is_in_check(Color::Black));
    state.undo_move();
    assert_eq!(state, before);
}

#[test]
fn undo_whole_game_back_to_start() {
    let mut state = GameState::new();
    let line = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f6e4", "d2d4", "e5d4",
    ];
    play_line(&mut state, &line);
    assert_eq!(state.move_log().len(), line.len());
    while state.undo_move().is_some() {}
    assert_eq!(state, GameState::new());
}

// Reference counts from the chess programming wiki.

#[test]
fn perft_startpos() {
    let state = GameState::new();
    assert_eq!(perft(&state, 1), 20);
    assert_eq!(perft(&state, 2), 400);
    assert_eq!(perft(&state, 3), 8902);
}

#[test]
fn perft_kiwipete() {
    let state = GameState::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    assert_eq!(perft(&state, 1), 48);
    assert_eq!(perft(&state, 2), 2039);
}

#[test]
fn perft_rook_endgame() {
    let state = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&state, 1), 14);
    assert_eq!(perft(&state, 2), 191);
    assert_eq!(perft(&state, 3), 2812);
}

#[test]
fn perft_promotions_and_castling() {
    let state = GameState::from_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    )
    .unwrap();
    assert_eq!(perft(&state, 1), 6);
    assert_eq!(perft(&state, 2), 264);
}

#[test]
fn perft_discovered_checks() {
    let state =
        GameState::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    assert_eq!(perft(&state, 1), 44);
    assert_eq!(perft(&state, 2), 1486);
}
