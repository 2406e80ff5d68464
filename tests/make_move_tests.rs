
use chess_engine::{
    position::Position,
    self_test::{ConsistencyError, full_test, full_test_all, round_trip_all},
    types::{ColoredPiece, Move, Piece, Side, Square, Wing},
};
use test_utils::*;

const CASTLING_FEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
const MIDDLEGAME_FEN: &str = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R w KQkq - 0 5";

fn white(piece: Piece) -> Option<ColoredPiece> {
    Some(ColoredPiece::new(Side::White, piece))
}

fn black(piece: Piece) -> Option<ColoredPiece> {
    Some(ColoredPiece::new(Side::Black, piece))
}

#[test]
fn every_legal_move_round_trips() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        CASTLING_FEN,
        MIDDLEGAME_FEN,
        "3r4/4P3/8/8/8/8/8/k3K3 w - - 0 1",
    ] {
        let mut position = position_from_fen(fen);
        let before = position.clone();

        for move_ in position.legal_moves() {
            position.apply(move_);
            assert_ne!(position, before, "{} changed nothing", move_);

            let undone = position.undo();
            assert_eq!(undone, Some(move_));
            assert_eq!(position, before, "{} was not taken back in {}", move_, fen);
        }
    }
}

#[test]
fn nested_line_unwinds_to_every_snapshot() {
    let line = [
        "e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "c7c6", "g1f3", "c8g4",
    ];

    let mut position = Position::new();
    let mut snapshots = Vec::new();

    for move_str in line {
        snapshots.push(position.clone());
        play(&mut position, move_str);
    }

    assert_eq!(position.history.len(), line.len());
    assert_eq!(position.side, Side::White);

    while let Some(snapshot) = snapshots.pop() {
        position.undo();
        assert_eq!(position, snapshot);
    }

    assert_eq!(position, Position::new());
}

#[test]
fn apply_flips_side_and_records_history() {
    let mut position = Position::new();

    let move_ = play(&mut position, "g1f3");

    assert_eq!(position.side, Side::Black);
    assert_eq!(position.last_move(), Some(&move_));
    assert_eq!(position.board.get(Square::F3), white(Piece::Knight));
    assert_eq!(position.board.get(Square::G1), None);
}

#[test]
fn en_passant_removes_and_restores_the_passed_pawn() {
    let mut position = Position::new();
    play_all(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let before = position.clone();

    play(&mut position, "e5d6");

    assert_eq!(position.board.get(Square::D6), white(Piece::Pawn));
    assert_eq!(position.board.get(Square::D5), None);
    assert_eq!(position.board.get(Square::E5), None);
    assert_eq!(position.board.piece_count(), 31);

    position.undo();

    assert_eq!(position.board.get(Square::D5), black(Piece::Pawn));
    assert_eq!(position.board.get(Square::E5), white(Piece::Pawn));
    assert_eq!(position.board.get(Square::D6), None);
    assert_eq!(position, before);
}

#[test]
fn promotion_creates_a_queen_and_undo_restores_the_pawn() {
    let mut position = position_from_fen("3r4/4P3/8/8/8/8/8/k3K3 w - - 0 1");
    let before = position.clone();

    play(&mut position, "e7d8");

    assert_eq!(position.board.get(Square::D8), white(Piece::Queen));
    assert_eq!(position.board.get(Square::E7), None);

    position.undo();

    assert_eq!(position.board.get(Square::E7), white(Piece::Pawn));
    assert_eq!(position.board.get(Square::D8), black(Piece::Rook));
    assert_eq!(position, before);
}

#[test]
fn kingside_castle_moves_the_rook() {
    let mut position = position_from_fen(CASTLING_FEN);
    let before = position.clone();

    play(&mut position, "e1g1");

    assert_eq!(position.board.get(Square::G1), white(Piece::King));
    assert_eq!(position.board.get(Square::F1), white(Piece::Rook));
    assert_eq!(position.board.get(Square::H1), None);
    assert_eq!(position.board.get(Square::E1), None);
    assert!(!position.castle.any(Side::White));
    assert!(position.castle.has(Side::Black, Wing::Kingside));
    assert!(position.castle.has(Side::Black, Wing::Queenside));

    position.undo();
    assert_eq!(position, before);
}

#[test]
fn queenside_castles_place_the_rook_beside_the_king() {
    let mut position = position_from_fen(CASTLING_FEN);
    let before = position.clone();

    play(&mut position, "e1c1");

    assert_eq!(position.board.get(Square::C1), white(Piece::King));
    assert_eq!(position.board.get(Square::D1), white(Piece::Rook));
    assert_eq!(position.board.get(Square::A1), None);

    position.undo();
    assert_eq!(position, before);

    play(&mut position, "e1b1");

    assert_eq!(position.board.get(Square::B1), white(Piece::King));
    assert_eq!(position.board.get(Square::C1), white(Piece::Rook));
    assert_eq!(position.board.get(Square::A1), None);
    assert!(!position.castle.any(Side::White));

    position.undo();
    assert_eq!(position, before);
}

#[test]
fn black_castles_on_its_own_rank() {
    let mut position = position_from_fen(&CASTLING_FEN.replace(" w ", " b "));
    let before = position.clone();

    play(&mut position, "e8g8");

    assert_eq!(position.board.get(Square::G8), black(Piece::King));
    assert_eq!(position.board.get(Square::F8), black(Piece::Rook));
    assert_eq!(position.board.get(Square::H8), None);
    assert!(!position.castle.any(Side::Black));
    assert!(position.castle.any(Side::White));

    position.undo();
    assert_eq!(position, before);
}

#[test]
fn rook_move_clears_only_its_wing() {
    let mut position = position_from_fen(CASTLING_FEN);

    let move_ = play(&mut position, "h1h2");
    assert!(move_.first_move);
    assert!(!position.castle.has(Side::White, Wing::Kingside));
    assert!(position.castle.has(Side::White, Wing::Queenside));
    assert!(position.castle.any(Side::Black));

    position.undo();
    assert!(position.castle.has(Side::White, Wing::Kingside));

    play(&mut position, "a1a2");
    assert!(position.castle.has(Side::White, Wing::Kingside));
    assert!(!position.castle.has(Side::White, Wing::Queenside));
}

#[test]
fn king_move_clears_both_wings_and_later_moves_keep_them_cleared() {
    let mut position = position_from_fen(CASTLING_FEN);

    let first = play(&mut position, "e1e2");
    assert!(first.first_move);
    assert!(!position.castle.any(Side::White));

    play(&mut position, "a8a7");
    let second = play(&mut position, "e2e1");
    assert!(!second.first_move);
    assert!(!position.castle.any(Side::White));

    // Rights only come back when the first king move is taken back
    position.undo();
    position.undo();
    assert!(!position.castle.any(Side::White));

    position.undo();
    assert!(position.castle.has(Side::White, Wing::Kingside));
    assert!(position.castle.has(Side::White, Wing::Queenside));
}

#[test]
fn rook_away_from_its_corner_does_not_touch_rights() {
    let mut position = position_from_fen("4k3/8/8/8/8/8/7R/R3K3 w KQ - 0 1");

    let move_ = play(&mut position, "h2h5");

    assert!(!move_.first_move);
    assert!(position.castle.has(Side::White, Wing::Kingside));
    assert!(position.castle.has(Side::White, Wing::Queenside));
}

#[test]
fn undo_restores_the_full_rights_snapshot() {
    let mut position = position_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    let before = position.castle;

    play(&mut position, "e1g1");
    assert!(!position.castle.any(Side::White));
    assert!(position.castle.has(Side::Black, Wing::Queenside));

    position.undo();
    assert_eq!(position.castle, before);
}

#[test]
fn consistency_checks_pass_on_generated_moves() {
    let mut position = Position::new();
    assert_eq!(round_trip_all(&mut position), Ok(()));
    assert_eq!(full_test_all(&mut position, 1), Ok(()));
    assert_eq!(position, Position::new());

    let mut position = position_from_fen(CASTLING_FEN);
    let before = position.clone();
    assert_eq!(round_trip_all(&mut position), Ok(()));
    assert_eq!(full_test_all(&mut position, 1), Ok(()));
    assert_eq!(position, before);

    let mut position = position_from_fen(MIDDLEGAME_FEN);
    let castle = find_move(&mut position, Square::E1, Square::G1).expect("white may castle");
    assert_eq!(full_test(&mut position, castle, 2), Ok(()));
}

#[test]
fn consistency_check_reports_a_move_with_wrong_flags() {
    let mut position = Position::new();

    // Claims a capture on a square that was empty
    let bogus = Move {
        captured: Some(Piece::Knight),
        ..Move::quiet(Square::E2, Square::E4)
    };

    assert_eq!(
        full_test(&mut position, bogus, 0),
        Err(ConsistencyError::Board {
            move_: bogus,
            depth: 0
        })
    );

    // The check puts the position back after reporting
    assert_eq!(position, Position::new());
}
