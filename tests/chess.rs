use caissa::chess::attacks::is_attacked;
use caissa::chess::core::{MoveKind, Square};
use caissa::chess::position::{perft, Position};
use pretty_assertions::assert_eq;

fn setup(input: &str) -> Position {
    Position::try_from(input).expect("parsing valid position")
}

fn play(position: &Position, notation: &str) -> Position {
    let next_move = position
        .find_move(notation)
        .unwrap_or_else(|| panic!("{notation} should be legal in {position}"));
    position.make_move(&next_move).unwrap()
}

#[test]
fn double_push_sets_en_passant_target() {
    let position = setup("rnbqkbnr/pppp1ppp/4p3/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2");
    let position = play(&position, "d7d5");
    assert_eq!(position.en_passant_square(), Some(Square::D6));
    assert_eq!(
        position.to_string(),
        "rnbqkbnr/ppp2ppp/4p3/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );
    // Any other move clears it again.
    let position = play(&position, "g1f3");
    assert_eq!(position.en_passant_square(), None);
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let position = setup("rnbqkbnr/ppp2ppp/4p3/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let capture = position.find_move("e5d6").unwrap();
    assert!(matches!(
        capture.kind(),
        MoveKind::EnPassant {
            captured: Square::D5
        }
    ));
    let position = position.make_move(&capture).unwrap();
    // The victim sits behind the target square and is gone; e5 is vacated.
    assert_eq!(position.at(Square::D5), None);
    assert_eq!(position.at(Square::E5), None);
    assert_eq!(
        position.to_string(),
        "rnbqkbnr/ppp2ppp/3Pp3/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );
}

#[test]
fn promotion_application() {
    let position = setup("8/5P2/8/8/8/7k/8/7K w - - 0 1");
    let position = play(&position, "f7f8Q");
    assert_eq!(position.to_string(), "5Q2/8/8/8/8/7k/8/7K b - - 0 1");
    let position = setup("8/5P2/8/8/8/7k/8/7K w - - 0 1");
    let position = play(&position, "f7f8N");
    assert_eq!(position.to_string(), "5N2/8/8/8/8/7k/8/7K b - - 0 1");
}

#[test]
fn fools_mate() {
    let mut position = Position::starting();
    for notation in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        position = play(&position, notation);
    }
    assert!(position.in_check());
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
    assert!(position.generate_moves().is_empty());
}

#[test]
fn back_rank_mate() {
    let position = setup("4R1k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
    assert!(position.is_checkmate());
}

#[test]
fn stalemate() {
    let position = setup("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!position.in_check());
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
}

#[test]
fn game_goes_on() {
    let position = Position::starting();
    assert!(!position.in_check());
    assert!(!position.is_checkmate());
    assert!(!position.is_stalemate());
}

#[test]
fn no_legal_move_exposes_own_king() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "6qk/8/8/3Pp3/8/8/K7/8 w - e6 0 1",
    ] {
        let position = setup(fen);
        let mover = position.side_to_move();
        for next_move in position.generate_moves() {
            let successor = position.make_move(&next_move).unwrap();
            let king = successor
                .board()
                .king_square(mover)
                .expect("kings do not disappear");
            assert!(
                !is_attacked(successor.board(), king, successor.side_to_move()),
                "{next_move} leaves the king exposed in {fen}"
            );
        }
    }
}

// Reference counts from https://www.chessprogramming.org/Perft_Results.
#[test]
fn perft_reference_positions() {
    // Position 2 ("kiwipete").
    let position = setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(perft(&position, 1), 48);
    assert_eq!(perft(&position, 2), 2039);
    // Position 3.
    let position = setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2812);
    // Position 4.
    let position = setup("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(perft(&position, 1), 6);
    assert_eq!(perft(&position, 2), 264);
    // Position 5.
    let position = setup("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(perft(&position, 1), 44);
    assert_eq!(perft(&position, 2), 1486);
    // Position 6.
    let position = setup("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10");
    assert_eq!(perft(&position, 1), 46);
    assert_eq!(perft(&position, 2), 2079);
}

#[test]
fn perft_starting_position() {
    let position = Position::starting();
    assert_eq!(perft(&position, 4), 197_281);
}

#[test]
fn castling_moves_both_pieces() {
    let position = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let short = play(&position, "e1g1");
    assert_eq!(short.board().to_string(), "r3k2r/8/8/8/8/8/8/R4RK1");
    let long = play(&position, "e1c1");
    assert_eq!(long.board().to_string(), "r3k2r/8/8/8/8/8/8/2KR3R");
    let position = setup("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let short = play(&position, "e8g8");
    assert_eq!(short.board().to_string(), "r4rk1/8/8/8/8/8/8/R3K2R");
    let long = play(&position, "e8c8");
    assert_eq!(long.board().to_string(), "2kr3r/8/8/8/8/8/8/R3K2R");
}
