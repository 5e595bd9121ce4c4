//! Pseudo-legal move generation: each piece kind maps to one generation
//! strategy through an exhaustive match, so adding a piece kind without a
//! generator does not compile. "Pseudo-legal" means consistent with the
//! piece's movement pattern and board occupancy, ignoring whether the
//! mover's own king is left in check; the legality filter in
//! [`crate::chess::position::Position`] is responsible for that.

use strum::IntoEnumIterator;

use crate::chess::attacks;
use crate::chess::board::Board;
use crate::chess::core::{
    CastleRights,
    CastleSide,
    Direction,
    File,
    Move,
    MoveKind,
    MoveList,
    Piece,
    PieceKind,
    Promotion,
    Rank,
    Square,
};
use crate::chess::position::Position;

/// Rays of a bishop: the four diagonals.
const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

/// Rays of a rook: the four orthogonals.
const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Rays of a queen: all eight directions.
const QUEEN_DIRECTIONS: [Direction; 8] = [
    Direction::UpLeft,
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::Left,
    Direction::DownLeft,
    Direction::Down,
    Direction::DownRight,
];

/// The eight L-shaped (file, rank) displacements of a knight.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Generates pseudo-legal moves for whatever piece occupies `from`. An empty
/// square yields an empty list, not an error: generators are total over the
/// board.
#[must_use]
pub fn pseudo_legal_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let piece = match position.board().at(from) {
        Some(piece) => piece,
        None => return moves,
    };
    let board = position.board();
    match piece.kind {
        PieceKind::Bishop => directed_moves(board, piece, from, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => directed_moves(board, piece, from, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => directed_moves(board, piece, from, &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::Knight => knight_moves(board, piece, from, &mut moves),
        PieceKind::King => king_moves(position, piece, from, &mut moves),
        PieceKind::Pawn => pawn_moves(position, piece, from, &mut moves),
    }
    moves
}

// Shared sliding walker: walk outward one square at a time per direction; an
// empty square continues the ray, the first enemy piece is captured and
// stops it, a friendly piece stops it without a move.
fn directed_moves(
    board: &Board,
    piece: Piece,
    from: Square,
    directions: &[Direction],
    moves: &mut MoveList,
) {
    for direction in directions {
        let mut current = from;
        while let Some(next) = current.shift(*direction) {
            current = next;
            match board.at(current) {
                None => moves.push(Move::new(piece, from, current, MoveKind::Normal)),
                Some(target) => {
                    if target.owner != piece.owner {
                        moves.push(Move::new(
                            piece,
                            from,
                            current,
                            MoveKind::Capture { captured: target },
                        ));
                    }
                    break;
                },
            }
        }
    }
}

// Pushes a move to a fixed-offset target: empty square is a normal move,
// enemy piece a capture, friendly piece nothing.
fn offset_move(board: &Board, piece: Piece, from: Square, to: Square, moves: &mut MoveList) {
    match board.at(to) {
        None => moves.push(Move::new(piece, from, to, MoveKind::Normal)),
        Some(target) if target.owner != piece.owner => moves.push(Move::new(
            piece,
            from,
            to,
            MoveKind::Capture { captured: target },
        )),
        Some(_) => (),
    }
}

fn knight_moves(board: &Board, piece: Piece, from: Square, moves: &mut MoveList) {
    for (file_delta, rank_delta) in KNIGHT_JUMPS {
        if let Some(to) = from.offset(file_delta, rank_delta) {
            offset_move(board, piece, from, to, moves);
        }
    }
}

fn king_moves(position: &Position, piece: Piece, from: Square, moves: &mut MoveList) {
    for direction in Direction::iter() {
        if let Some(to) = from.shift(direction) {
            offset_move(position.board(), piece, from, to, moves);
        }
    }
    castle_moves(position, piece, from, moves);
}

// Castle preconditions: the right is still held, the rook is home, every
// square strictly between king and rook is vacant, and neither the king's
// square nor any square of its walk (destination included) is attacked.
fn castle_moves(position: &Position, piece: Piece, from: Square, moves: &mut MoveList) {
    let player = piece.owner;
    if from != Square::new(File::E, Rank::backrank(player)) {
        return;
    }
    let board = position.board();
    let enemy = player.opponent();
    for side in [CastleSide::Short, CastleSide::Long] {
        if !position.castle_rights().contains(CastleRights::of(player, side)) {
            continue;
        }
        if board.at(side.rook_home(player)) != Some(Piece::new(player, PieceKind::Rook)) {
            continue;
        }
        if side
            .vacant_squares(player)
            .iter()
            .any(|square| board.at(*square).is_some())
        {
            continue;
        }
        if attacks::is_attacked(board, from, enemy)
            || attacks::any_attacked(board, side.king_walk(player), enemy)
        {
            continue;
        }
        moves.push(Move::new(
            piece,
            from,
            side.king_destination(player),
            MoveKind::Castle { side },
        ));
    }
}

fn pawn_moves(position: &Position, piece: Piece, from: Square, moves: &mut MoveList) {
    let board = position.board();
    let player = piece.owner;
    let forward = player.push_direction();
    // Pushes. A blocked single step rules out the double step as well.
    if let Some(to) = from.shift(forward) {
        if board.at(to).is_none() {
            push_pawn_move(moves, piece, from, to, None);
            if from.rank() == Rank::pawns_starting(player) {
                if let Some(jump) = to.shift(forward) {
                    if board.at(jump).is_none() {
                        moves.push(Move::new(piece, from, jump, MoveKind::Normal));
                    }
                }
            }
        }
    }
    // Diagonal captures, including the en-passant capture onto the recorded
    // target square (the victim pawn sits behind it).
    for direction in player.pawn_capture_directions() {
        let to = match from.shift(direction) {
            Some(to) => to,
            None => continue,
        };
        match board.at(to) {
            Some(target) if target.owner != player => {
                push_pawn_move(moves, piece, from, to, Some(target));
            },
            None if position.en_passant_square() == Some(to) => {
                if let Some(captured) = to.shift(forward.opposite()) {
                    moves.push(Move::new(piece, from, to, MoveKind::EnPassant { captured }));
                }
            },
            _ => (),
        }
    }
}

// A pawn landing on the last rank always promotes: exactly four moves, one
// per promotion choice, never a bare push or capture.
fn push_pawn_move(
    moves: &mut MoveList,
    piece: Piece,
    from: Square,
    to: Square,
    captured: Option<Piece>,
) {
    if to.rank() == Rank::backrank(piece.owner.opponent()) {
        for promotion in Promotion::iter() {
            moves.push(Move::new(
                piece,
                from,
                to,
                MoveKind::Promotion {
                    promotion,
                    captured,
                },
            ));
        }
    } else {
        let kind = match captured {
            Some(captured) => MoveKind::Capture { captured },
            None => MoveKind::Normal,
        };
        moves.push(Move::new(piece, from, to, kind));
    }
}
