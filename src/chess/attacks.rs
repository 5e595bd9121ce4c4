//! Attack detection: whether a given square is attacked by any piece of a
//! given player. This is the primitive behind check detection, the legality
//! filter and the castling preconditions.
//!
//! The scan walks outward from the *target* square (pawn/knight/king offsets
//! plus blocked ray walks for the sliders) instead of enumerating every
//! enemy move. The answer is identical (a piece attacks the target iff the
//! target can "see" the piece along the matching pattern), and the outward
//! scan stays cheap and never needs castling state.

use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Direction, Piece, PieceKind, Player, Square};
use crate::chess::movegen::KNIGHT_JUMPS;

/// Returns true iff any piece of `attacker` attacks `target` on the given
/// board. En-passant and castling are not attacks: neither can ever land on
/// an occupied square.
#[must_use]
pub fn is_attacked(board: &Board, target: Square, attacker: Player) -> bool {
    // Pawns: the attacker's pawn sits one diagonal step against its push
    // direction, from the target's point of view.
    for direction in attacker.opponent().pawn_capture_directions() {
        if let Some(square) = target.shift(direction) {
            if board.at(square) == Some(Piece::new(attacker, PieceKind::Pawn)) {
                return true;
            }
        }
    }
    // Knights.
    for (file_delta, rank_delta) in KNIGHT_JUMPS {
        if let Some(square) = target.offset(file_delta, rank_delta) {
            match board.at(square) {
                Some(piece) if piece.owner == attacker && piece.kind == PieceKind::Knight => {
                    return true;
                },
                _ => (),
            }
        }
    }
    // Kings, and sliders along blocked rays.
    for direction in Direction::iter() {
        if let Some(square) = target.shift(direction) {
            match board.at(square) {
                Some(piece) if piece.owner == attacker && piece.kind == PieceKind::King => {
                    return true;
                },
                _ => (),
            }
        }
        if attacked_through_ray(board, target, attacker, direction) {
            return true;
        }
    }
    false
}

/// Returns true iff any of the given squares is attacked. The castling king
/// walk is validated through this.
#[must_use]
pub fn any_attacked(board: &Board, squares: &[Square], attacker: Player) -> bool {
    squares
        .iter()
        .any(|square| is_attacked(board, *square, attacker))
}

// Walks away from the target square until the first occupied square; the
// target is attacked through this ray iff that square holds an attacker
// slider matching the ray type (queen on any ray, bishop on diagonals, rook
// on orthogonals).
fn attacked_through_ray(
    board: &Board,
    target: Square,
    attacker: Player,
    direction: Direction,
) -> bool {
    let mut current = target;
    while let Some(next) = current.shift(direction) {
        current = next;
        match board.at(current) {
            None => continue,
            Some(piece) => {
                return piece.owner == attacker
                    && match piece.kind {
                        PieceKind::Queen => true,
                        PieceKind::Bishop => direction.is_diagonal(),
                        PieceKind::Rook => !direction.is_diagonal(),
                        PieceKind::King | PieceKind::Knight | PieceKind::Pawn => false,
                    };
            },
        }
    }
    false
}
