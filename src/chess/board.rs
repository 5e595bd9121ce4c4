//! Square-centric ("mailbox") implementation of the chess board: a flat
//! array mapping each of the 64 squares to an optional piece. Array occupancy
//! is the single source of truth: there are no piece-to-square
//! back-references to keep consistent. The board is rule-agnostic: it does
//! not know whose turn it is or whether a placement is legal; those concerns
//! belong to [`crate::chess::position::Position`].

use std::fmt::{self, Write};

use strum::IntoEnumIterator;

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE};

/// Owns the occupancy of all 64 squares. Cheap to copy (128 bytes), which is
/// what the legality filter relies on for its scratch simulations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Constructs a board with no pieces, to be filled by the FEN parser or
    /// by hand through [`Board::put`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Constructs the standard starting arrangement.
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for (file, kind) in File::iter().zip(BACKRANK) {
            let _ = board.put(
                Square::new(file, Rank::One),
                Piece::new(Player::White, kind),
            );
            let _ = board.put(
                Square::new(file, Rank::Eight),
                Piece::new(Player::Black, kind),
            );
            let _ = board.put(
                Square::new(file, Rank::Two),
                Piece::new(Player::White, PieceKind::Pawn),
            );
            let _ = board.put(
                Square::new(file, Rank::Seven),
                Piece::new(Player::Black, PieceKind::Pawn),
            );
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Places a piece on a square, detaching and returning whatever occupied
    /// it before. Capture *semantics* (clocks, rights, en passant) belong to
    /// move application; this is the raw placement primitive shared by the
    /// FEN parser and move application.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square as usize].replace(piece)
    }

    /// Removes and returns the piece on the given square, if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Iterates over all occupied squares, A1 to H8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Locates the king of the given player. A board populated by hand (e.g.
    /// in tests) may have none.
    #[must_use]
    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.owner == player)
            .map(|(square, _)| square)
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format: ranks 8 down to 1,
    /// '/'-separated, runs of empty squares compressed to digits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN
    /// algebraic symbol for piece) a-la Stockfish "debug" command in UCI
    /// mode.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, " ")?;
                }
            }
            if rank != Rank::One {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn square_grid() {
        // Exactly 8 files of 8 ranks each, no duplicates or gaps.
        assert_eq!(File::iter().count(), 8);
        assert_eq!(Rank::iter().count(), 8);
        assert_eq!(Square::iter().count(), 64);
        for file in File::iter() {
            assert_eq!(
                Rank::iter()
                    .filter(|rank| Square::new(file, *rank).file() == file)
                    .count(),
                8
            );
        }
        let names: Vec<_> = File::iter().map(|file| file.to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    }

    #[test]
    fn placement() {
        let mut board = Board::empty();
        let bishop = Piece::new(Player::White, PieceKind::Bishop);
        let knight = Piece::new(Player::Black, PieceKind::Knight);
        assert_eq!(board.at(Square::D4), None);
        assert_eq!(board.put(Square::D4, bishop), None);
        assert_eq!(board.at(Square::D4), Some(bishop));
        // Placing over an occupied square detaches the previous piece.
        assert_eq!(board.put(Square::D4, knight), Some(bishop));
        assert_eq!(board.at(Square::D4), Some(knight));
        assert_eq!(board.remove(Square::D4), Some(knight));
        assert_eq!(board.at(Square::D4), None);
        assert_eq!(board.remove(Square::D4), None);
    }

    #[test]
    fn starting_board() {
        let board = Board::starting();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_square(Player::White), Some(Square::E1));
        assert_eq!(board.king_square(Player::Black), Some(Square::E8));
        assert_eq!(
            board.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(
            format!("{board:?}"),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
    }

    #[test]
    fn empty_board() {
        let board = Board::empty();
        assert_eq!(board.occupied().count(), 0);
        assert_eq!(board.king_square(Player::White), None);
        assert_eq!(board.to_string(), "8/8/8/8/8/8/8/8");
    }
}
