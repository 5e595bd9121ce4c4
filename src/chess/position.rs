//! Provides fully-specified [Chess Position] implementation: stores
//! information about the board and tracks the state of castling, 50-move rule
//! draw, etc. It has 1:1 relationship with [Forsyth-Edwards Notation] (FEN).
//!
//! A position is immutable once constructed: applying a move derives a fresh
//! successor and leaves the original untouched, so history/undo is simply
//! "keep the previous instance" and concurrent readers can generate moves
//! from a shared position without coordination.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt;
use std::num::NonZeroU16;

use anyhow::{bail, Context};

use crate::chess::attacks;
use crate::chess::board::Board;
use crate::chess::core::{
    CastleRights,
    CastleSide,
    File,
    Move,
    MoveKind,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_WIDTH,
};
use crate::chess::movegen;

/// State of the chess game: board, side to move, castling rights, en-passant
/// target and half-/full-move counters.
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`] from FEN coming from an untrusted source: it cleans up
/// surrounding whitespace and delegates to [`Position::from_fen`].
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    castling: CastleRights,
    side_to_move: Player,
    /// [Halfmove Clock][^ply] keeps track of the number of (half-)moves
    /// since the last capture or pawn move and is used to enforce
    /// fifty[^fifty]-move draw rule.
    ///
    /// [Halfmove Clock]: https://www.chessprogramming.org/Halfmove_Clock
    /// [^ply]: "Half-move" or ["ply"](https://www.chessprogramming.org/Ply) means a move of only
    ///     one side.
    /// [^fifty]: 50 __full__ moves
    halfmove_clock: u8,
    fullmove_counter: NonZeroU16,
    en_passant_square: Option<Square>,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use caissa::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            castling: CastleRights::ALL,
            ..Self::empty()
        }
    }

    /// Creates an empty board with White to move, to be filled by the parser
    /// or by hand through [`Board::put`] in tests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            castling: CastleRights::empty(),
            side_to_move: Player::White,
            halfmove_clock: 0,
            fullmove_counter: NonZeroU16::MIN,
            en_passant_square: None,
        }
    }

    /// The occupancy snapshot this position wraps.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece on the given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// The player whose turn it is.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Castling ability still held by both players.
    #[must_use]
    pub const fn castle_rights(&self) -> CastleRights {
        self.castling
    }

    /// The square a doubly pushed pawn has just passed over, if the last move
    /// was a double push.
    #[must_use]
    pub const fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Number of half-moves since the last capture or pawn move.
    #[must_use]
    pub const fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    /// Number of the current full move, starting at 1 and incremented after
    /// each of Black's moves.
    #[must_use]
    pub const fn fullmove_counter(&self) -> NonZeroU16 {
        self.fullmove_counter
    }

    fn us(&self) -> Player {
        self.side_to_move
    }

    fn they(&self) -> Player {
        self.us().opponent()
    }

    /// Calculates the list of fully legal moves for the side to move: the
    /// pseudo-legal moves of every piece, minus those that would leave (or
    /// put) the mover's own king under attack.
    #[must_use]
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(50);
        for (from, piece) in self.board.occupied() {
            if piece.owner != self.us() {
                continue;
            }
            for candidate in movegen::pseudo_legal_moves(self, from) {
                if !self.leaves_king_exposed(&candidate) {
                    moves.push(candidate);
                }
            }
        }
        moves
    }

    /// Looks up the legal move with the given notation (e.g. "e2e4",
    /// "e7e8Q"), if the side to move has one.
    #[must_use]
    pub fn find_move(&self, notation: &str) -> Option<Move> {
        self.generate_moves()
            .into_iter()
            .find(|candidate| candidate.to_string() == notation)
    }

    /// Applies a legal move and returns the successor position. The original
    /// position is left untouched.
    ///
    /// # Errors
    ///
    /// Rejects moves that are not in the legal move set of this position; no
    /// silent correction is attempted.
    pub fn make_move(&self, next_move: &Move) -> anyhow::Result<Self> {
        if !self.generate_moves().contains(next_move) {
            bail!("move {next_move} is not legal in position {self}");
        }
        Ok(self.successor(next_move))
    }

    /// True iff the king of the side to move is attacked by the opponent.
    #[must_use]
    pub fn in_check(&self) -> bool {
        match self.board.king_square(self.us()) {
            Some(king) => attacks::is_attacked(&self.board, king, self.they()),
            None => false,
        }
    }

    /// In check with no legal moves left.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Not in check but with no legal moves left.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }

    // Simulates the move on a scratch copy of the board and checks whether
    // the mover's king ends up attacked. The scratch copy is never observable
    // outside this check. A side with no king on the board (hand-built
    // scaffolding positions) is never in check.
    fn leaves_king_exposed(&self, candidate: &Move) -> bool {
        let mut scratch = self.board;
        apply(&mut scratch, candidate);
        match scratch.king_square(self.us()) {
            Some(king) => attacks::is_attacked(&scratch, king, self.they()),
            None => false,
        }
    }

    // Derives the successor position without re-checking legality.
    fn successor(&self, next_move: &Move) -> Self {
        let mut board = self.board;
        apply(&mut board, next_move);

        let mut castling = self.castling;
        castling.remove(revoked_rights(next_move));

        // Only a double push exposes its passed-over square to en passant;
        // everything else clears the target.
        let piece = next_move.piece();
        let double_push = piece.kind == PieceKind::Pawn
            && (next_move.from().rank() as i8 - next_move.to().rank() as i8).abs() == 2;
        let en_passant_square = if double_push {
            Some(Square::new(
                next_move.from().file(),
                Rank::pawns_passing(piece.owner),
            ))
        } else {
            None
        };

        let halfmove_clock = if piece.kind == PieceKind::Pawn || next_move.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        let fullmove_counter = match self.us() {
            Player::White => self.fullmove_counter,
            Player::Black => self.fullmove_counter.saturating_add(1),
        };

        Self {
            board,
            castling,
            side_to_move: self.they(),
            halfmove_clock,
            fullmove_counter,
            en_passant_square,
        }
    }

    /// Checks whether the position is reachable-looking: exactly one king per
    /// side, no more than eight pawns per side, no pawns on the back ranks,
    /// the side that just moved not left in check, and a consistent
    /// en-passant target. The FEN parser does not enforce this (scaffolding
    /// positions such as a lone bishop are useful in tests), so callers
    /// consuming untrusted positions should check it themselves.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        for player in [Player::White, Player::Black] {
            let mut kings = 0;
            let mut pawns = 0;
            for (square, piece) in self.board.occupied() {
                if piece.owner != player {
                    continue;
                }
                match piece.kind {
                    PieceKind::King => kings += 1,
                    PieceKind::Pawn => {
                        pawns += 1;
                        if square.rank() == Rank::One || square.rank() == Rank::Eight {
                            return false;
                        }
                    },
                    _ => (),
                }
            }
            if kings != 1 || pawns > 8 {
                return false;
            }
        }
        // The player who just moved can not have left their king en prise.
        if let Some(king) = self.board.king_square(self.they()) {
            if attacks::is_attacked(&self.board, king, self.us()) {
                return false;
            }
        }
        if let Some(en_passant_square) = self.en_passant_square {
            if en_passant_square.rank() != Rank::pawns_passing(self.they()) {
                return false;
            }
            if self.board.at(en_passant_square).is_some() {
                return false;
            }
            // The doubly pushed pawn should still be in front of the target.
            let pushed_pawn = en_passant_square
                .shift(self.they().push_direction())
                .and_then(|square| self.board.at(square));
            if pushed_pawn != Some(Piece::new(self.they(), PieceKind::Pawn)) {
                return false;
            }
        }
        true
    }

    /// Parses a position from Forsyth-Edwards Notation.
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// All six fields are required. No cleanup is performed: use
    /// [`Position::try_from`] for input that may carry surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field on any malformed input; no
    /// partial position is ever produced.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let mut result = Self::empty();
        let pieces_placement = match parts.next() {
            Some(placement) => placement,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in pieces_placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {pieces_placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file > BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} exceeds {BOARD_WIDTH} files");
                }
                match symbol {
                    '0' => bail!("incorrect FEN: empty square run can not be 0"),
                    '1'..='9' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                let _ = result.board.put(Square::new(File::try_from(file)?, rank), piece);
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, \
                     got {rank_fen} of length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {pieces_placement}");
        }
        result.side_to_move = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        result.castling = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing castling rights"),
        };
        result.en_passant_square = match parts.next() {
            Some("-") => None,
            Some(value) => Some(value.try_into()?),
            None => bail!("incorrect FEN: missing en passant square"),
        };
        result.halfmove_clock = match parts.next() {
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("halfmove clock can not contain anything other than digits");
                }
                value
                    .parse::<u8>()
                    .with_context(|| format!("incorrect FEN: halfmove clock can not be parsed {value}"))?
            },
            None => bail!("incorrect FEN: missing halfmove clock"),
        };
        result.fullmove_counter = match parts.next() {
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("fullmove counter can not contain anything other than digits");
                }
                value
                    .parse::<NonZeroU16>()
                    .with_context(|| format!("incorrect FEN: fullmove counter can not be parsed {value}"))?
            },
            None => bail!("incorrect FEN: missing fullmove counter"),
        };
        match parts.next() {
            None => Ok(result),
            Some(_) => bail!("trailing symbols are not allowed in FEN"),
        }
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Cleans up surrounding whitespace and parses the input as FEN.
    ///
    /// # Errors
    ///
    /// See [`Position::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_fen(input.trim())
    }
}

impl fmt::Display for Position {
    /// Prints the position in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.board, self.side_to_move, self.castling)?;
        match self.en_passant_square {
            Some(square) => write!(f, "{square} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} {}", self.halfmove_clock, self.fullmove_counter)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Player to move: {:?}", &self.side_to_move)?;
        writeln!(f, "Fullmove counter: {:?}", &self.fullmove_counter)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant_square)?;
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}

// Applies a move to the raw board: relocations and removals only, no
// bookkeeping. Used both for real application and for the scratch
// simulations of the legality filter.
fn apply(board: &mut Board, next_move: &Move) {
    let piece = next_move.piece();
    let _ = board.remove(next_move.from());
    match next_move.kind() {
        MoveKind::Normal | MoveKind::Capture { .. } => {
            let _ = board.put(next_move.to(), piece);
        },
        MoveKind::Promotion { promotion, .. } => {
            let _ = board.put(next_move.to(), Piece::new(piece.owner, promotion.into()));
        },
        MoveKind::EnPassant { captured } => {
            let _ = board.remove(captured);
            let _ = board.put(next_move.to(), piece);
        },
        MoveKind::Castle { side } => {
            let _ = board.put(next_move.to(), piece);
            if let Some(rook) = board.remove(side.rook_home(piece.owner)) {
                let _ = board.put(side.rook_destination(piece.owner), rook);
            }
        },
    }
}

// Castling rights lost by playing the move: both rights of a side whose king
// moves, the matching right of a side whose rook leaves its home square, and
// the matching right of a side whose rook is captured on its home square.
fn revoked_rights(next_move: &Move) -> CastleRights {
    let mut revoked = CastleRights::empty();
    let player = next_move.piece().owner;
    match next_move.piece().kind {
        PieceKind::King => revoked |= CastleRights::both(player),
        PieceKind::Rook => {
            for side in [CastleSide::Short, CastleSide::Long] {
                if next_move.from() == side.rook_home(player) {
                    revoked |= CastleRights::of(player, side);
                }
            }
        },
        _ => (),
    }
    let captured = match next_move.kind() {
        MoveKind::Capture { captured } => Some(captured),
        MoveKind::Promotion { captured, .. } => captured,
        _ => None,
    };
    if let Some(captured) = captured {
        if captured.kind == PieceKind::Rook {
            for side in [CastleSide::Short, CastleSide::Long] {
                if next_move.to() == side.rook_home(captured.owner) {
                    revoked |= CastleRights::of(captured.owner, side);
                }
            }
        }
    }
    revoked
}

/// Counts leaf nodes of the legal move tree of the given depth. [Perft] is
/// the standard way of validating move generation against well-known
/// reference counts.
///
/// [Perft]: https://www.chessprogramming.org/Perft
#[must_use]
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|next_move| perft(&position.successor(next_move), depth - 1))
        .sum()
}
