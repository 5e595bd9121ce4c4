//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;

use anyhow::bail;
use arrayvec::ArrayVec;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use caissa::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use caissa::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Returns the neighbor square in the given direction, or [`None`] when
    /// the step would leave the board.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (file_delta, rank_delta) = direction.deltas();
        self.offset(file_delta, rank_delta)
    }

    /// Relative displacement by files and ranks. Knight jumps and pawn
    /// captures are expressed through this.
    #[must_use]
    pub(super) fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || rank < 0 {
            return None;
        }
        match (File::try_from(file as u8), Rank::try_from(rank as u8)) {
            (Ok(file), Ok(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its index on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.bytes().len()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// The rank the player's pieces start on and pawns promote on for the
    /// opponent.
    #[must_use]
    pub const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    pub(super) const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The rank a doubly pushed pawn of the given player passes over.
    pub(super) const fn pawns_passing(player: Player) -> Self {
        match player {
            Player::White => Self::Three,
            Player::Black => Self::Six,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The direction the player's pawns advance in.
    #[must_use]
    pub const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }

    pub(super) const fn pawn_capture_directions(self) -> [Direction; 2] {
        match self {
            Self::White => [Direction::UpLeft, Direction::UpRight],
            Self::Black => [Direction::DownLeft, Direction::DownRight],
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(match self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            // White player: uppercase symbols.
            Player::White => symbol.to_ascii_uppercase(),
            // Black player: lowercase symbols.
            Player::Black => symbol,
        })
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves, player loses ability to castle its corresponding side. The same
    /// happens when the rook is captured on its home square without ever
    /// having moved.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
        #[allow(missing_docs)]
        const ALL = Self::WHITE_BOTH.bits() | Self::BLACK_BOTH.bits();
    }
}

impl CastleRights {
    /// The single flag for castling the given side for the given player.
    #[must_use]
    pub const fn of(player: Player, side: CastleSide) -> Self {
        match (player, side) {
            (Player::White, CastleSide::Short) => Self::WHITE_SHORT,
            (Player::White, CastleSide::Long) => Self::WHITE_LONG,
            (Player::Black, CastleSide::Short) => Self::BLACK_SHORT,
            (Player::Black, CastleSide::Long) => Self::BLACK_LONG,
        }
    }

    /// Both flags of one player.
    #[must_use]
    pub const fn both(player: Player) -> Self {
        match player {
            Player::White => Self::WHITE_BOTH,
            Player::Black => Self::BLACK_BOTH,
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] for both players from the FEN format: either
    /// "-" or a non-empty subset of "KQkq" without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] on unknown or repeated symbols.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        if input.is_empty() || input.len() > 4 {
            bail!("castle rights should be '-' or 1 to 4 symbols, got '{input}'");
        }
        let mut rights = Self::empty();
        for symbol in input.chars() {
            let flag = match symbol {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("castle rights symbol should be within \"KQkq\", got '{symbol}'"),
            };
            if rights.contains(flag) {
                bail!("repeated castle rights symbol: '{symbol}'");
            }
            rights |= flag;
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        if self.contains(Self::WHITE_SHORT) {
            f.write_char('K')?;
        }
        if self.contains(Self::WHITE_LONG) {
            f.write_char('Q')?;
        }
        if self.contains(Self::BLACK_SHORT) {
            f.write_char('k')?;
        }
        if self.contains(Self::BLACK_LONG) {
            f.write_char('q')?;
        }
        Ok(())
    }
}

/// The side towards which castling is performed: short castle (O-O) walks the
/// king towards [`File::H`], long castle (O-O-O) towards [`File::A`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CastleSide {
    Short,
    Long,
}

impl CastleSide {
    /// Where the king ends up after castling.
    #[must_use]
    pub const fn king_destination(self, player: Player) -> Square {
        Square::new(
            match self {
                Self::Short => File::G,
                Self::Long => File::C,
            },
            Rank::backrank(player),
        )
    }

    /// The rook's square before castling. A rook move from (or a capture on)
    /// this square revokes the corresponding right.
    #[must_use]
    pub const fn rook_home(self, player: Player) -> Square {
        Square::new(
            match self {
                Self::Short => File::H,
                Self::Long => File::A,
            },
            Rank::backrank(player),
        )
    }

    /// Where the rook ends up after castling.
    #[must_use]
    pub const fn rook_destination(self, player: Player) -> Square {
        Square::new(
            match self {
                Self::Short => File::F,
                Self::Long => File::D,
            },
            Rank::backrank(player),
        )
    }

    /// Squares strictly between the king and the rook, all of which have to
    /// be vacant for castling.
    pub(super) fn vacant_squares(self, player: Player) -> &'static [Square] {
        match (player, self) {
            (Player::White, Self::Short) => &[Square::F1, Square::G1],
            (Player::White, Self::Long) => &[Square::B1, Square::C1, Square::D1],
            (Player::Black, Self::Short) => &[Square::F8, Square::G8],
            (Player::Black, Self::Long) => &[Square::B8, Square::C8, Square::D8],
        }
    }

    /// Squares the king passes through (including the destination), none of
    /// which may be attacked.
    pub(super) fn king_walk(self, player: Player) -> &'static [Square] {
        match (player, self) {
            (Player::White, Self::Short) => &[Square::F1, Square::G1],
            (Player::White, Self::Long) => &[Square::D1, Square::C1],
            (Player::Black, Self::Short) => &[Square::F8, Square::G8],
            (Player::Black, Self::Long) => &[Square::D8, Square::C8],
        }
    }
}

/// A pawn reaching the last rank has to be promoted to a queen, rook, bishop
/// or a knight. Promotion is mandatory: there is no "plain" move to the last
/// rank, only the four promoting ones.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl fmt::Display for Promotion {
    /// The uppercase letter used as the move notation suffix, e.g. "e7e8Q".
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(match self {
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
        })
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South
/// (Down) and their combinations. However, using cardinal directions is
/// confusing, hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub(super) const fn deltas(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Down => (0, -1),
            Self::DownRight => (1, -1),
        }
    }

    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::DownLeft => Self::UpRight,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
        }
    }

    pub(super) const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }
}

/// What kind of state transition a [`Move`] describes, along with the data
/// specific to that kind. The captured piece is recorded on the move itself
/// so that callers never need to re-derive it from the pre-move board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Plain relocation to an empty square.
    Normal,
    /// Relocation onto an enemy-occupied square.
    Capture {
        #[allow(missing_docs)]
        captured: Piece,
    },
    /// Pawn move to the last rank; may capture diagonally at the same time.
    Promotion {
        #[allow(missing_docs)]
        promotion: Promotion,
        #[allow(missing_docs)]
        captured: Option<Piece>,
    },
    /// Pawn capture onto the en-passant target square. The captured enemy
    /// pawn sits behind the destination, not on it.
    EnPassant {
        /// Square of the captured pawn.
        captured: Square,
    },
    /// King and rook jump. `from`/`to` of the move are the king's squares.
    Castle {
        #[allow(missing_docs)]
        side: CastleSide,
    },
}

/// An immutable description of a single state transition. Constructing a move
/// does not touch the board; applying it derives a fresh
/// [`crate::chess::position::Position`]. Two moves are equal iff all fields
/// match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    piece: Piece,
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(piece: Piece, from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            piece,
            from,
            to,
            kind,
        }
    }

    /// The moving piece. For castle moves, the king.
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// True for captures of any kind, including en passant and capturing
    /// promotions.
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        match self.kind {
            MoveKind::Capture { .. } | MoveKind::EnPassant { .. } => true,
            MoveKind::Promotion { captured, .. } => captured.is_some(),
            MoveKind::Normal | MoveKind::Castle { .. } => false,
        }
    }
}

impl fmt::Display for Move {
    /// Serializes a move as source square + destination square, with an
    /// uppercase piece letter suffix for promotions (e.g. "e7e8Q"). Castle
    /// moves render as the king's relocation ("e1g1").
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let MoveKind::Promotion { promotion, .. } = self.kind {
            write!(f, "{promotion}")?;
        }
        Ok(())
    }
}

/// Pseudo-legal moves of a single piece. The longest fan-out is a queen in
/// the middle of an otherwise empty board (27 moves), so the capacity never
/// overflows.
pub type MoveList = ArrayVec<Move, 28>;

#[cfg(test)]
mod test {
    use std::mem::size_of;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('1'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
        assert!(Rank::try_from('0').is_err());
        assert!(Rank::try_from('9').is_err());
        assert!(Rank::try_from(BOARD_WIDTH).is_err());
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            vec![
                File::A,
                File::B,
                File::C,
                File::D,
                File::E,
                File::F,
                File::G,
                File::H,
            ]
        );
        assert!(File::try_from('i').is_err());
        assert!(File::try_from(BOARD_WIDTH).is_err());
    }

    #[test]
    fn square() {
        let squares: Vec<_> = [
            0u8,
            BOARD_SIZE - 1,
            BOARD_WIDTH - 1,
            BOARD_WIDTH,
            BOARD_WIDTH * 2 + 5,
            BOARD_SIZE,
        ]
        .iter()
        .filter_map(|square| Square::try_from(*square).ok())
        .collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::H8, Square::H1, Square::A2, Square::F3]
        );
        assert_eq!(Square::try_from("e4").unwrap(), Square::E4);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert!(Square::try_from("i4").is_err());
        assert!(Square::try_from("e9").is_err());
        assert!(Square::try_from("e44").is_err());
        assert_eq!(Square::E4.to_string(), "e4");
    }

    #[test]
    fn square_shifts() {
        assert_eq!(Square::E4.shift(Direction::Up), Some(Square::E5));
        assert_eq!(Square::E4.shift(Direction::UpRight), Some(Square::F5));
        assert_eq!(Square::E4.shift(Direction::UpLeft), Some(Square::D5));
        assert_eq!(Square::E4.shift(Direction::Left), Some(Square::D4));
        assert_eq!(Square::E4.shift(Direction::DownRight), Some(Square::F3));
        // Borders and corners.
        assert_eq!(Square::A1.shift(Direction::Left), None);
        assert_eq!(Square::A1.shift(Direction::Down), None);
        assert_eq!(Square::A1.shift(Direction::DownLeft), None);
        assert_eq!(Square::A1.shift(Direction::UpRight), Some(Square::B2));
        assert_eq!(Square::H8.shift(Direction::Up), None);
        assert_eq!(Square::H8.shift(Direction::Right), None);
        assert_eq!(Square::H8.shift(Direction::DownLeft), Some(Square::G7));
        assert_eq!(Square::H1.shift(Direction::UpRight), None);
        assert_eq!(Square::A8.shift(Direction::UpLeft), None);
    }

    #[test]
    fn square_offsets() {
        // Knight jumps.
        assert_eq!(Square::B1.offset(1, 2), Some(Square::C3));
        assert_eq!(Square::B1.offset(-1, 2), Some(Square::A3));
        assert_eq!(Square::B1.offset(-2, 1), None);
        assert_eq!(Square::H4.offset(2, -1), None);
    }

    #[test]
    fn directions() {
        for direction in Direction::iter() {
            assert_eq!(direction.opposite().opposite(), direction);
            let (file_delta, rank_delta) = direction.deltas();
            let (opposite_file, opposite_rank) = direction.opposite().deltas();
            assert_eq!((file_delta, rank_delta), (-opposite_file, -opposite_rank));
        }
    }

    #[test]
    fn pieces() {
        for (symbol, owner, kind) in [
            ('K', Player::White, PieceKind::King),
            ('q', Player::Black, PieceKind::Queen),
            ('R', Player::White, PieceKind::Rook),
            ('b', Player::Black, PieceKind::Bishop),
            ('N', Player::White, PieceKind::Knight),
            ('p', Player::Black, PieceKind::Pawn),
        ] {
            let piece = Piece::try_from(symbol).unwrap();
            assert_eq!(piece, Piece::new(owner, kind));
            assert_eq!(piece.to_string(), symbol.to_string());
        }
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('1').is_err());
    }

    #[test]
    fn castle_rights() {
        assert_eq!(
            CastleRights::try_from("KQkq").unwrap(),
            CastleRights::ALL
        );
        assert_eq!(
            CastleRights::try_from("-").unwrap(),
            CastleRights::empty()
        );
        assert_eq!(
            CastleRights::try_from("Kq").unwrap(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        assert!(CastleRights::try_from("").is_err());
        assert!(CastleRights::try_from("KK").is_err());
        assert!(CastleRights::try_from("KQkqK").is_err());
        assert!(CastleRights::try_from("X").is_err());
        assert_eq!(CastleRights::ALL.to_string(), "KQkq");
        assert_eq!(CastleRights::empty().to_string(), "-");
        assert_eq!(
            (CastleRights::WHITE_LONG | CastleRights::BLACK_SHORT).to_string(),
            "Qk"
        );
    }

    #[test]
    fn castle_geometry() {
        assert_eq!(
            CastleSide::Short.king_destination(Player::White),
            Square::G1
        );
        assert_eq!(CastleSide::Long.king_destination(Player::Black), Square::C8);
        assert_eq!(CastleSide::Short.rook_home(Player::Black), Square::H8);
        assert_eq!(CastleSide::Long.rook_home(Player::White), Square::A1);
        assert_eq!(
            CastleSide::Long.rook_destination(Player::White),
            Square::D1
        );
        assert_eq!(
            CastleSide::Long.vacant_squares(Player::White),
            &[Square::B1, Square::C1, Square::D1]
        );
        assert_eq!(
            CastleSide::Long.king_walk(Player::White),
            &[Square::D1, Square::C1]
        );
    }

    #[test]
    fn move_notation() {
        let knight = Piece::new(Player::White, PieceKind::Knight);
        assert_eq!(
            Move::new(knight, Square::G1, Square::F3, MoveKind::Normal).to_string(),
            "g1f3"
        );
        let pawn = Piece::new(Player::White, PieceKind::Pawn);
        assert_eq!(
            Move::new(
                pawn,
                Square::E7,
                Square::E8,
                MoveKind::Promotion {
                    promotion: Promotion::Queen,
                    captured: None,
                }
            )
            .to_string(),
            "e7e8Q"
        );
        let king = Piece::new(Player::Black, PieceKind::King);
        assert_eq!(
            Move::new(
                king,
                Square::E8,
                Square::G8,
                MoveKind::Castle {
                    side: CastleSide::Short,
                }
            )
            .to_string(),
            "e8g8"
        );
    }

    #[test]
    fn move_equality() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn);
        let push = Move::new(pawn, Square::E2, Square::E3, MoveKind::Normal);
        assert_eq!(push, Move::new(pawn, Square::E2, Square::E3, MoveKind::Normal));
        assert_ne!(push, Move::new(pawn, Square::E2, Square::E4, MoveKind::Normal));
        let captured = Piece::new(Player::Black, PieceKind::Knight);
        assert_ne!(
            push,
            Move::new(pawn, Square::E2, Square::E3, MoveKind::Capture { captured })
        );
    }

    #[test]
    fn primitive_size() {
        assert_eq!(size_of::<Square>(), 1);
        // Niche optimization keeps the mailbox array at one byte per
        // occupancy slot times two.
        assert_eq!(size_of::<Option<Piece>>(), size_of::<Piece>());
    }
}
