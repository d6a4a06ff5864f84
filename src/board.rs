// Mapping di quadrati: A8=0, B8=1, ..., H1=63 (see utils.rs)
// One mailbox cell per square; Position is Copy so legality checks and search
// explore on disposable copies.

use crate::utils::{self, file_of, row_of, Square, A1, A8, H1, H8};
use crate::zobrist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn push (White moves towards row 0)
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns start
    #[inline]
    pub fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this side promotes on
    #[inline]
    pub fn promotion_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// This side's back rank row
    #[inline]
    pub fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Color {
        self.opposite()
    }
}

// Codes match the 3-bit promotion field of the move wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Promotion choices, in the order the generator emits them
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<PieceKind> {
        match code {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// FEN letter: uppercase for White
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

/// Four independent castling flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 2;
    pub const BLACK_KING: u8 = 4;
    pub const BLACK_QUEEN: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(0xF);

    /// Flags in Zobrist key order
    pub const FLAGS: [u8; 4] = [
        Self::WHITE_KING,
        Self::WHITE_QUEEN,
        Self::BLACK_KING,
        Self::BLACK_QUEEN,
    ];

    #[inline]
    pub const fn new(bits: u8) -> Self {
        CastlingRights(bits & 0xF)
    }

    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn remove(&mut self, flags: u8) {
        self.0 &= !flags;
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    pub fn king_side(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    pub fn queen_side(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        }
    }

    /// Right lost when anything leaves or lands on a rook's home corner
    fn for_corner(sq: Square) -> u8 {
        match sq {
            A8 => Self::BLACK_QUEEN,
            H8 => Self::BLACK_KING,
            A1 => Self::WHITE_QUEEN,
            H1 => Self::WHITE_KING,
            _ => 0,
        }
    }
}

/// Packed move, bit-exact wire format:
/// bits 0-5 destination, bits 6-11 origin, bits 12-14 promotion kind code,
/// bit 15 special flag (castling or en passant capture).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    const TO_MASK: u16 = 0x003F;
    const FROM_MASK: u16 = 0x0FC0;
    const FROM_SHIFT: u16 = 6;
    const PROMO_MASK: u16 = 0x7000;
    const PROMO_SHIFT: u16 = 12;
    const SPECIAL_FLAG: u16 = 0x8000;

    #[inline]
    pub fn new(from: Square, to: Square) -> Self {
        Move(((from as u16) << Self::FROM_SHIFT) & Self::FROM_MASK | (to as u16 & Self::TO_MASK))
    }

    #[inline]
    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        let base = Self::new(from, to);
        Move(base.0 | ((kind.code() as u16) << Self::PROMO_SHIFT))
    }

    /// Castling or en passant capture
    #[inline]
    pub fn special(from: Square, to: Square) -> Self {
        Move(Self::new(from, to).0 | Self::SPECIAL_FLAG)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn from(self) -> Square {
        ((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as Square
    }

    #[inline]
    pub fn to(self) -> Square {
        (self.0 & Self::TO_MASK) as Square
    }

    #[inline]
    pub fn promotion(self) -> Option<PieceKind> {
        PieceKind::from_code(((self.0 & Self::PROMO_MASK) >> Self::PROMO_SHIFT) as u8)
    }

    #[inline]
    pub fn is_special(self) -> bool {
        self.0 & Self::SPECIAL_FLAG != 0
    }

    /// Coordinate notation, e.g. "e2e4" or "e7e8q"
    pub fn to_uci(self) -> String {
        let mut s = format!(
            "{}{}",
            utils::square_to_uci(self.from()),
            utils::square_to_uci(self.to())
        );
        if let Some(kind) = self.promotion() {
            s.push(kind.to_char());
        }
        s
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())?;
        if self.is_special() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess position: mailbox board plus the state needed for move legality
/// and repetition detection.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side: Color,
    pub ep: Option<u8>,
    pub castling: CastlingRights,
    /// Half-moves since the last pawn move or capture
    pub halfmove: u16,
    pub hash: u64,
}

impl Position {
    // Board vuota; hash is 0 until pieces are placed and recalc_hash runs
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            side: Color::White,
            ep: None,
            castling: CastlingRights::NONE,
            halfmove: 0,
            hash: 0,
        }
    }

    /// The standard initial position
    pub fn start() -> Self {
        let mut pos = Self::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            pos.set_piece(file, Some(Piece::new(kind, Color::Black)));
            pos.set_piece(8 + file, Some(Piece::new(PieceKind::Pawn, Color::Black)));
            pos.set_piece(48 + file, Some(Piece::new(PieceKind::Pawn, Color::White)));
            pos.set_piece(56 + file, Some(Piece::new(kind, Color::White)));
        }
        pos.castling = CastlingRights::ALL;
        pos.hash = pos.recalc_hash();
        pos
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[sq].is_none()
    }

    /// Place a piece without touching the hash (setup helper)
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq] = piece;
    }

    /// Full Zobrist hash from scratch
    pub fn recalc_hash(&self) -> u64 {
        zobrist::hash_position(self)
    }

    /// Board, side, en passant square and castling rights equal.
    /// Clocks and hash are ignored.
    pub fn same_position(&self, other: &Position) -> bool {
        self.side == other.side
            && self.ep == other.ep
            && self.castling == other.castling
            && self.board == other.board
    }

    /// Apply a move in place, updating the hash incrementally.
    ///
    /// This is the speculative form: it never touches a repetition table.
    /// Live games go through `Game::play`. Returns false, leaving the
    /// position untouched, when the origin square is empty.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let keys = zobrist::keys();
        let from = mv.from();
        let to = mv.to();
        let Some(mut piece) = self.board[from] else {
            log::error!("apply_move: no piece on {} for move {:?}", utils::square_to_uci(from), mv);
            return false;
        };
        let us = piece.color;
        let captured = self.board[to];
        let prev_castling = self.castling;

        self.hash ^= keys.piece(piece, from);
        if let Some(victim) = captured {
            self.hash ^= keys.piece(victim, to);
        }

        if captured.is_some() || piece.kind == PieceKind::Pawn {
            self.halfmove = 0;
        } else {
            self.halfmove = self.halfmove.saturating_add(1);
        }

        if let Some(ep) = self.ep {
            self.hash ^= keys.en_passant(file_of(ep as Square));
        }
        self.ep = None;

        match piece.kind {
            PieceKind::Pawn => {
                if from.abs_diff(to) == 16 {
                    self.ep = Some(((from + to) / 2) as u8);
                } else if mv.is_special() {
                    // The captured pawn sits beside the origin, on the destination file
                    let victim_sq = row_of(from) * 8 + file_of(to);
                    if let Some(victim) = self.board[victim_sq].take() {
                        self.hash ^= keys.piece(victim, victim_sq);
                    }
                }
                if let Some(kind) = mv.promotion() {
                    piece = Piece::new(kind, us);
                } else if row_of(to) == us.promotion_row() {
                    piece = Piece::new(PieceKind::Queen, us);
                }
            }
            PieceKind::King => {
                self.castling.remove(
                    CastlingRights::king_side(us) | CastlingRights::queen_side(us),
                );
                if mv.is_special() {
                    let (rook_from, rook_to) = if to > from {
                        (to + 1, to - 1)
                    } else {
                        (to - 2, to + 1)
                    };
                    if let Some(rook) = self.board[rook_from].take() {
                        self.hash ^= keys.piece(rook, rook_from);
                        self.hash ^= keys.piece(rook, rook_to);
                        self.board[rook_to] = Some(rook);
                    }
                }
            }
            _ => {}
        }

        self.castling.remove(CastlingRights::for_corner(from));
        self.castling.remove(CastlingRights::for_corner(to));

        self.board[to] = Some(piece);
        self.board[from] = None;
        self.side = !self.side;

        let changed = prev_castling.raw() ^ self.castling.raw();
        for (i, &flag) in CastlingRights::FLAGS.iter().enumerate() {
            if changed & flag != 0 {
                self.hash ^= keys.castling(i);
            }
        }
        if let Some(ep) = self.ep {
            self.hash ^= keys.en_passant(file_of(ep as Square));
        }
        self.hash ^= keys.side_to_move();
        self.hash ^= keys.piece(piece, to);
        true
    }

    /// Copy of this position with `mv` applied
    pub fn after(&self, mv: Move) -> Position {
        let mut next = *self;
        next.apply_move(mv);
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

// Simple display (board diagram + fen)
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for file in 0..8 {
                match self.board[row * 8 + file] {
                    Some(p) => write!(f, "{} ", p.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
