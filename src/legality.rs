// Legality filter: attack detection, king location, in-check and the
// legal move lists built on top of the pseudo-legal generator.

use thiserror::Error;

use crate::board::{Color, Move, Piece, PieceKind, Position};
use crate::movegen::{BISHOP_DIRS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRS};
use crate::utils::{self, offset, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move notation '{0}'")]
    InvalidNotation(String),
    #[error("illegal move '{0}'")]
    IllegalMove(String),
}

/// Set of squares attacked by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackMap(u64);

impl AttackMap {
    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq) != 0
    }

    #[inline]
    fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq;
    }
}

impl Position {
    /// Every square attacked by `by`, from a scan of its pieces.
    /// Pawns contribute their diagonals only and the king its adjacent
    /// squares only (never castling).
    pub fn attack_map(&self, by: Color) -> AttackMap {
        let mut map = AttackMap::default();
        for sq in 0..64 {
            let Some(piece) = self.board[sq] else { continue };
            if piece.color != by {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => {
                    for df in [-1i8, 1] {
                        if let Some(t) = offset(sq, df, by.forward()) {
                            map.insert(t);
                        }
                    }
                }
                PieceKind::Knight => {
                    for &(df, dr) in &KNIGHT_DELTAS {
                        if let Some(t) = offset(sq, df, dr) {
                            map.insert(t);
                        }
                    }
                }
                PieceKind::King => {
                    for &(df, dr) in &KING_DELTAS {
                        if let Some(t) = offset(sq, df, dr) {
                            map.insert(t);
                        }
                    }
                }
                PieceKind::Bishop => self.ray_attacks(sq, &BISHOP_DIRS, &mut map),
                PieceKind::Rook => self.ray_attacks(sq, &ROOK_DIRS, &mut map),
                PieceKind::Queen => {
                    self.ray_attacks(sq, &BISHOP_DIRS, &mut map);
                    self.ray_attacks(sq, &ROOK_DIRS, &mut map);
                }
            }
        }
        map
    }

    fn ray_attacks(&self, sq: Square, dirs: &[(i8, i8)], map: &mut AttackMap) {
        for &(df, dr) in dirs {
            let mut cur = sq;
            while let Some(t) = offset(cur, df, dr) {
                map.insert(t);
                if self.board[t].is_some() {
                    break;
                }
                cur = t;
            }
        }
    }

    /// Whether `by` attacks `sq`, looking outwards from the square.
    /// Agrees with `attack_map(by).contains(sq)`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let has = |t: Square, kinds: &[PieceKind]| {
            matches!(self.board[t], Some(p) if p.color == by && kinds.contains(&p.kind))
        };

        // an attacking pawn stands one row behind the target, seen from its side
        for df in [-1i8, 1] {
            if let Some(t) = offset(sq, df, -by.forward()) {
                if has(t, &[PieceKind::Pawn]) {
                    return true;
                }
            }
        }
        for &(df, dr) in &KNIGHT_DELTAS {
            if let Some(t) = offset(sq, df, dr) {
                if has(t, &[PieceKind::Knight]) {
                    return true;
                }
            }
        }
        for &(df, dr) in &KING_DELTAS {
            if let Some(t) = offset(sq, df, dr) {
                if has(t, &[PieceKind::King]) {
                    return true;
                }
            }
        }
        let rays = [
            (&BISHOP_DIRS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ROOK_DIRS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs.iter() {
                let mut cur = sq;
                while let Some(t) = offset(cur, df, dr) {
                    if self.board[t].is_some() {
                        if has(t, &sliders) {
                            return true;
                        }
                        break;
                    }
                    cur = t;
                }
            }
        }
        false
    }

    /// Square of `color`'s king. A board without one is a caller bug:
    /// it is logged and square 0 is returned.
    pub fn king_square(&self, color: Color) -> Square {
        let king = Some(Piece::new(PieceKind::King, color));
        match self.board.iter().position(|&cell| cell == king) {
            Some(sq) => sq,
            None => {
                log::error!("king_square: no {:?} king on the board ({})", color, self.to_fen());
                0
            }
        }
    }

    /// Whether the side to move is in check
    pub fn in_check(&self) -> bool {
        self.is_square_attacked(self.king_square(self.side), !self.side)
    }

    /// Legal moves of the piece on `sq`
    pub fn legal_moves_from(&self, sq: Square) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(28);
        self.pseudo_moves_from(sq, &mut pseudo);
        let mut enemy_attacks = None;
        pseudo.retain(|&mv| self.is_legal(mv, &mut enemy_attacks));
        pseudo
    }

    /// All legal moves of the side to move, in board order
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut pseudo = self.pseudo_moves();
        let mut enemy_attacks = None;
        pseudo.retain(|&mv| self.is_legal(mv, &mut enemy_attacks));
        pseudo
    }

    /// `enemy_attacks` caches the opponent's attack map for castling checks
    /// across one legal-move call.
    fn is_legal(&self, mv: Move, enemy_attacks: &mut Option<AttackMap>) -> bool {
        let Some(piece) = self.board[mv.from()] else {
            return false;
        };
        let them = !piece.color;

        if piece.kind == PieceKind::King && mv.is_special() {
            let attacks = *enemy_attacks.get_or_insert_with(|| self.attack_map(them));
            let from = mv.from();
            let to = mv.to();
            let through = (from + to) / 2;
            return !attacks.contains(from) && !attacks.contains(through) && !attacks.contains(to);
        }

        let next = self.after(mv);
        let king = next.king_square(piece.color);
        !next.is_square_attacked(king, them)
    }

    /// Resolve coordinate notation ("e2e4", "e7e8q", "e1g1") to a legal
    /// move. A promotion without a piece letter promotes to a queen.
    pub fn parse_uci_move(&self, s: &str) -> Result<Move, MoveParseError> {
        let invalid = || MoveParseError::InvalidNotation(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from = utils::uci_to_square(&s[0..2]).ok_or_else(invalid)?;
        let to = utils::uci_to_square(&s[2..4]).ok_or_else(invalid)?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
                _ => return Err(invalid()),
            },
        };

        let candidates: Vec<Move> = self
            .legal_moves_from(from)
            .into_iter()
            .filter(|m| m.to() == to)
            .collect();
        let wanted = match (promotion, candidates.iter().any(|m| m.promotion().is_some())) {
            (Some(k), _) => Some(k),
            (None, true) => Some(PieceKind::Queen),
            (None, false) => None,
        };
        candidates
            .into_iter()
            .find(|m| m.promotion() == wanted)
            .ok_or_else(|| MoveParseError::IllegalMove(s.to_string()))
    }
}
