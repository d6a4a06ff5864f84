// Pseudo-legal move generation, one generator per piece kind.
// Moves may still leave the mover's king in check; legality.rs filters them.

use crate::board::{CastlingRights, Color, Move, PieceKind, Position};
use crate::utils::{offset, row_of, square_at, Square};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Position {
    /// Append the pseudo-legal moves of the piece on `sq`.
    /// An empty square yields nothing.
    pub fn pseudo_moves_from(&self, sq: Square, moves: &mut Vec<Move>) {
        let Some(piece) = self.board[sq] else {
            return;
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(sq, piece.color, moves),
            PieceKind::Knight => self.step_moves(sq, piece.color, &KNIGHT_DELTAS, moves),
            PieceKind::Bishop => self.slider_moves(sq, piece.color, &BISHOP_DIRS, moves),
            PieceKind::Rook => self.slider_moves(sq, piece.color, &ROOK_DIRS, moves),
            PieceKind::Queen => {
                self.slider_moves(sq, piece.color, &BISHOP_DIRS, moves);
                self.slider_moves(sq, piece.color, &ROOK_DIRS, moves);
            }
            PieceKind::King => {
                self.step_moves(sq, piece.color, &KING_DELTAS, moves);
                self.castling_moves(sq, piece.color, moves);
            }
        }
    }

    /// Pseudo-legal moves of every piece of the side to move
    pub fn pseudo_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for sq in 0..64 {
            if matches!(self.board[sq], Some(p) if p.color == self.side) {
                self.pseudo_moves_from(sq, &mut moves);
            }
        }
        moves
    }

    #[inline]
    fn is_enemy(&self, sq: Square, us: Color) -> bool {
        matches!(self.board[sq], Some(p) if p.color != us)
    }

    fn pawn_moves(&self, sq: Square, us: Color, moves: &mut Vec<Move>) {
        let fwd = us.forward();

        if let Some(one) = offset(sq, 0, fwd) {
            if self.is_empty(one) {
                push_pawn_move(sq, one, us, moves);
                if row_of(sq) == us.pawn_start_row() {
                    if let Some(two) = offset(one, 0, fwd) {
                        if self.is_empty(two) {
                            moves.push(Move::new(sq, two));
                        }
                    }
                }
            }
        }

        for df in [-1i8, 1] {
            let Some(target) = offset(sq, df, fwd) else {
                continue;
            };
            if self.is_enemy(target, us) {
                // promotion decided by the capture square's own rank
                push_pawn_move(sq, target, us, moves);
            } else if self.ep == Some(target as u8) {
                moves.push(Move::special(sq, target));
            }
        }
    }

    // Knight and king single steps
    fn step_moves(&self, sq: Square, us: Color, deltas: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in deltas {
            if let Some(target) = offset(sq, df, dr) {
                match self.board[target] {
                    Some(p) if p.color == us => {}
                    _ => moves.push(Move::new(sq, target)),
                }
            }
        }
    }

    fn slider_moves(&self, sq: Square, us: Color, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in dirs {
            let mut cur = sq;
            while let Some(target) = offset(cur, df, dr) {
                match self.board[target] {
                    None => moves.push(Move::new(sq, target)),
                    Some(p) => {
                        if p.color != us {
                            moves.push(Move::new(sq, target));
                        }
                        break;
                    }
                }
                cur = target;
            }
        }
    }

    /// Castling candidates: right still held and the squares between king
    /// and rook empty. Attack checks happen in the legality filter.
    fn castling_moves(&self, sq: Square, us: Color, moves: &mut Vec<Move>) {
        let back = us.back_row();
        if sq != square_at(4, back) {
            return;
        }
        if self.castling.has(CastlingRights::queen_side(us))
            && (1..4).all(|file| self.is_empty(square_at(file, back)))
        {
            moves.push(Move::special(sq, square_at(2, back)));
        }
        if self.castling.has(CastlingRights::king_side(us))
            && (5..7).all(|file| self.is_empty(square_at(file, back)))
        {
            moves.push(Move::special(sq, square_at(6, back)));
        }
    }
}

/// A pawn reaching the far rank yields one move per promotion choice
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut Vec<Move>) {
    if row_of(to) == us.promotion_row() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::uci_to_square;

    fn sq(s: &str) -> Square {
        uci_to_square(s).unwrap()
    }

    fn moves_from(pos: &Position, from: &str) -> Vec<Move> {
        let mut moves = Vec::new();
        pos.pseudo_moves_from(sq(from), &mut moves);
        moves
    }

    #[test]
    fn test_start_position_pseudo_count() {
        assert_eq!(Position::start().pseudo_moves().len(), 20);
    }

    #[test]
    fn test_knight_does_not_wrap() {
        let pos = Position::from_fen("7k/8/8/8/8/8/8/K6N w - - 0 1").unwrap();
        let moves = moves_from(&pos, "h1");
        let targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
        assert_eq!(moves.len(), 2);
        assert!(targets.contains(&sq("g3")));
        assert!(targets.contains(&sq("f2")));
    }

    #[test]
    fn test_slider_stops_at_blockers() {
        let pos = Position::from_fen("7k/8/8/3p4/8/8/3P4/K2R4 w - - 0 1").unwrap();
        // rook d1: left c1 b1 (a1 own king), right e1..h1, up blocked by own d2
        let moves = moves_from(&pos, "d1");
        assert_eq!(moves.len(), 6);
        assert!(!moves.iter().any(|m| m.to() == sq("d2")));
    }

    #[test]
    fn test_capture_promotion_uses_capture_rank() {
        // b7 pawn blocked on b8, own knight on c8, only a8 capturable
        let pos = Position::from_fen("rnN4k/1P6/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = moves_from(&pos, "b7");
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to() == sq("a8")));
        assert!(moves.iter().all(|m| m.promotion().is_some()));
    }

    #[test]
    fn test_en_passant_candidate() {
        let pos = Position::from_fen("7k/8/8/3pP3/8/8/8/K7 w - d6 0 1").unwrap();
        let moves = moves_from(&pos, "e5");
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_special()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), sq("d6"));
    }

    #[test]
    fn test_castling_needs_empty_path() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
        let white: Vec<Move> = moves_from(&pos, "e1").into_iter().filter(|m| m.is_special()).collect();
        assert!(white.is_empty());
        let mut black_pos = pos;
        black_pos.side = Color::Black;
        let black: Vec<Move> = moves_from(&black_pos, "e8").into_iter().filter(|m| m.is_special()).collect();
        assert_eq!(black.len(), 2);
    }
}
