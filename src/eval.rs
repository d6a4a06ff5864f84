//! Modulo di valutazione - material only
//!
//! Scores are whole pawns from the side-to-move perspective (negamax
//! convention). Terminal positions take fixed scores.

use crate::board::{PieceKind, Position};

// ============================================================================
// VALORI
// ============================================================================

/// Score of a position where the side to move is mated. Worse than any
/// material balance.
pub const CHECKMATE_SCORE: i32 = -9001;
pub const STALEMATE_SCORE: i32 = 0;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Material balance: own pieces added, enemy pieces subtracted
pub fn material(pos: &Position) -> i32 {
    pos.board
        .iter()
        .flatten()
        .map(|p| {
            let v = piece_value(p.kind);
            if p.color == pos.side {
                v
            } else {
                -v
            }
        })
        .sum()
}

/// Static evaluation.
///
/// Checkmate and stalemate are recognised first (no legal moves); any other
/// position, drawn ones included, scores its material.
pub fn evaluate(pos: &Position) -> i32 {
    if pos.legal_moves().is_empty() {
        return terminal_score(pos);
    }
    material(pos)
}

/// Score for a position already known to have no legal moves
#[inline]
pub fn terminal_score(pos: &Position) -> i32 {
    if pos.in_check() {
        CHECKMATE_SCORE
    } else {
        STALEMATE_SCORE
    }
}

// ============================================================================
// TESTS
// ============================================================================
