//! Move ordering
//!
//! Captures where the moving piece's kind code is below the victim's are
//! swapped to the front, in the order found. The swaps may reshuffle the
//! remaining moves.

use crate::board::{Move, Position};

#[inline]
fn kind_code(pos: &Position, sq: usize) -> u8 {
    pos.board[sq].map_or(0, |p| p.kind.code())
}

/// Whether `mv` captures a piece with a higher kind code than the mover
#[inline]
pub fn is_good_capture(pos: &Position, mv: Move) -> bool {
    kind_code(pos, mv.from()) < kind_code(pos, mv.to())
}

/// Partition `moves` in place, good captures first. Returns how many there are.
pub fn order_moves(pos: &Position, moves: &mut [Move]) -> usize {
    let mut good = 0;
    for i in 0..moves.len() {
        if is_good_capture(pos, moves[i]) {
            moves.swap(good, i);
            good += 1;
        }
    }
    good
}
