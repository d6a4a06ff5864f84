// Perft: count leaf nodes of the legal move tree

use crate::board::{Move, Position};

pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.after(mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.legal_moves()
        .into_iter()
        .map(|mv| {
            let nodes = perft(&pos.after(mv), depth - 1);
            log::debug!("{}: {}", mv, nodes);
            (mv, nodes)
        })
        .collect()
}
