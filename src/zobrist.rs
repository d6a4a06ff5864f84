// Zobrist hashing with precomputed tables
// Keys are drawn once per process from an entropy-seeded PCG32, so hashes are
// only comparable within a single run.
use std::sync::OnceLock;

use crate::board::{CastlingRights, Color, Piece, Position};
use crate::rng::Pcg32;

pub struct ZobristKeys {
    // [square][piece index]; piece index = (kind code - 1) + 6 for Black
    pieces: [[u64; 12]; 64],
    ep_file: [u64; 8],
    // one key per castling flag, in CastlingRights::FLAGS order
    castling: [u64; 4],
    side: u64,
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

#[inline]
fn piece_index(piece: Piece) -> usize {
    (piece.color as usize) * 6 + (piece.kind.code() as usize - 1)
}

impl ZobristKeys {
    /// Draw a full key set from `rng`
    pub fn generate(rng: &mut Pcg32) -> Self {
        let mut pieces = [[0u64; 12]; 64];
        for square in pieces.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.next_u64();
            }
        }
        let mut ep_file = [0u64; 8];
        for key in ep_file.iter_mut() {
            *key = rng.next_u64();
        }
        let mut castling = [0u64; 4];
        for key in castling.iter_mut() {
            *key = rng.next_u64();
        }
        let side = rng.next_u64();
        Self {
            pieces,
            ep_file,
            castling,
            side,
        }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: usize) -> u64 {
        self.pieces[sq][piece_index(piece)]
    }

    #[inline]
    pub fn en_passant(&self, file: usize) -> u64 {
        self.ep_file[file]
    }

    /// Key of the `i`-th castling flag
    #[inline]
    pub fn castling(&self, i: usize) -> u64 {
        self.castling[i]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }
}

/// Force key generation. Safe to call more than once.
pub fn init_zobrist() {
    keys();
}

/// Process-wide key set, generated on first use
pub fn keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| {
        let mut rng = Pcg32::from_os_entropy();
        let keys = ZobristKeys::generate(&mut rng);
        log::debug!("zobrist keys initialized");
        keys
    })
}

/// Hash a position from scratch
pub fn hash_position(pos: &Position) -> u64 {
    let keys = keys();
    let mut h = 0u64;
    for (sq, cell) in pos.board.iter().enumerate() {
        if let Some(piece) = cell {
            h ^= keys.piece(*piece, sq);
        }
    }
    if pos.side == Color::Black {
        h ^= keys.side;
    }
    for (i, &flag) in CastlingRights::FLAGS.iter().enumerate() {
        if pos.castling.has(flag) {
            h ^= keys.castling[i];
        }
    }
    if let Some(ep) = pos.ep {
        h ^= keys.ep_file[ep as usize % 8];
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;
    use rand::SeedableRng;

    #[test]
    fn test_keys_distinct() {
        let keys = ZobristKeys::generate(&mut Pcg32::seed_from_u64(1));
        let mut all: Vec<u64> = keys.pieces.iter().flatten().copied().collect();
        all.extend_from_slice(&keys.ep_file);
        all.extend_from_slice(&keys.castling);
        all.push(keys.side);
        let n = all.len();
        assert_eq!(n, 64 * 12 + 8 + 4 + 1);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), n);
    }

    #[test]
    fn test_hash_depends_on_side_and_rights() {
        let start = Position::start();
        let mut black = start;
        black.side = Color::Black;
        assert_ne!(hash_position(&start), hash_position(&black));

        let mut no_rights = start;
        no_rights.castling = CastlingRights::NONE;
        assert_ne!(hash_position(&start), hash_position(&no_rights));
    }

    #[test]
    fn test_piece_index_layout() {
        let wp = Piece::new(PieceKind::Pawn, Color::White);
        let bk = Piece::new(PieceKind::King, Color::Black);
        assert_eq!(piece_index(wp), 0);
        assert_eq!(piece_index(bk), 11);
    }
}
