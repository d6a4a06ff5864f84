pub mod board;
pub mod eval;
pub mod fen;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod perft;
pub mod repetition;
pub mod rng;
pub mod search;
pub mod utils;
pub mod zobrist;

pub use board::{Color, Move, Piece, PieceKind, Position, START_FEN};
pub use game::{check_game_end, Game, GameEnd};

pub fn init() {
    zobrist::init_zobrist();
}
