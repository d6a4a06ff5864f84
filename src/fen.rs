// FEN parsing and formatting
use thiserror::Error;

use crate::board::{CastlingRights, Color, Piece, Position};
use crate::utils::{self, row_of, square_at};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid board layout in rank {0}")]
    InvalidRank(usize),
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),
    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    InvalidClock(String),
}

impl Position {
    /// Parse a FEN string. The fullmove number is ignored, and a missing
    /// halfmove clock counts as 0.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut parts = fen.split_whitespace();
        let piece_part = parts.next().ok_or(FenError::MissingField("board"))?;
        let side_part = parts.next().ok_or(FenError::MissingField("side"))?;
        let castle_part = parts.next().ok_or(FenError::MissingField("castling"))?;
        let ep_part = parts.next().ok_or(FenError::MissingField("en passant"))?;
        let halfmove_part = parts.next().unwrap_or("0");

        let mut pos = Position::empty();

        // Ranks come in order 8..1, which is row 0..7
        let rows: Vec<&str> = piece_part.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidRank(rows.len()));
        }
        for (row, rank_part) in rows.iter().enumerate() {
            let mut file = 0usize;
            for ch in rank_part.chars() {
                if let Some(n) = ch.to_digit(10) {
                    file += n as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if file >= 8 {
                        return Err(FenError::InvalidRank(8 - row));
                    }
                    pos.set_piece(square_at(file, row), Some(piece));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidRank(8 - row));
            }
        }

        pos.side = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        pos.castling = CastlingRights::NONE;
        for ch in castle_part.chars() {
            match ch {
                'K' => pos.castling.insert(CastlingRights::WHITE_KING),
                'Q' => pos.castling.insert(CastlingRights::WHITE_QUEEN),
                'k' => pos.castling.insert(CastlingRights::BLACK_KING),
                'q' => pos.castling.insert(CastlingRights::BLACK_QUEEN),
                '-' => {}
                _ => return Err(FenError::InvalidCastling(ch)),
            }
        }

        pos.ep = match ep_part {
            "-" => None,
            s => {
                let sq = utils::uci_to_square(s)
                    .ok_or_else(|| FenError::InvalidEnPassant(s.to_string()))?;
                // only rank 3 or rank 6 can hold an en passant target
                if row_of(sq) != 2 && row_of(sq) != 5 {
                    return Err(FenError::InvalidEnPassant(s.to_string()));
                }
                Some(sq as u8)
            }
        };

        pos.halfmove = halfmove_part
            .parse()
            .map_err(|_| FenError::InvalidClock(halfmove_part.to_string()))?;

        pos.hash = pos.recalc_hash();
        Ok(pos)
    }

    /// Format as FEN. The fullmove field is always written as 1.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for row in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[square_at(file, row)] {
                    Some(p) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = [
            (CastlingRights::WHITE_KING, 'K'),
            (CastlingRights::WHITE_QUEEN, 'Q'),
            (CastlingRights::BLACK_KING, 'k'),
            (CastlingRights::BLACK_QUEEN, 'q'),
        ];
        let mut any = false;
        for (flag, c) in rights {
            if self.castling.has(flag) {
                fen.push(c);
                any = true;
            }
        }
        if !any {
            fen.push('-');
        }

        fen.push(' ');
        match self.ep {
            Some(sq) => fen.push_str(&utils::square_to_uci(sq as usize)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} 1", self.halfmove));
        fen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, START_FEN};

    #[test]
    fn test_start_fen_matches_start_position() {
        let parsed = Position::from_fen(START_FEN).unwrap();
        let start = Position::start();
        assert!(parsed.same_position(&start));
        assert_eq!(parsed.hash, start.hash);
        assert_eq!(parsed.to_fen(), START_FEN);
    }

    #[test]
    fn test_parse_fields() {
        let pos =
            Position::from_fen("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w Kq c6 7 3")
                .unwrap();
        assert_eq!(pos.side, Color::White);
        assert_eq!(pos.ep, Some(utils::uci_to_square("c6").unwrap() as u8));
        assert!(pos.castling.has(CastlingRights::WHITE_KING));
        assert!(!pos.castling.has(CastlingRights::WHITE_QUEEN));
        assert!(!pos.castling.has(CastlingRights::BLACK_KING));
        assert!(pos.castling.has(CastlingRights::BLACK_QUEEN));
        assert_eq!(pos.halfmove, 7);
        assert_eq!(
            pos.piece_at(utils::uci_to_square("e4").unwrap()),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_missing_clocks_default_to_zero() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/K6k b - -").unwrap();
        assert_eq!(pos.halfmove, 0);
        assert_eq!(pos.side, Color::Black);
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/K6k"),
            Err(FenError::MissingField("side"))
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/K6x w - - 0 1"),
            Err(FenError::InvalidPiece('x'))
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/K7k w - - 0 1"),
            Err(FenError::InvalidRank(1))
        );
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/K6k x - - 0 1"),
            Err(FenError::InvalidSide(_))
        ));
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/K6k w X - 0 1"),
            Err(FenError::InvalidCastling('X'))
        );
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/K6k w - e4 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/K6k w - - x 1"),
            Err(FenError::InvalidClock(_))
        ));
    }

    #[test]
    fn test_round_trip_kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }
}
