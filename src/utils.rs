// Square geometry and coordinate notation helpers.
// Mapping: A8=0, B8=1, ..., H8=7, A7=8, ..., H1=63 (row 0 is Black's back rank)

pub type Square = usize;

// Back-rank squares used by castling and rights bookkeeping
pub const A8: Square = 0;
pub const H8: Square = 7;
pub const A1: Square = 56;
pub const E1: Square = 60;
pub const H1: Square = 63;

#[inline]
pub fn file_of(sq: Square) -> usize {
    sq % 8
}

#[inline]
pub fn row_of(sq: Square) -> usize {
    sq / 8
}

/// Chess rank number (1..=8) of a square
#[inline]
pub fn rank_of(sq: Square) -> usize {
    8 - row_of(sq)
}

#[inline]
pub fn square_at(file: usize, row: usize) -> Square {
    row * 8 + file
}

/// Step from `sq` by (file, row) deltas, or None when leaving the board
#[inline]
pub fn offset(sq: Square, df: i8, dr: i8) -> Option<Square> {
    let f = file_of(sq) as i8 + df;
    let r = row_of(sq) as i8 + dr;
    if (0..8).contains(&f) && (0..8).contains(&r) {
        Some(square_at(f as usize, r as usize))
    } else {
        None
    }
}

/// Convert a square index to coordinate notation (0 -> "a8", 63 -> "h1")
pub fn square_to_uci(sq: Square) -> String {
    let file_char = (b'a' + file_of(sq) as u8) as char;
    let rank_char = (b'0' + rank_of(sq) as u8) as char;
    format!("{}{}", file_char, rank_char)
}

/// Convert coordinate notation to a square index ("a8" -> 0, "e1" -> 60)
pub fn uci_to_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    let file_idx = (file - b'a') as usize;
    let row_idx = (b'8' - rank) as usize;
    Some(square_at(file_idx, row_idx))
}
