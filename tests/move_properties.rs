use std::collections::HashSet;

use chesscore::board::{Move, PieceKind};
use chesscore::utils::uci_to_square;
use chesscore::{Position, START_FEN};

const FENS: [&str; 6] = [
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 0",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
];

/// Walk the legal move tree checking the incremental hash at every node
fn check_hash_tree(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for mv in pos.legal_moves() {
        let next = pos.after(mv);
        assert_eq!(
            next.hash,
            next.recalc_hash(),
            "hash drift after {} in {}",
            mv,
            pos.to_fen()
        );
        nodes += check_hash_tree(&next, depth - 1);
    }
    nodes
}

#[test]
fn incremental_hash_matches_full_hash() {
    chesscore::init();
    for fen in FENS {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.hash, pos.recalc_hash());
        check_hash_tree(&pos, 3);
    }
}

#[test]
fn legal_moves_are_idempotent() {
    chesscore::init();
    for fen in FENS {
        let pos = Position::from_fen(fen).unwrap();
        let snapshot = pos;
        let first: HashSet<Move> = pos.legal_moves().into_iter().collect();
        let second: HashSet<Move> = pos.legal_moves().into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(pos, snapshot, "move generation must not modify the position");

        // per-square queries cover the same set
        let mut by_square = HashSet::new();
        for sq in 0..64 {
            if matches!(pos.piece_at(sq), Some(p) if p.color == pos.side) {
                by_square.extend(pos.legal_moves_from(sq));
            }
        }
        assert_eq!(first, by_square);
    }
}

#[test]
fn promotion_emits_four_moves() {
    chesscore::init();
    let pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = pos.legal_moves_from(uci_to_square("b7").unwrap());
    assert_eq!(moves.len(), 4);
    let kinds: HashSet<PieceKind> = moves.iter().filter_map(|m| m.promotion()).collect();
    assert_eq!(
        kinds,
        HashSet::from([
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight
        ])
    );
    assert!(moves.iter().all(|m| m.to() == uci_to_square("b8").unwrap()));
}

#[test]
fn black_promotion_emits_four_moves() {
    chesscore::init();
    let pos = Position::from_fen("4k3/8/8/8/8/8/6p1/K7 b - - 0 1").unwrap();
    let moves = pos.legal_moves_from(uci_to_square("g2").unwrap());
    assert_eq!(moves.len(), 4);
    for mv in moves {
        let kind = mv.promotion().expect("promotion");
        let next = pos.after(mv);
        assert_eq!(next.piece_at(mv.to()).map(|p| p.kind), Some(kind));
    }
}

#[test]
fn castling_moves_the_rook() {
    chesscore::init();
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let short = pos.after(pos.parse_uci_move("e1g1").unwrap());
    assert_eq!(short.piece_at(uci_to_square("f1").unwrap()).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(short.piece_at(uci_to_square("h1").unwrap()).is_none());
    assert_eq!(short.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    let long = short.after(short.parse_uci_move("e8c8").unwrap());
    assert_eq!(long.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 1");
    assert_eq!(long.hash, long.recalc_hash());
}

#[test]
fn en_passant_removes_captured_pawn() {
    chesscore::init();
    let pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    let pushed = pos.after(pos.parse_uci_move("d7d5").unwrap());
    assert_eq!(pushed.ep, Some(uci_to_square("d6").unwrap() as u8));

    let mv = pushed.parse_uci_move("e5d6").unwrap();
    assert!(mv.is_special());
    let taken = pushed.after(mv);
    assert!(taken.piece_at(uci_to_square("d5").unwrap()).is_none());
    assert_eq!(taken.to_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 1");
    assert_eq!(taken.hash, taken.recalc_hash());
}

#[test]
fn wire_format_is_bit_exact() {
    // e7e8=Q: to 4, from 12, queen code 5
    let mv = Move::with_promotion(12, 4, PieceKind::Queen);
    assert_eq!(mv.raw(), 4 | (12 << 6) | (5 << 12));
    let castle = Move::special(60, 62);
    assert_eq!(castle.raw(), 0x8000 | (60 << 6) | 62);
    assert_eq!(Move::from_raw(castle.raw()).to_uci(), "e1g1");
}
