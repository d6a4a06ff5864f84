use chesscore::perft::{divide, perft};
use chesscore::{Position, START_FEN};
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position as _};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 0";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
const POSITION_6: &str =
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}

fn shakmaty_from(fen: &str) -> Chess {
    // shakmaty wants a positive fullmove number
    let fields: Vec<&str> = fen.split_whitespace().take(5).collect();
    let fen: Fen = format!("{} 1", fields.join(" ")).parse().expect("fen");
    fen.into_position(CastlingMode::Standard).expect("position")
}

fn check(fen: &str, expected: &[u64]) {
    chesscore::init();
    let pos = Position::from_fen(fen).expect("fen");
    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i as u32 + 1;
        assert_eq!(perft(&pos, depth), nodes, "{} depth {}", fen, depth);
    }
}

#[test]
fn perft_start_position() {
    check(START_FEN, &[20, 400, 8902, 197_281]);
}

#[test]
fn perft_kiwipete() {
    check(KIWIPETE, &[48, 2039, 97_862]);
}

#[test]
fn perft_position_3() {
    check(POSITION_3, &[14, 191, 2812, 43_238, 674_624]);
}

#[test]
fn perft_position_4() {
    check(POSITION_4, &[6, 264, 9467]);
}

#[test]
fn perft_position_5() {
    check(POSITION_5, &[44, 1486, 62_379]);
}

#[test]
fn perft_position_6() {
    check(POSITION_6, &[46, 2079, 89_890]);
}

#[test]
fn perft_regression_against_shakmaty() {
    chesscore::init();
    for fen in [START_FEN, KIWIPETE, POSITION_3, POSITION_4, POSITION_5, POSITION_6] {
        let pos = Position::from_fen(fen).expect("fen");
        let chess = shakmaty_from(fen);
        for depth in 1..=2 {
            let expected = perft_shakmaty(&chess, depth);
            let got = perft(&pos, depth);
            assert_eq!(got, expected, "perft mismatch for {} at depth {}", fen, depth);
        }
    }
}

#[test]
fn divide_matches_shakmaty_per_move() {
    chesscore::init();
    let pos = Position::from_fen(KIWIPETE).unwrap();
    let chess = shakmaty_from(KIWIPETE);
    let split = divide(&pos, 2);
    assert_eq!(split.len(), 48);
    for (mv, nodes) in split {
        let uci: UciMove = mv.to_uci().parse().expect("uci");
        let m = uci.to_move(&chess).expect("legal in shakmaty");
        let mut next = chess.clone();
        next.play_unchecked(&m);
        assert_eq!(nodes, perft_shakmaty(&next, 1), "divide mismatch on {}", mv);
    }
}
