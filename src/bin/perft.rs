use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};

use chesscore::perft::{divide, perft};
use chesscore::{Position, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print node counts per root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the total against shakmaty
    #[arg(long)]
    verify: bool,
}

fn main() {
    env_logger::init();
    chesscore::init();
    let args = Args::parse();

    let pos = match Position::from_fen(&args.fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("invalid FEN '{}': {}", args.fen, e);
            std::process::exit(1);
        }
    };

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = std::time::Instant::now();
    let nodes = if args.divide {
        let split = divide(&pos, args.depth);
        for (mv, n) in &split {
            println!("{}: {}", mv, n);
        }
        split.iter().map(|(_, n)| n).sum::<u64>()
    } else {
        perft(&pos, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let expected = match shakmaty_position(&args.fen) {
            Some(chess) => perft_shakmaty(&chess, args.depth),
            None => {
                eprintln!("shakmaty rejected the FEN");
                std::process::exit(1);
            }
        };
        if expected == nodes {
            println!("shakmaty agrees: {}", expected);
        } else {
            println!("MISMATCH: shakmaty counts {}", expected);
            std::process::exit(2);
        }
    }
}

fn shakmaty_position(fen: &str) -> Option<Chess> {
    let fen: Fen = fen.parse().ok()?;
    fen.into_position(CastlingMode::Standard).ok()
}

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    let moves = pos.legal_moves();
    for m in moves {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
