//! chesscore command line: pick a move for a position, or let the engine
//! play itself.

use clap::Parser;
use rand::SeedableRng;

use chesscore::rng::Pcg32;
use chesscore::search::SearchParams;
use chesscore::{Game, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Moves in coordinate notation applied after the FEN, space separated
    #[arg(short, long, default_value_t = String::new())]
    moves: String,

    /// Search plies below each root move
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Play up to this many half-moves against itself
    #[arg(long)]
    selfplay: Option<u32>,

    /// Fixed seed for the tie-break generator (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let rng = match args.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_entropy(),
    };
    let mut game =
        Game::from_fen(&args.fen, rng)?.with_search_params(SearchParams::new().depth(args.depth));
    game.replay_uci(args.moves.split_whitespace())?;

    println!("{}", game.position());

    match args.selfplay {
        Some(limit) => {
            for ply in 0..limit {
                let (mv, end) = game.play_computer_move();
                if let Some(mv) = mv {
                    println!("{:>3}. {} ({})", ply + 1, mv, game.search().stats());
                }
                if end.is_over() {
                    log::info!("game over after {} plies: {}", game.history().len(), end);
                    println!("{}", end.result_label(game.position().side));
                    break;
                }
            }
            println!("{}", game.position());
        }
        None => {
            let end = game.state();
            if end.is_over() {
                println!("{}", end.result_label(game.position().side));
                return Ok(());
            }
            match game.best_move() {
                Some(mv) => println!("bestmove {}", mv),
                None => println!("bestmove (none)"),
            }
            println!("{}", game.search().stats());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    chesscore::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
