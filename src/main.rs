use anyhow::Context;
use chess_minimax::{
    engine::{alphabeta::AlphaBeta, random::RandomMover, Engine, SearchConfig},
    GameState, Side, TerminalStatus,
};
use clap::{Parser, ValueEnum};
use log::{debug, info};

/// Plays one game between two computer players and prints the result.
#[derive(Debug, Parser)]
#[command(about, version)]
struct Args {
    /// Search depth in plies. Overrides CHESS_SEARCH_DEPTH.
    #[arg(short, long)]
    depth: Option<u32>,

    /// Player controlling the white pieces.
    #[arg(long, value_enum, default_value_t = PlayerKind::AlphaBeta)]
    white: PlayerKind,

    /// Player controlling the black pieces.
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Stop the game after this many plies without a result.
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for the random players. Picked from entropy if not set.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    AlphaBeta,
    Random,
}

impl PlayerKind {
    fn build(self, config: SearchConfig, seed: Option<u64>) -> Box<dyn Engine> {
        match self {
            PlayerKind::AlphaBeta => Box::new(AlphaBeta::new(config)),
            PlayerKind::Random => match seed {
                Some(seed) => Box::new(RandomMover::seeded(seed)),
                None => Box::new(RandomMover::new()),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = SearchConfig::from_env().context("reading search configuration")?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    let mut white = args.white.build(config, args.seed);
    let mut black = args.black.build(config, args.seed.map(|seed| seed.wrapping_add(1)));
    info!(
        "New game: {} (White) vs {} (Black), search depth {}",
        white.name(),
        black.name(),
        config.depth
    );

    let mut state = GameState::new();
    while state.history().len() < args.max_plies {
        if state.terminal_status().is_over() {
            break;
        }

        let player = match state.side_to_move() {
            Side::White => &mut white,
            Side::Black => &mut black,
        };
        let Some((from, to)) = player.choose_move(&mut state) else {
            break;
        };
        let (piece, captured) = state
            .apply_move(from, to, true)
            .with_context(|| format!("{} picked an illegal move", player.name()))?;

        debug!(
            "{:?} from {from} to {to}{}",
            piece.kind(),
            if captured { ", capturing" } else { "" }
        );
        debug!("the board is:\n{state}");
    }

    for side in Side::ALL_SIDES {
        let captures = state
            .history()
            .iter()
            .filter(|record| record.piece.side() == side && record.is_capture())
            .count();
        info!("{side} captured {captures} pieces");
    }

    match state.terminal_status() {
        TerminalStatus::Checkmate { winner } => println!("Final result: {winner} wins."),
        TerminalStatus::Stalemate => println!("Final result: Draw."),
        TerminalStatus::Ongoing => println!(
            "No result after {} plies, stopping.",
            state.history().len()
        ),
    }
    println!("{state}");

    Ok(())
}
