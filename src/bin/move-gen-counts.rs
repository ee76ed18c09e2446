use std::time::Instant;

use chess_minimax::engine::alphabeta::AlphaBeta;
use chess_minimax::engine::{Engine, SearchConfig};
use chess_minimax::GameState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    for depth in 1..=4 {
        perft_stats(depth);
    }

    search_stats(1);
    search_stats(2);
    search_stats(3);
    search_stats(4);
}

fn perft_stats(depth: u32) {
    let mut state = GameState::new();

    let start = Instant::now();
    let count = state.perft(depth);
    let elapsed = start.elapsed();

    println!("perft({depth}) from start pos: {count} positions in {elapsed:?}");
}

fn search_stats(depth: u32) {
    let mut state = GameState::new();

    let mut engine = AlphaBeta::new(SearchConfig { depth });

    let start = Instant::now();
    let best_move = engine.choose_move(&mut state);
    let elapsed = start.elapsed();

    let stats = engine.stats().unwrap_or_default();

    println!(
        "Stats after searching to depth {depth} from start pos:\ntime: {elapsed:?}\nbest move: {best_move:?}\n{stats:#?}"
    );
}
