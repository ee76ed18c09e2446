use anyhow::Context;

use crate::{GameState, Position};

/// Search depth used when nothing else is configured.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Environment variable overriding [DEFAULT_SEARCH_DEPTH].
pub const SEARCH_DEPTH_ENV: &str = "CHESS_SEARCH_DEPTH";

pub trait Engine {
    /// short name used in logs
    fn name(&self) -> &str;

    /// picks a move for the side to move in `state`, or `None` if that side
    /// has no legal move. `state` is left exactly as it was passed in.
    fn choose_move(&mut self, state: &mut GameState) -> Option<(Position, Position)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// plies searched below the current position
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl SearchConfig {
    /// Default configuration, with the depth taken from `CHESS_SEARCH_DEPTH`
    /// if that is set.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(SEARCH_DEPTH_ENV) {
            Ok(depth) => Self::parse_depth(&depth),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_depth(depth: &str) -> anyhow::Result<Self> {
        let depth = depth
            .trim()
            .parse()
            .with_context(|| format!("{SEARCH_DEPTH_ENV} must be a ply count, got {depth:?}"))?;
        Ok(SearchConfig { depth })
    }
}

pub mod alphabeta;
pub mod eval;
pub mod random;

#[cfg(test)]
mod test {
    use super::{SearchConfig, DEFAULT_SEARCH_DEPTH};

    #[test]
    fn parse_depth() {
        assert_eq!(SearchConfig::parse_depth(" 4 ").unwrap().depth, 4);
        assert!(SearchConfig::parse_depth("deep").is_err());
        assert!(SearchConfig::parse_depth("-1").is_err());
        assert_eq!(SearchConfig::default().depth, DEFAULT_SEARCH_DEPTH);
    }
}
