use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::Engine;
use crate::{GameState, Position};

/// Plays a uniformly random legal move. Useful as a sparring partner.
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new() -> Self {
        RandomMover {
            rng: StdRng::from_entropy(),
        }
    }

    /// a mover that plays the same moves for the same positions on every run
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, state: &mut GameState) -> Option<(Position, Position)> {
        let choice = state.legal_moves().choose(&mut self.rng).copied();
        if let Some((from, to)) = choice {
            info!("{} plays {from} -> {to} at random", state.side_to_move());
        }
        choice
    }
}
