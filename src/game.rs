//! The capabilities the search needs from a concrete game.

use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::{Move, board::{Grid, Player}, tree::candidate_moves};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Tie
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(player),
            Outcome::Tie => None
        }
    }
}

pub trait GameAdapter {
    /// "reasonable" moves from this grid. Defaults to every empty cell in the bounding box of the pieces, padded by one.
    fn candidates(&self, grid: &Grid) -> Vec<Move> {
        candidate_moves(grid)
    }

    /// whether `player` placing at `mv` (already on `grid`) ended the game.
    fn check_win(&self, grid: &Grid, player: Player, mv: Move) -> Option<Outcome>;

    /// play uniformly random moves for both sides, starting with `player`, until the game ends.
    fn rollout(&self, grid: Grid, player: Player, rng: &mut ChaCha20Rng) -> Outcome;
}

impl<G: GameAdapter + ?Sized> GameAdapter for &G {
    fn candidates(&self, grid: &Grid) -> Vec<Move> {
        (**self).candidates(grid)
    }

    fn check_win(&self, grid: &Grid, player: Player, mv: Move) -> Option<Outcome> {
        (**self).check_win(grid, player, mv)
    }

    fn rollout(&self, grid: Grid, player: Player, rng: &mut ChaCha20Rng) -> Outcome {
        (**self).rollout(grid, player, rng)
    }
}
