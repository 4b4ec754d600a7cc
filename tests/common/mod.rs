//! A k-in-a-row game used to drive the search in tests and benches.

use gomoku_mcts::{Cell, GameAdapter, Grid, Move, Outcome, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

pub struct LineGame {
    pub k: usize,
}

impl LineGame {
    pub fn new(k: usize) -> Self {
        LineGame { k }
    }

    fn run(&self, grid: &Grid, player: Player, (r, c): Move, (dr, dc): (isize, isize)) -> usize {
        let mut n = 0;
        let (mut r, mut c) = (r as isize + dr, c as isize + dc);
        while r >= 0 && c >= 0 && grid.get((r as usize, c as usize)) == Some(Cell::Taken(player)) {
            n += 1;
            r += dr;
            c += dc;
        }
        n
    }
}

impl GameAdapter for LineGame {
    // only reports wins; a full board is left for the search to call a tie
    fn check_win(&self, grid: &Grid, player: Player, mv: Move) -> Option<Outcome> {
        for (dr, dc) in DIRECTIONS {
            if 1 + self.run(grid, player, mv, (dr, dc)) + self.run(grid, player, mv, (-dr, -dc)) >= self.k {
                return Some(Outcome::Winner(player))
            }
        }
        None
    }

    fn rollout(&self, mut grid: Grid, mut player: Player, rng: &mut ChaCha20Rng) -> Outcome {
        loop {
            let empty: Vec<Move> = grid.empty_cells().collect();
            let Some(&mv) = empty.choose(rng) else {
                return Outcome::Tie
            };
            grid.place(mv, player).expect("empty cell");
            if let Some(outcome) = self.check_win(&grid, player, mv) {
                return outcome
            }
            player = player.other();
        }
    }
}

/// Build a grid from row strings like `".b."`.
pub fn grid(rows: &[&str]) -> Grid {
    Grid::try_from(rows.iter().map(|r| r.to_string()).collect::<Vec<_>>()).expect("valid grid")
}
