//! Board definitions shared by the search and the game adapters.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{Move, error::{Result, SearchError}};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "b")]
    Black,
    #[serde(rename = "w")]
    White
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'b',
            Player::White => 'w'
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Taken(Player)
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Taken(player) => player.symbol()
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'b' => Some(Cell::Taken(Player::Black)),
            'w' => Some(Cell::Taken(Player::White)),
            _ => None
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A square grid stored row-major. The size never changes after construction.
/// Serialized as a list of row strings, e.g. `[".b.", "...", "w.."]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid { size, cells: vec![Cell::Empty; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, (r, c): Move) -> bool {
        r < self.size && c < self.size
    }

    pub fn get(&self, mv: Move) -> Option<Cell> {
        if self.in_bounds(mv) {
            Some(self.cells[mv.0 * self.size + mv.1])
        } else {
            None
        }
    }

    pub fn place(&mut self, (r, c): Move, player: Player) -> Result<()> {
        if !self.in_bounds((r, c)) {
            return Err(SearchError::OutOfBounds { row: r, col: c })
        }
        let cell = &mut self.cells[r * self.size + c];
        if !cell.is_empty() {
            return Err(SearchError::OccupiedCell { row: r, col: c })
        }
        *cell = Cell::Taken(player);
        Ok(())
    }

    /// all occupied positions in row-major order
    pub fn occupied(&self) -> impl Iterator<Item=Move> + '_ {
        self.positions().filter(move |&mv| !self[mv].is_empty())
    }

    pub fn empty_cells(&self) -> impl Iterator<Item=Move> + '_ {
        self.positions().filter(move |&mv| self[mv].is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    fn positions(&self) -> impl Iterator<Item=Move> {
        let size = self.size;
        (0..size).flat_map(move |r| (0..size).map(move |c| (r, c)))
    }
}

impl Index<Move> for Grid {
    type Output = Cell;

    fn index(&self, (r, c): Move) -> &Cell {
        assert!(r < self.size && c < self.size, "({}, {}) is outside a board of size {}", r, c, self.size);
        &self.cells[r * self.size + c]
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = SearchError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(SearchError::InvalidBoard(format!("row {} has {} cells, expected {}", r, row.chars().count(), size)))
            }
            for c in row.chars() {
                let cell = Cell::from_symbol(c).ok_or_else(|| SearchError::InvalidBoard(format!("unknown cell symbol {:?}", c)))?;
                cells.push(cell);
            }
        }

        Ok(Grid { size, cells })
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.cells.chunks(grid.size.max(1)).map(|row| row.iter().map(|c| c.symbol()).collect()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A grid together with the player that makes the NEXT move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub grid: Grid,
    pub player: Player
}

impl BoardState {
    pub fn new(grid: Grid, player: Player) -> Self {
        BoardState { grid, player }
    }

    /// the state after `player` places at `mv`. `self` is left untouched.
    pub fn play(&self, mv: Move) -> Result<Self> {
        let mut grid = self.grid.clone();
        grid.place(mv, self.player)?;
        Ok(BoardState { grid, player: self.player.other() })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
