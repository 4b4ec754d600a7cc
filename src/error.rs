use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// placing on a non-empty cell. Candidate moves are always empty cells, so this is a bug in the search.
    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("UCB compared against a node that was never visited")]
    UnvisitedChild,

    #[error("root has no children to choose a move from")]
    NoChildren,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
