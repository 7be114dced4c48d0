use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count exceeds available cells, or a dimension is zero")]
    InvalidConfiguration,
    #[error("Mine coordinates outside the board")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
