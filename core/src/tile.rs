use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, tracked separately from the layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a cell looks like to the player, combining visibility and layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Mine,
    Blank,
    Count(u8),
}

impl TileView {
    /// Terminal symbol for this view.
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Blank => ' ',
            Self::Count(n) => (b'0' + n) as char,
        }
    }
}
