use crate::*;
pub use random::*;

mod random;

/// Seam for producing a board layout from a validated configuration.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> BoardLayout;
}
