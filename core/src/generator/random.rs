use super::*;

/// Uniform mine placement without replacement over the whole board.
///
/// Each draw picks uniformly among the remaining free cells, so every mine
/// set of the requested size is equally likely and generation always
/// terminates, even near-full boards.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> BoardLayout {
        use ndarray::Array2;
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut free_cells = total_cells;
        let mut mines_placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mine_mask.as_slice_mut().expect("layout should be standard");
            while mines_placed < config.mines {
                if free_cells == 0 {
                    break;
                }
                // index into the free cells only, then walk past placed mines
                let mut place: CellCount = rng.random_range(0..free_cells);
                for (i, cell) in cells.iter_mut().enumerate() {
                    let i = i as CellCount;
                    if *cell {
                        place += 1;
                    }
                    if i == place {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                }
            }
        }

        // double check mine count
        let placed = mine_mask.iter().filter(|&&cell| cell).count() as CellCount;
        if placed != config.mines {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
        }

        BoardLayout::from_mine_mask(mine_mask)
    }
}
