use super::*;
use ndarray::Array2;

/// Uniform placement by rejection sampling: draw cells until the requested
/// number of distinct mines exists. Every `C(size², mines)` combination is
/// equally likely. Terminates because a valid [`BoardSpec`] leaves at least
/// one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, spec: BoardSpec) -> MineField {
        use rand::prelude::*;

        let mut mine_mask: Array2<bool> = Array2::default((spec.size, spec.size).to_nd_index());
        let mut placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < spec.mines {
            let coords: Coord2 = (rng.random_range(0..spec.size), rng.random_range(0..spec.size));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!(
            "placed {} mines on a {}x{} board from seed {}",
            placed,
            spec.size,
            spec.size,
            self.seed
        );

        // double check mine count
        let count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if count != spec.mines {
            log::warn!(
                "generated mine count mismatch, actual: {}, requested: {}",
                count,
                spec.mines
            );
        }
        MineField {
            mine_mask,
            mine_count: count,
        }
    }
}
