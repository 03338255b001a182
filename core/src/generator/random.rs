use super::*;
use rand::prelude::*;

/// Places mines by drawing random positions and rejecting the ones that already hold a mine.
///
/// Extra draws stay small while the mine density is low, which covers every preset, but grow
/// without bound as the board fills up. Use [`ShuffleMinefieldGenerator`] for dense boards.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let size = config.size();
        let mut mines: Array2<bool> = Array2::default((usize::from(size), usize::from(size)));

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < config.mines() {
            let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
            draws += 1;

            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        log::debug!("Placed {} mines in {} draws", placed, draws);

        MineLayout::from_mask_unchecked(mines)
    }
}

/// Places mines by sampling distinct positions directly, so the work is bounded by the mine
/// count no matter how dense the board is.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleMinefieldGenerator {
    seed: u64,
}

impl ShuffleMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ShuffleMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let size = usize::from(config.size());
        let total = usize::from(config.total_cells());
        let amount = usize::from(config.mines());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default((size, size));
        for index in rand::seq::index::sample(&mut rng, total, amount) {
            mines[(index / size, index % size)] = true;
        }

        MineLayout::from_mask_unchecked(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(layout: &MineLayout, config: GameConfig) {
        assert_eq!(layout.size(), config.size());
        assert_eq!(layout.mine_count(), config.mines());
        assert_eq!(layout.mine_coords().len(), usize::from(config.mines()));
    }

    #[test]
    fn rejection_sampling_places_exact_mine_count_for_every_preset() {
        for (seed, preset) in Preset::ALL.into_iter().enumerate() {
            let config = preset.config();
            let layout = RandomMinefieldGenerator::new(seed as u64).generate(config);
            assert_valid(&layout, config);
        }
    }

    #[test]
    fn shuffle_places_exact_mine_count_on_dense_board() {
        let config = GameConfig::new(4, 15).unwrap();
        let layout = ShuffleMinefieldGenerator::new(7).generate(config);
        assert_valid(&layout, config);
    }

    #[test]
    fn rejection_sampling_terminates_on_dense_board() {
        let config = GameConfig::new(3, 8).unwrap();
        let layout = RandomMinefieldGenerator::new(3).generate(config);
        assert_valid(&layout, config);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Preset::Normal.config();
        assert_eq!(
            RandomMinefieldGenerator::new(42).generate(config),
            RandomMinefieldGenerator::new(42).generate(config)
        );
        assert_eq!(
            ShuffleMinefieldGenerator::new(42).generate(config),
            ShuffleMinefieldGenerator::new(42).generate(config)
        );
    }

    #[test]
    fn different_seeds_spread_mines() {
        let config = Preset::Hard.config();
        let a = RandomMinefieldGenerator::new(1).generate(config);
        let b = RandomMinefieldGenerator::new(2).generate(config);
        assert_ne!(a.mine_coords(), b.mine_coords());
    }
}
