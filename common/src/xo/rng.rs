use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Debug;

// Source of the computer player's choices. Tests swap in a deterministic
// implementation.
pub trait MoveRng: Debug {
    fn pick<T, I: Iterator<Item = T> + Sized>(&mut self, iter: I) -> Option<T>;
}

#[derive(Debug)]
pub struct ComputerRng {
    rng: StdRng,
}

impl ComputerRng {
    pub fn seeded(seed: u64) -> Self {
        ComputerRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ComputerRng {
    fn default() -> Self {
        ComputerRng {
            rng: StdRng::from_entropy(),
        }
    }
}

impl MoveRng for ComputerRng {
    fn pick<T, I: Iterator<Item = T> + Sized>(&mut self, iter: I) -> Option<T> {
        iter.choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_from_empty() {
        let mut rng = ComputerRng::seeded(7);
        assert_eq!(rng.pick(std::iter::empty::<u8>()), None);
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut rng = ComputerRng::default();
        for _ in 0..50 {
            let picked = rng.pick(3..9).unwrap();
            assert!((3..9).contains(&picked));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = ComputerRng::seeded(42);
        let mut b = ComputerRng::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pick(0..100), b.pick(0..100));
        }
    }
}
