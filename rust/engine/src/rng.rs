use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// The single random stream of a run.
///
/// Every die roll, boss rule pick and shop roll draws from this stream, so
/// capturing [`RunRng::state`] and restoring it with [`RunRng::from_state`]
/// reproduces the rest of the run exactly.
#[derive(Debug, Clone)]
pub struct RunRng {
    inner: ChaCha20Rng,
    seed: u64,
}

/// Serializable cursor into a [`RunRng`] stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// ChaCha word position, including any partially consumed block
    pub word_pos: u128,
}

impl RunRng {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    pub fn state(&self) -> RngState {
        RngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    pub fn from_state(state: &RngState) -> Self {
        let mut inner = ChaCha20Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}
