use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// Боевой RNG: `thread_rng` из `rand`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_below(&mut self, n: u32) -> u32 {
        thread_rng().gen_range(0..n)
    }

    fn next_unit(&mut self) -> f64 {
        thread_rng().gen::<f64>()
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковые раздачи и спины.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_below(&mut self, n: u32) -> u32 {
        self.inner.gen_range(0..n)
    }

    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// RNG по заранее заданному списку значений, по кругу.
///
/// `next_below(n)` отдаёт `values[i] % n`, `next_unit` отдаёт
/// `(values[i] % 1000) / 1000`. Пустой список ведёт себя как нули.
/// Перемешивание идёт через Фишера–Йейтса поверх `next_below`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Сколько значений уже выдано.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_raw(&mut self) -> u32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.next_raw() % n
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_raw() % 1000) / 1000.0
    }
}
