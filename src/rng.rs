use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    #[default]
    Strict,
    Inclusive,
}

pub fn sample_bit<R: Rng + ?Sized>(rng: &mut R, p: f64, threshold: Threshold) -> bool {
    let u = rng.random::<f64>();
    match threshold {
        Threshold::Strict => u < p,
        Threshold::Inclusive => u <= p,
    }
}

pub fn sample_fair_bit<R: Rng + ?Sized>(rng: &mut R) -> bool {
    sample_bit(rng, 0.5, Threshold::Strict)
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(trial as u64))
}

#[derive(Debug, Clone)]
pub struct ScriptedSource {
    words: Vec<u64>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(words: Vec<u64>) -> Self {
        let words = if words.is_empty() { vec![0] } else { words };
        Self { words, pos: 0 }
    }

    /// Words that decode to exactly these `f64` draws under `Rng::random::<f64>()`.
    /// Values are clamped to `[0, 1)` and truncated to 53 bits of precision.
    pub fn from_unit_floats(values: &[f64]) -> Self {
        const SCALE: f64 = (1u64 << 53) as f64;
        let words = values
            .iter()
            .map(|&v| {
                let mantissa = (v.clamp(0.0, 1.0) * SCALE) as u64;
                mantissa.min((1u64 << 53) - 1) << 11
            })
            .collect();
        Self::new(words)
    }
}

impl RngCore for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let w = self.words[self.pos];
        self.pos = (self.pos + 1) % self.words.len();
        w
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
