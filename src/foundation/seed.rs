//! Deterministic pseudo-randomness for document-stable visual features.
//!
//! Torn edges, scallop jitter and washi patterns must look identical every time a page is
//! rendered, in the editor and in the viewer, across reloads. They are therefore driven by this
//! LCG seeded from the owning element's id, never by a real RNG.
//!
//! The generator is part of the persisted visual contract: changing the recurrence changes the
//! tear pattern of every existing document and requires a schema version bump.

use crate::foundation::hash::fnv1a64;

const LCG_MUL: u64 = 9301;
const LCG_ADD: u64 = 49297;
const LCG_MOD: u64 = 233280;

/// Linear-congruential generator: `seed = (seed*9301+49297) % 233280`.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MOD,
        }
    }

    /// Seed from a stable string id (element ids, sticker ids).
    pub fn from_id(id: &str) -> Self {
        Self::new(fnv1a64(id) % LCG_MOD)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD)) % LCG_MOD;
        self.state as f64 / LCG_MOD as f64
    }

    /// Next value in `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Next index in `[0, n)`. Returns 0 for `n == 0`.
    pub fn next_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_f64() * n as f64) as usize % n
    }
}
