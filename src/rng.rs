//! Deterministic counter-mode RNG over SHA-256.
//!
//! Every node derives the same stream from the same per-block seed; the
//! seeding shuffle is consensus state, so both the hash discipline and the
//! rejection-sampling bounds are fixed and must not change.

use sha2::{Digest, Sha256};

pub const SEED_BYTES: usize = 32;

pub struct HashCtrRng {
    seed: [u8; SEED_BYTES],
    counter: u64,
    buffer: [u8; 32],
    cursor: usize,
}

impl HashCtrRng {
    pub fn new(seed: [u8; SEED_BYTES]) -> Self {
        Self {
            seed,
            counter: 0,
            buffer: [0; 32],
            cursor: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.buffer = hasher.finalize().into();
        self.counter += 1;
        self.cursor = 0;
    }

    fn next_u64(&mut self) -> u64 {
        if self.cursor + 8 > self.buffer.len() {
            self.refill();
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.buffer[self.cursor..self.cursor + 8]);
        self.cursor += 8;
        u64::from_le_bytes(word)
    }

    /// Uniform draw in `[0, n)`.
    ///
    /// Draws at or above `floor(2^64 / n) * n` are rejected and a fresh word
    /// is consumed, so the modulus below stays unbiased.
    pub fn next(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "upper bound must be positive");
        let n = u64::from(n.max(1));
        // 2^64 mod n; zero means every draw is accepted
        let rem = ((u64::MAX % n) + 1) % n;
        loop {
            let draw = self.next_u64();
            if rem == 0 || draw < u64::MAX - rem + 1 {
                return (draw % n) as u32;
            }
        }
    }
}
