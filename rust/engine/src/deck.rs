use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// A 52-card deck partitioned into an ordered `remaining` pile (top = end)
/// and a `dealt` bag. The union of the two is always the full 52-card set;
/// `shuffle` recombines before randomizing so no card is ever lost.
#[derive(Debug)]
pub struct Deck {
    remaining: Vec<Card>,
    dealt: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Fresh deck with an entropy-seeded RNG. Initial order is unshuffled.
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_os_rng())
    }

    /// Fresh deck with a fixed seed for reproducible shuffles.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        Self {
            remaining: full_deck(),
            dealt: Vec::with_capacity(52),
            rng,
        }
    }

    /// Recombine dealt cards into the remaining pile and randomize the order.
    pub fn shuffle(&mut self) {
        self.remaining.append(&mut self.dealt);
        self.remaining.shuffle(&mut self.rng);
    }

    /// Deal `count` cards from the top. Fails without mutating state when
    /// fewer than `count` cards remain.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, EngineError> {
        if count > self.remaining.len() {
            return Err(EngineError::InsufficientCards {
                requested: count,
                remaining: self.remaining.len(),
            });
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            // len checked above
            if let Some(c) = self.remaining.pop() {
                self.dealt.push(c);
                out.push(c);
            }
        }
        Ok(out)
    }

    /// Deal a single card, or `None` when the deck is exhausted.
    /// Convenience for ad-hoc draws, not used during a standard hand.
    pub fn deal_one(&mut self) -> Option<Card> {
        let c = self.remaining.pop()?;
        self.dealt.push(c);
        Some(c)
    }

    /// Discard exactly one card face-down before dealing community cards.
    pub fn burn(&mut self) {
        if let Some(c) = self.remaining.pop() {
            self.dealt.push(c);
        }
    }

    /// Restore a fresh 52-card deck with every card back in `remaining`.
    pub fn reset(&mut self) {
        self.remaining = full_deck();
        self.dealt.clear();
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn dealt(&self) -> usize {
        self.dealt.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
