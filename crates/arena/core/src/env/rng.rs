//! Deterministic random sources owned by each agent.
//!
//! Agents never reach for a global generator: each one carries its own source,
//! seeded from the match seed and its unit id, so a match replays identically
//! and tests can substitute a scripted sequence.

use crate::types::Direction;

/// Source of random draws for one agent.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..bound`; returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    fn coin_flip(&mut self) -> bool {
        self.below(2) == 1
    }

    /// Uniform pick over the eight compass headings.
    fn compass_direction(&mut self) -> Direction {
        Direction::COMPASS[self.below(Direction::COMPASS.len() as u32) as usize]
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentRng {
    state: u64,
}

impl AgentRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for AgentRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Scripts successive compass draws, by heading.
    pub fn headings(headings: &[Direction]) -> Self {
        let values = headings
            .iter()
            .map(|heading| {
                Direction::COMPASS
                    .iter()
                    .position(|candidate| candidate == heading)
                    .unwrap_or(0) as u32
            })
            .collect();
        Self::new(values)
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Derive an agent seed from the match seed and the agent's identity.
///
/// `context` separates independent streams for the same agent.
pub fn compute_seed(game_seed: u64, unit_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= (unit_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
