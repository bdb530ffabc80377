//! Explicit RNG contexts for synthesis and scoring.
//!
//! There is no global generator.  Synthesis and scoring both receive a
//! `&mut SimRng`, and a seeded one replays a run exactly.
//!
//! A scoring call draws one `call_seed` and gives node `i` its own stream:
//!
//!   seed_i = call_seed ^ (i * MIXING_CONSTANT)
//!
//! Node streams are disjoint, so a prediction map is the same whether nodes
//! are scored in order, in parallel, or one at a time.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::NodeId;

/// Golden-ratio increment; spreads consecutive keys over the seed space.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── NodeRng ───────────────────────────────────────────────────────────────────

/// Noise and volume stream of one node within one scoring call.
pub struct NodeRng(SmallRng);

impl NodeRng {
    pub fn new(call_seed: u64, node: NodeId) -> Self {
        let seed = call_seed ^ (node.0 as u64).wrapping_mul(MIXING_CONSTANT);
        NodeRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The generator handed to the synthesizer and the scorer.
///
/// Not shared between threads; a service keeps one root behind a lock and
/// hands each request a [`child`](Self::child).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Unseeded generator for production runs.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// `new(seed)` when a seed is given, otherwise `from_entropy()`.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Generator keyed by a stable `(seed, key)` pair.  The same pair always
    /// yields the same stream, independent of any other generator's state.
    pub fn keyed(seed: u64, key: u64) -> Self {
        SimRng::new(seed ^ key.wrapping_add(1).wrapping_mul(MIXING_CONSTANT))
    }

    /// Split off an independent generator.  Advances `self` by one draw.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// One `Standard` sample, e.g. a `u64` seed.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
