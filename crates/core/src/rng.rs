//! RNG module - color sources for new tiles
//!
//! Tiles created by the initializer and by refill draw their color from a
//! [`ColorSource`]. The default source is a small seeded LCG so that a seed
//! fully determines a game. Tests can substitute [`ScriptedColors`] to make
//! refills (and therefore cascades) predictable.

use tui_match3_types::TileColor;

/// Something that hands out tile colors.
pub trait ColorSource {
    /// Pick one color from `choices` (never empty).
    fn pick(&mut self, choices: &[TileColor]) -> TileColor;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would still advance, but keep seed 0 distinct from "unseeded".
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with a
    /// very short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() >> 16) * max) >> 16
    }

    /// Current RNG state (seeds the next level so a run is reproducible)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorSource for SimpleRng {
    fn pick(&mut self, choices: &[TileColor]) -> TileColor {
        let idx = self.next_range(choices.len() as u32) as usize;
        choices[idx]
    }
}

/// Seed derived from the wall clock, for runs started without `--seed`.
pub fn seed_from_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    (nanos as u32) ^ ((nanos >> 32) as u32)
}

/// Replays a fixed color sequence, cycling when exhausted.
///
/// A scripted color that is not among the offered choices is skipped in favour
/// of the first choice, so run-free generation constraints still hold.
#[derive(Debug, Clone)]
pub struct ScriptedColors {
    colors: Vec<TileColor>,
    next: usize,
}

impl ScriptedColors {
    pub fn new(colors: impl Into<Vec<TileColor>>) -> Self {
        let colors = colors.into();
        assert!(!colors.is_empty(), "scripted color sequence must not be empty");
        Self { colors, next: 0 }
    }

    /// Number of colors handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl ColorSource for ScriptedColors {
    fn pick(&mut self, choices: &[TileColor]) -> TileColor {
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        if choices.contains(&color) {
            color
        } else {
            choices[0]
        }
    }
}

impl<S: ColorSource + ?Sized> ColorSource for &mut S {
    fn pick(&mut self, choices: &[TileColor]) -> TileColor {
        (**self).pick(choices)
    }
}
