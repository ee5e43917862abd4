//! Seeded rally generator
//!
//! Picks point winners from a seeded RNG so demo matches are reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::score::{ScoreEngine, ScoreEvent, Side};

/// Decides who wins each rally
#[derive(Debug, Clone)]
pub struct RallySim {
    rng: Pcg32,
    /// Probability (0-1) that Left wins any given point
    left_point_chance: f64,
}

impl RallySim {
    pub fn new(seed: u64, left_point_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            left_point_chance: left_point_chance.clamp(0.0, 1.0),
        }
    }

    /// Evenly matched players
    pub fn even(seed: u64) -> Self {
        Self::new(seed, 0.5)
    }

    pub fn next_winner(&mut self) -> Side {
        if self.rng.random_bool(self.left_point_chance) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Feed points into `engine` until the match ends or `max_points` are
    /// played. Returns how many points were played.
    pub fn play_out(&mut self, engine: &mut ScoreEngine, max_points: u32) -> u32 {
        let mut played = 0;
        while played < max_points && !engine.is_finished() {
            let event = engine.point_to(self.next_winner());
            if event == ScoreEvent::TieBreakStarted {
                log::debug!("Tie-break after {} points", played + 1);
            }
            played += 1;
        }
        played
    }
}
