use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::PlayerId;
use crate::systems::collision::{Contact, VerticalContact};

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,  // Player 1 score
    pub right: u32, // Player 2 score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, player: PlayerId) {
        match player {
            PlayerId::One => self.left += 1,
            PlayerId::Two => self.right += 1,
        }
    }

    pub fn get(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.left,
            PlayerId::Two => self.right,
        }
    }

    pub fn has_winner(&self, top_score: u32) -> Option<PlayerId> {
        if self.left >= top_score {
            Some(PlayerId::One)
        } else if self.right >= top_score {
            Some(PlayerId::Two)
        } else {
            None
        }
    }
}

/// Source of the random draws the ball needs: serve tables, bounce jitter
/// and the initial serve side. Swap in `ScriptedRng` for exact replays.
pub trait RandomSource {
    /// Pick one value from a non-empty table
    fn pick(&mut self, choices: &[i32]) -> i32;

    /// Fair coin
    fn flip(&mut self) -> bool;
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, choices: &[i32]) -> i32 {
        choices.choose(&mut self.0).copied().unwrap_or_default()
    }

    fn flip(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

/// Replays a fixed sequence of draws. Once a queue runs dry `pick` falls back
/// to the first entry of the table and `flip` to `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    picks: VecDeque<i32>,
    flips: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = i32>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }

    pub fn push_pick(&mut self, value: i32) {
        self.picks.push_back(value);
    }

    pub fn remaining_picks(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedRng {
    fn pick(&mut self, choices: &[i32]) -> i32 {
        self.picks
            .pop_front()
            .or_else(|| choices.first().copied())
            .unwrap_or_default()
    }

    fn flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }
}

/// Events that occurred during one external step (all sub-frames)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub scored: Option<PlayerId>,
    pub wall_bounces: u32,
    pub paddle_hits: u32,   // horizontal returns off a paddle face
    pub paddle_grazes: u32, // vertical deflections off a paddle end
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, contact: Contact) {
        match contact.vertical {
            Some(VerticalContact::Wall) => self.wall_bounces += 1,
            Some(VerticalContact::Paddle) => self.paddle_grazes += 1,
            None => {}
        }
        if contact.paddle_hit {
            self.paddle_hits += 1;
        }
    }
}
