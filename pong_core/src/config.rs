use std::fmt;
use std::str::FromStr;

use glam::IVec2;

use crate::components::PlayerId;
use crate::error::{CoreError, Result};
use crate::map::Arena;
use crate::params::Params;

/// Who drives a paddle. The core only records this for the surrounding
/// environment; actions always arrive through `PongEnv::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerKind {
    #[default]
    Ai,
    Bot,
    Human,
}

impl FromStr for PlayerKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ai" => Ok(PlayerKind::Ai),
            "bot" => Ok(PlayerKind::Bot),
            "human" => Ok(PlayerKind::Human),
            other => Err(CoreError::InvalidPlayerKind(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Ai => "ai",
            PlayerKind::Bot => "bot",
            PlayerKind::Human => "human",
        };
        f.write_str(name)
    }
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: i32,
    pub arena_height: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_speed: i32,
    pub paddle_margin: i32,
    pub ball_size: i32,
    pub ball_max_speed: i32,
    pub serve_speeds: Vec<i32>,
    pub serve_vertical_speeds: Vec<i32>,
    pub step_repeat: u32,
    pub top_score: u32,
    pub player_kinds: [PlayerKind; 2],
    pub paddle_colors: [[u8; 3]; 2],
    pub ball_color: [u8; 3],
    pub background_color: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_margin: Params::PADDLE_MARGIN,
            ball_size: Params::BALL_SIZE,
            ball_max_speed: Params::BALL_MAX_SPEED,
            serve_speeds: Params::SERVE_SPEEDS.to_vec(),
            serve_vertical_speeds: Params::SERVE_VERTICAL_SPEEDS.to_vec(),
            step_repeat: Params::STEP_REPEAT,
            top_score: Params::TOP_SCORE,
            player_kinds: [PlayerKind::Ai, PlayerKind::Bot],
            paddle_colors: [Params::PLAYER_ONE_COLOR, Params::PLAYER_TWO_COLOR],
            ball_color: Params::BALL_COLOR,
            background_color: Params::BACKGROUND_COLOR,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arena(mut self, width: i32, height: i32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    pub fn with_step_repeat(mut self, step_repeat: u32) -> Self {
        self.step_repeat = step_repeat;
        self
    }

    pub fn with_top_score(mut self, top_score: u32) -> Self {
        self.top_score = top_score;
        self
    }

    /// Parse both player kinds, e.g. `("ai", "bot")`
    pub fn with_players(mut self, player_1: &str, player_2: &str) -> Result<Self> {
        self.player_kinds = [player_1.parse()?, player_2.parse()?];
        Ok(self)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    pub fn ball_dims(&self) -> IVec2 {
        IVec2::splat(self.ball_size)
    }

    /// Get X position for paddle based on player
    pub fn paddle_x(&self, player: PlayerId) -> i32 {
        match player {
            PlayerId::One => self.paddle_margin,
            PlayerId::Two => self.arena_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Paddles start vertically centered
    pub fn paddle_start_y(&self) -> i32 {
        self.arena_height / 2 - self.paddle_height / 2
    }

    /// Top-left corner of a freshly served ball
    pub fn ball_spawn(&self) -> IVec2 {
        self.arena().centered(self.ball_dims())
    }

    pub fn paddle_color(&self, player: PlayerId) -> [u8; 3] {
        self.paddle_colors[player.index()]
    }

    /// Reject configurations that cannot host a match
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(CoreError::InvalidConfig(msg));

        if self.arena_width <= 0 || self.arena_height <= 0 {
            return invalid(format!(
                "arena must be non-empty, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        if self.paddle_width <= 0
            || self.paddle_height <= 0
            || self.paddle_height > self.arena_height
        {
            return invalid(format!(
                "paddle {}x{} does not fit an arena of height {}",
                self.paddle_width, self.paddle_height, self.arena_height
            ));
        }
        if self.paddle_x(PlayerId::One) + self.paddle_width > self.paddle_x(PlayerId::Two) {
            return invalid("paddles overlap horizontally".to_string());
        }
        if self.ball_size <= 0 || self.ball_size > self.arena_height {
            return invalid(format!("ball size {} does not fit the arena", self.ball_size));
        }
        if self.step_repeat == 0 {
            return invalid("step_repeat must be at least 1".to_string());
        }
        if self.top_score == 0 {
            return invalid("top_score must be at least 1".to_string());
        }
        if self.serve_speeds.is_empty() || self.serve_vertical_speeds.is_empty() {
            return invalid("serve tables must not be empty".to_string());
        }
        if self.serve_speeds.iter().any(|&s| s <= 0) {
            return invalid("serve speeds must be positive".to_string());
        }
        if self.serve_vertical_speeds.contains(&0) {
            return invalid("vertical serve speeds must not contain zero".to_string());
        }
        let fastest = self
            .serve_speeds
            .iter()
            .chain(self.serve_vertical_speeds.iter())
            .map(|s| s.abs())
            .max()
            .unwrap_or(0);
        if fastest > self.ball_max_speed {
            return invalid(format!(
                "serve speed {} exceeds ball max speed {}",
                fastest, self.ball_max_speed
            ));
        }
        Ok(())
    }
}
