use glam::IVec2;

use crate::config::Config;
use crate::error::CoreError;
use crate::map::{Arena, Rect};
use crate::resources::RandomSource;

/// Which side a paddle belongs to. Player 1 is on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Discrete per-frame paddle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    Up,
    Down,
}

impl TryFrom<u8> for Action {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::None),
            1 => Ok(Action::Up),
            2 => Ok(Action::Down),
            other => Err(CoreError::InvalidAction(other)),
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        match action {
            Action::None => 0,
            Action::Up => 1,
            Action::Down => 2,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    pub player: PlayerId,
    pub x: i32, // fixed for the whole match
    pub y: i32, // top edge, kept inside [0, arena_height - height]
    pub width: i32,
    pub height: i32,
    pub speed: i32,
}

impl Paddle {
    /// Paddle in its start position for `player`
    pub fn new(player: PlayerId, config: &Config) -> Self {
        Self {
            player,
            x: config.paddle_x(player),
            y: config.paddle_start_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }

    /// Move one frame. A move that would leave the arena is rejected outright,
    /// so the paddle never ends up pressed against a wall part-way. Returns
    /// whether the paddle moved.
    pub fn apply(&mut self, action: Action, arena: &Arena) -> bool {
        let new_y = match action {
            Action::None => return false,
            Action::Up => self.y - self.speed,
            Action::Down => self.y + self.speed,
        };

        if arena.fits_vertically(new_y, self.height) {
            self.y = new_y;
            true
        } else {
            false
        }
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub action: Action,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub pos: IVec2, // top-left corner
    pub vel: IVec2, // pixels per frame, each axis within [-max_speed, max_speed]
    pub size: IVec2,
    pub max_speed: i32,
    /// Side the last serve travelled toward (true = left)
    pub served_left: bool,
}

impl Ball {
    /// Build a ball and serve it. The first serve side is a coin flip,
    /// later serves alternate.
    pub fn new(config: &Config, rng: &mut impl RandomSource) -> Self {
        let mut ball = Self {
            pos: config.ball_spawn(),
            vel: IVec2::ZERO,
            size: config.ball_dims(),
            max_speed: config.ball_max_speed,
            served_left: rng.flip(),
        };
        ball.spawn(config, rng);
        ball
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn rect_at(&self, x: i32, y: i32) -> Rect {
        Rect::new(IVec2::new(x, y), self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.rect().center_x()
    }

    /// Re-serve from the center toward the side opposite the previous serve
    pub fn spawn(&mut self, config: &Config, rng: &mut impl RandomSource) {
        self.pos = config.ball_spawn();
        self.served_left = !self.served_left;

        let speed = rng.pick(&config.serve_speeds);
        let vx = if self.served_left { -speed } else { speed };
        let vy = rng.pick(&config.serve_vertical_speeds);
        let max = IVec2::splat(self.max_speed);
        self.vel = IVec2::new(vx, vy).clamp(-max, max);
    }
}
