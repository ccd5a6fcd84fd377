use glam::IVec2;
use hecs::{Entity, World};

use crate::error::{CoreError, Result};
use crate::map::Rect;
use crate::resources::{Events, GameRng, RandomSource, Score};
use crate::systems::check_scoring;
use crate::{create_ball, create_paddle, Action, Ball, Config, Paddle, PlayerId};

/// Per-step diagnostics returned alongside the rewards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    pub frame: u64, // simulated frames since reset
    pub score: Score,
    pub events: Events,
    pub winner: Option<PlayerId>,
}

/// Result of one external step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub rewards: [i32; 2], // indexed by player
    pub done: bool,
    pub info: StepInfo,
}

/// Drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectView {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub color: [u8; 3],
}

impl RectView {
    pub fn new(rect: Rect, color: [u8; 3]) -> Self {
        Self {
            x: rect.min.x,
            y: rect.min.y,
            w: rect.size.x,
            h: rect.size.y,
            color,
        }
    }
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub paddles: [RectView; 2],
    pub ball: RectView,
    pub ball_vel: IVec2,
    pub score: Score,
    pub background: [u8; 3],
}

/// Match controller: owns the world (both paddles and the ball), the score
/// and the random source, and advances them in response to actions.
pub struct PongEnv<R: RandomSource = GameRng> {
    pub world: World,
    config: Config,
    pub score: Score,
    pub events: Events,
    pub rng: R,
    pub frame: u64,
    paddle_entities: [Entity; 2],
    ball_entity: Entity,
}

impl PongEnv<GameRng> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_rng(config, GameRng::default())
    }

    pub fn seeded(config: Config, seed: u64) -> Result<Self> {
        Self::with_rng(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> PongEnv<R> {
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self> {
        config.validate()?;

        let mut world = World::new();
        let (paddles, ball) = Self::populate(&mut world, &config, &mut rng);

        log::info!(
            "created pong env {}x{}, step_repeat {}, top_score {}, players {} vs {}",
            config.arena_width,
            config.arena_height,
            config.step_repeat,
            config.top_score,
            config.player_kinds[0],
            config.player_kinds[1]
        );

        Ok(Self {
            world,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            frame: 0,
            paddle_entities: paddles,
            ball_entity: ball,
        })
    }

    fn populate(world: &mut World, config: &Config, rng: &mut R) -> ([Entity; 2], Entity) {
        let paddles = PlayerId::BOTH.map(|player| create_paddle(world, player, config));
        let ball = create_ball(world, config, rng);
        (paddles, ball)
    }

    /// Start a new match: zero scores, paddles centered, ball served
    pub fn reset(&mut self) {
        self.world.clear();
        let (paddles, ball) = Self::populate(&mut self.world, &self.config, &mut self.rng);
        self.paddle_entities = paddles;
        self.ball_entity = ball;
        self.score = Score::new();
        self.events.clear();
        self.frame = 0;
        log::info!("match reset");
    }

    /// Advance `step_repeat` frames with raw actions (0 = none, 1 = up,
    /// 2 = down). Invalid actions are rejected before anything moves.
    pub fn step(&mut self, player_1_action: u8, player_2_action: u8) -> Result<StepOutcome> {
        let actions = [Action::try_from(player_1_action)?, Action::try_from(player_2_action)?];
        Ok(self.step_actions(actions))
    }

    pub fn step_actions(&mut self, actions: [Action; 2]) -> StepOutcome {
        if self.is_done() {
            log::warn!(
                "stepping a finished match (score {}-{})",
                self.score.left,
                self.score.right
            );
        }

        self.events.clear();
        for _ in 0..self.config.step_repeat {
            crate::step(&mut self.world, &self.config, actions, &mut self.events, &mut self.rng);
            self.frame += 1;
        }

        let scorer = check_scoring(
            &mut self.world,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );
        let rewards = match scorer {
            Some(PlayerId::One) => [1, -1],
            Some(PlayerId::Two) => [-1, 1],
            None => [0, 0],
        };

        let winner = self.winner();
        if scorer.is_some() {
            if let Some(winner) = winner {
                log::info!(
                    "player {:?} wins {}-{}",
                    winner,
                    self.score.left,
                    self.score.right
                );
            }
        }

        StepOutcome {
            rewards,
            done: winner.is_some(),
            info: StepInfo {
                frame: self.frame,
                score: self.score,
                events: self.events.clone(),
                winner,
            },
        }
    }

    /// The validated configuration this match runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.score.has_winner(self.config.top_score)
    }

    pub fn is_done(&self) -> bool {
        self.winner().is_some()
    }

    pub fn paddle(&self, player: PlayerId) -> Result<Paddle> {
        Ok(*self.world.get::<&Paddle>(self.paddle_entities[player.index()])?)
    }

    pub fn ball(&self) -> Result<Ball> {
        Ok(*self.world.get::<&Ball>(self.ball_entity)?)
    }

    /// Overwrite the ball's position and velocity, e.g. to set up a scenario
    pub fn place_ball(&mut self, pos: IVec2, vel: IVec2) -> Result<()> {
        let mut ball = self.world.get::<&mut Ball>(self.ball_entity)?;
        let max = ball.max_speed;
        if vel.x.abs() > max || vel.y.abs() > max {
            return Err(CoreError::InvalidPlacement(format!(
                "ball velocity {} exceeds max speed {}",
                vel, max
            )));
        }
        ball.pos = pos;
        ball.vel = vel;
        Ok(())
    }

    /// Move a paddle to `y`, rejected when outside the arena
    pub fn place_paddle(&mut self, player: PlayerId, y: i32) -> Result<()> {
        let arena = self.config.arena();
        let mut paddle = self.world.get::<&mut Paddle>(self.paddle_entities[player.index()])?;
        if !arena.fits_vertically(y, paddle.height) {
            return Err(CoreError::InvalidPlacement(format!(
                "paddle y {} outside [0, {}]",
                y,
                arena.max_top(paddle.height)
            )));
        }
        paddle.y = y;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let paddle_view = |player: PlayerId| -> Result<RectView> {
            Ok(RectView::new(self.paddle(player)?.rect(), self.config.paddle_color(player)))
        };
        let ball = self.ball()?;

        Ok(Snapshot {
            paddles: [paddle_view(PlayerId::One)?, paddle_view(PlayerId::Two)?],
            ball: RectView::new(ball.rect(), self.config.ball_color),
            ball_vel: ball.vel,
            score: self.score,
            background: self.config.background_color,
        })
    }
}
