use glam::IVec2;
use hecs::World;

use crate::map::{Arena, Rect};
use crate::params::Params;
use crate::resources::RandomSource;
use crate::{Ball, Paddle};

/// Read-only overlap queries the ball runs against the things it can hit
pub trait Collider {
    fn overlaps(&self, rect: &Rect) -> bool;
}

impl Collider for Rect {
    fn overlaps(&self, rect: &Rect) -> bool {
        Rect::overlaps(self, rect)
    }
}

/// Paddle rectangles captured at the start of a ball move
#[derive(Debug, Clone, Default)]
pub struct PaddleSet {
    rects: Vec<Rect>,
}

impl PaddleSet {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// Collect paddle data without holding borrows on the world
    pub fn collect(world: &World) -> Self {
        let rects = world
            .query::<&Paddle>()
            .iter()
            .map(|(_e, paddle)| paddle.rect())
            .collect();
        Self { rects }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Collider for PaddleSet {
    fn overlaps(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|r| r.overlaps(rect))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    Wall,
    Paddle, // top or bottom end of a paddle
}

/// What the ball touched during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    pub vertical: Option<VerticalContact>,
    pub paddle_hit: bool,
}

impl Contact {
    pub fn is_none(&self) -> bool {
        self.vertical.is_none() && !self.paddle_hit
    }
}

fn bounce(v: i32, jitter: i32, max_speed: i32) -> i32 {
    (-v + jitter).clamp(-max_speed, max_speed)
}

/// Advance the ball one frame.
///
/// Each axis is swept one pixel at a time, vertical first at the old x, then
/// horizontal at the swept y, so a fast ball cannot skip over a thin paddle.
/// The first blocked pixel on an axis reflects that axis and ends its sweep
/// for the frame; the blocked pixel itself is not entered.
///
/// A ball that already overlaps a paddle when the frame starts skips the wall
/// check and the horizontal paddle check for this frame, so it passes through
/// the paddle horizontally instead of bouncing back and forth inside it. The
/// vertical paddle check still runs and reflects vy.
pub fn sweep_ball(
    ball: &mut Ball,
    colliders: &impl Collider,
    arena: &Arena,
    rng: &mut impl RandomSource,
) -> Contact {
    let mut contact = Contact::default();
    let step = ball.vel.signum();
    let max_speed = ball.max_speed;
    let embedded = colliders.overlaps(&ball.rect());
    let IVec2 { mut x, mut y } = ball.pos;

    // Vertical sweep
    for _ in 0..ball.vel.y.abs() {
        let next_y = y + step.y;

        // The paddle check runs even when embedded, at the old x
        let blocked = if !embedded && !arena.fits_vertically(next_y, ball.size.y) {
            Some(VerticalContact::Wall)
        } else if colliders.overlaps(&ball.rect_at(x, next_y)) {
            Some(VerticalContact::Paddle)
        } else {
            None
        };

        if let Some(kind) = blocked {
            let jitter = rng.pick(&Params::BOUNCE_JITTER);
            ball.vel.y = bounce(ball.vel.y, jitter, max_speed);
            contact.vertical = Some(kind);
            log::trace!("ball bounced vertically off {:?} at ({}, {})", kind, x, y);
            break;
        }

        y = next_y;
    }

    // Horizontal sweep
    for _ in 0..ball.vel.x.abs() {
        let next_x = x + step.x;

        if !embedded && colliders.overlaps(&ball.rect_at(next_x, y)) {
            // Returning a ball speeds it up by one pixel per frame
            ball.vel.x = bounce(ball.vel.x + step.x, 0, max_speed);
            let jitter = rng.pick(&Params::BOUNCE_JITTER);
            ball.vel.y = (ball.vel.y + jitter).clamp(-max_speed, max_speed);
            contact.paddle_hit = true;
            log::trace!("ball returned by paddle at ({}, {})", x, y);
            break;
        }

        x = next_x;
    }

    ball.pos = IVec2::new(x, y);
    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ScriptedRng;
    use crate::{Config, PlayerId};
    use proptest::prelude::*;

    fn setup() -> (Config, Arena) {
        let config = Config::new();
        let arena = config.arena();
        (config, arena)
    }

    fn ball_at(config: &Config, pos: IVec2, vel: IVec2) -> Ball {
        let mut ball = Ball::new(config, &mut ScriptedRng::new());
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    fn paddles(config: &Config, left_y: i32, right_y: i32) -> PaddleSet {
        let mut left = Paddle::new(PlayerId::One, config);
        let mut right = Paddle::new(PlayerId::Two, config);
        left.y = left_y;
        right.y = right_y;
        PaddleSet::new(vec![left.rect(), right.rect()])
    }

    #[test]
    fn test_free_flight_from_center() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(530, 350), IVec2::new(14, 0));
        let mut rng = ScriptedRng::new();

        let contact = sweep_ball(&mut ball, &PaddleSet::default(), &arena, &mut rng);

        assert!(contact.is_none());
        assert_eq!(ball.pos, IVec2::new(544, 350), "x advances by 14, y unchanged");
        assert_eq!(ball.vel, IVec2::new(14, 0));
    }

    #[test]
    fn test_free_flight_diagonal() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(530, 350), IVec2::new(-10, -6));
        let contact = sweep_ball(
            &mut ball,
            &paddles(&config, 300, 300),
            &arena,
            &mut ScriptedRng::new(),
        );
        assert!(contact.is_none());
        assert_eq!(ball.pos, IVec2::new(520, 344));
        assert_eq!(ball.vel, IVec2::new(-10, -6));
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(530, 3), IVec2::new(10, -6));
        let mut rng = ScriptedRng::new().with_picks([-1]);

        let contact = sweep_ball(&mut ball, &PaddleSet::default(), &arena, &mut rng);

        assert_eq!(contact.vertical, Some(VerticalContact::Wall));
        assert_eq!(ball.pos, IVec2::new(540, 0), "Sweep stops at the wall");
        assert_eq!(ball.vel, IVec2::new(10, 5), "vy = -(-6) + (-1)");
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(530, 698), IVec2::new(-10, 4));
        let mut rng = ScriptedRng::new().with_picks([1]);

        let contact = sweep_ball(&mut ball, &PaddleSet::default(), &arena, &mut rng);

        assert_eq!(contact.vertical, Some(VerticalContact::Wall));
        assert_eq!(ball.pos, IVec2::new(520, 700));
        assert_eq!(ball.vel, IVec2::new(-10, -3), "vy = -4 + 1");
    }

    #[test]
    fn test_wall_bounce_clamps_to_max_speed() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(530, 2), IVec2::new(10, -30));
        let mut rng = ScriptedRng::new().with_picks([1]);

        sweep_ball(&mut ball, &PaddleSet::default(), &arena, &mut rng);

        assert_eq!(ball.vel.y, 30, "31 clamps to 30");
    }

    #[test]
    fn test_ball_collides_with_left_paddle() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(80, 350), IVec2::new(-14, 2));
        let mut rng = ScriptedRng::new().with_picks([1]);

        let contact = sweep_ball(&mut ball, &paddles(&config, 300, 300), &arena, &mut rng);

        assert!(contact.paddle_hit);
        assert_eq!(contact.vertical, None);
        assert_eq!(ball.pos, IVec2::new(70, 352), "Ball stops flush with the paddle face");
        assert_eq!(ball.vel, IVec2::new(15, 3), "vx = -(-14 - 1), vy = 2 + 1");
    }

    #[test]
    fn test_ball_collides_with_right_paddle() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(980, 350), IVec2::new(14, 0));
        let mut rng = ScriptedRng::new().with_picks([-1]);

        let contact = sweep_ball(&mut ball, &paddles(&config, 300, 300), &arena, &mut rng);

        assert!(contact.paddle_hit);
        assert_eq!(ball.pos, IVec2::new(990, 350));
        assert_eq!(ball.vel, IVec2::new(-15, -1));
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_through_paddle() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(90, 350), IVec2::new(-30, 0));
        let mut rng = ScriptedRng::new().with_picks([1]);

        let contact = sweep_ball(&mut ball, &paddles(&config, 300, 300), &arena, &mut rng);

        assert!(contact.paddle_hit);
        assert_eq!(ball.pos.x, 70);
        assert_eq!(ball.vel.x, 30, "31 clamps to 30");
    }

    #[test]
    fn test_ball_deflects_off_paddle_end() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(55, 275), IVec2::new(5, 6));
        let mut rng = ScriptedRng::new().with_picks([1]);

        let contact = sweep_ball(&mut ball, &paddles(&config, 300, 300), &arena, &mut rng);

        assert_eq!(contact.vertical, Some(VerticalContact::Paddle));
        assert!(!contact.paddle_hit);
        assert_eq!(ball.pos, IVec2::new(60, 280));
        assert_eq!(ball.vel, IVec2::new(5, -5));
    }

    #[test]
    fn test_embedded_ball_passes_through_for_one_frame() {
        let (config, arena) = setup();
        let mut ball = ball_at(&config, IVec2::new(60, 350), IVec2::new(-14, 4));
        let mut rng = ScriptedRng::new().with_picks([1, 1]);

        let contact = sweep_ball(&mut ball, &paddles(&config, 300, 300), &arena, &mut rng);

        assert_eq!(contact.vertical, Some(VerticalContact::Paddle));
        assert!(!contact.paddle_hit, "No horizontal reflection while embedded");
        assert_eq!(ball.pos, IVec2::new(46, 350), "y blocked at once, x travels in full");
        assert_eq!(ball.vel, IVec2::new(-14, -3), "vy = -(4) + 1, vx unchanged");
        assert_eq!(rng.remaining_picks(), 1, "Only the vertical jitter drawn");
    }

    #[test]
    fn test_paddle_set_collects_from_world() {
        let config = Config::new();
        let mut world = World::new();
        crate::create_paddle(&mut world, PlayerId::One, &config);
        crate::create_paddle(&mut world, PlayerId::Two, &config);

        let set = PaddleSet::collect(&world);
        assert_eq!(set.len(), 2);
        assert!(set.overlaps(&Rect::from_xywh(60, 350, 20, 20)));
        assert!(set.overlaps(&Rect::from_xywh(1000, 350, 20, 20)));
        assert!(!set.overlaps(&Rect::from_xywh(530, 350, 20, 20)));
    }

    proptest! {
        /// Away from walls and paddles a frame moves the ball by exactly its velocity
        #[test]
        fn prop_free_flight_moves_by_velocity(
            x in 100i32..900,
            y in 100i32..560,
            vx in -30i32..=30,
            vy in -30i32..=30,
        ) {
            let (config, arena) = setup();
            let mut ball = ball_at(&config, IVec2::new(x, y), IVec2::new(vx, vy));
            let mut rng = ScriptedRng::new();
            let contact = sweep_ball(&mut ball, &PaddleSet::default(), &arena, &mut rng);
            prop_assert!(contact.is_none());
            prop_assert_eq!(ball.pos, IVec2::new(x + vx, y + vy));
            prop_assert_eq!(ball.vel, IVec2::new(vx, vy));
        }

        /// Speeds stay bounded and a ball that starts clear of the paddles stays
        /// between the walls
        #[test]
        fn prop_sweep_keeps_invariants(
            x in -40i32..1100,
            y in 0i32..=700,
            vx in -30i32..=30,
            vy in -30i32..=30,
            left_y in 0i32..=600,
            right_y in 0i32..=600,
            jitter in prop::sample::select(vec![-1, 1]),
        ) {
            let (config, arena) = setup();
            let set = paddles(&config, left_y, right_y);
            let mut ball = ball_at(&config, IVec2::new(x, y), IVec2::new(vx, vy));
            let embedded = set.overlaps(&ball.rect());
            let mut rng = ScriptedRng::new().with_picks([jitter, jitter]);

            let contact = sweep_ball(&mut ball, &set, &arena, &mut rng);

            prop_assert!(ball.vel.x.abs() <= config.ball_max_speed);
            prop_assert!(ball.vel.y.abs() <= config.ball_max_speed);
            if !embedded {
                prop_assert!(arena.fits_vertically(ball.pos.y, ball.size.y));
            }
            if contact.paddle_hit {
                prop_assert!(ball.vel.x.signum() == -vx.signum());
            }
            let wall_only = contact.vertical == Some(VerticalContact::Wall) && !contact.paddle_hit;
            if wall_only && vy.abs() > 1 {
                prop_assert!(ball.vel.y.signum() == -vy.signum());
            }
        }
    }
}
