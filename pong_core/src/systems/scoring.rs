use hecs::World;

use crate::components::PlayerId;
use crate::resources::{Events, RandomSource, Score};
use crate::{Ball, Config};

/// Check if the ball's center crossed a goal line. The scorer gets the
/// point and the ball is served again from the center.
///
/// A ball leaving past the left edge scores for player 1, past the right
/// edge for player 2.
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut impl RandomSource,
) -> Option<PlayerId> {
    let mut scorer = None;

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let center = ball.center_x();
        let player = if center < 0.0 {
            PlayerId::One
        } else if center > config.arena_width as f32 {
            PlayerId::Two
        } else {
            continue;
        };

        score.increment(player);
        events.scored = Some(player);
        log::debug!(
            "player {:?} scored (ball center x = {}), score {}-{}",
            player,
            center,
            score.left,
            score.right
        );

        ball.spawn(config, rng);
        scorer = Some(player);
    }

    scorer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use crate::resources::{GameRng, ScriptedRng};
    use glam::IVec2;

    fn setup_world() -> (World, Config, Score, Events, GameRng) {
        let world = World::new();
        let config = Config::new();
        let score = Score::new();
        let events = Events::new();
        let rng = GameRng::new(12345); // Fixed seed for deterministic tests
        (world, config, score, events, rng)
    }

    fn place(world: &mut World, entity: hecs::Entity, x: i32, vel: IVec2) {
        let mut ball = world.get::<&mut Ball>(entity).unwrap();
        ball.pos = IVec2::new(x, 350);
        ball.vel = vel;
    }

    #[test]
    fn test_player_one_scores_when_ball_exits_left() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, &mut rng);
        place(&mut world, ball, -11, IVec2::new(-12, 0)); // center at -1

        let scorer = check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!(scorer, Some(PlayerId::One));
        assert_eq!(score.left, 1, "Player 1 should score");
        assert_eq!(score.right, 0, "Player 2 should not score");
        assert_eq!(events.scored, Some(PlayerId::One));
    }

    #[test]
    fn test_player_two_scores_when_ball_exits_right() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, &mut rng);
        place(&mut world, ball, 1071, IVec2::new(12, 0)); // center at 1081

        let scorer = check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!(scorer, Some(PlayerId::Two));
        assert_eq!(score.right, 1, "Player 2 should score");
        assert_eq!(score.left, 0);
    }

    #[test]
    fn test_center_on_goal_line_is_not_a_goal() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, &mut rng);
        place(&mut world, ball, -10, IVec2::new(-12, 0)); // center exactly 0

        assert_eq!(check_scoring(&mut world, &config, &mut score, &mut events, &mut rng), None);

        place(&mut world, ball, 1070, IVec2::new(12, 0)); // center exactly 1080
        assert_eq!(check_scoring(&mut world, &config, &mut score, &mut events, &mut rng), None);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (mut world, config, mut score, mut events, _) = setup_world();
        let mut rng = ScriptedRng::new().with_flips([true]).with_picks([10, 2, 14, -6]);
        let ball = create_ball(&mut world, &config, &mut rng);
        assert_eq!(world.get::<&Ball>(ball).unwrap().vel, IVec2::new(10, 2));
        place(&mut world, ball, -40, IVec2::new(-30, 2));

        check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        let ball = world.get::<&Ball>(ball).unwrap();
        assert_eq!(ball.pos, config.ball_spawn(), "Ball should reset to center after scoring");
        assert_eq!(ball.vel, IVec2::new(-14, -6), "Serve flips to the other side");
    }

    #[test]
    fn test_no_scoring_when_ball_in_bounds() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, &mut rng);

        let scorer = check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!(scorer, None);
        assert_eq!(score, Score::new(), "No score when ball in bounds");
        assert_eq!(events.scored, None, "No scoring events");
    }
}
