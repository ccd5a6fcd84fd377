use hecs::World;

use crate::map::Arena;
use crate::resources::{Events, RandomSource};
use crate::systems::collision::{sweep_ball, PaddleSet};
use crate::{Ball, Paddle, PaddleIntent};

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, arena: &Arena) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.apply(intent.action, arena);
    }
}

/// Sweep the ball one frame against the paddles' current positions
pub fn move_ball(
    world: &mut World,
    arena: &Arena,
    events: &mut Events,
    rng: &mut impl RandomSource,
) {
    let paddles = PaddleSet::collect(world);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let contact = sweep_ball(ball, &paddles, arena, rng);
        events.record(contact);
    }
}
