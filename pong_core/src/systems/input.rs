use hecs::World;

use crate::components::*;

/// Apply this frame's actions to the paddle intents, indexed by player
pub fn ingest_actions(world: &mut World, actions: [Action; 2]) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        intent.action = actions[paddle.player.index()];
    }
}
