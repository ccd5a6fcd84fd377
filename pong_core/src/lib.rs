pub mod components;
pub mod config;
pub mod env;
pub mod error;
pub mod map;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use env::*;
pub use error::{CoreError, Result};
pub use map::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one simulated frame of the Pong game
pub fn step(
    world: &mut World,
    config: &Config,
    actions: [Action; 2],
    events: &mut Events,
    rng: &mut impl RandomSource,
) {
    let arena = config.arena();

    // 1. Apply actions to paddle intents
    ingest_actions(world, actions);

    // 2. Move paddles based on intents
    move_paddles(world, &arena);

    // 3. Sweep the ball against walls and the moved paddles
    move_ball(world, &arena, events, rng);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, player: PlayerId, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(player, config), PaddleIntent::new()))
}

/// Helper to create the ball entity, already served
pub fn create_ball(
    world: &mut World,
    config: &Config,
    rng: &mut impl RandomSource,
) -> hecs::Entity {
    world.spawn((Ball::new(config, rng),))
}
