//! Per-tick motion for the player and obstacles.

use super::types::{Obstacle, Player};
use crate::core::constants::*;

/// Recompute the player's vertical velocity.
///
/// Gravity grows geometrically until it hits terminal gravity; the upward
/// impulse decays geometrically. Velocity is their sum.
pub fn determine_velocity(player: &mut Player) {
    player.gravity *= GRAVITY_GROWTH;
    if player.gravity < TERMINAL_GRAVITY {
        player.gravity = TERMINAL_GRAVITY;
    }

    player.velocity.y = player.impulse + player.gravity;
    player.impulse *= IMPULSE_DECAY;
}

/// Apply velocity. Hitting `ceiling` pins the player there and turns the
/// impulse downward.
pub fn move_player(player: &mut Player, ceiling: f64) {
    player.position += player.velocity;

    if player.position.y >= ceiling {
        player.position.y = ceiling;
        player.impulse = CEILING_IMPULSE;
    }
}

/// Restore full upward thrust and reset accumulated gravity.
pub fn flap(player: &mut Player) {
    player.impulse = FLAP_IMPULSE;
    player.gravity = BASE_GRAVITY;
}

pub fn move_obstacle(obstacle: &mut Obstacle) {
    obstacle.position += obstacle.velocity;
}

/// Whether the player touches the obstacle.
pub fn collides(player: &Player, obstacle: &Obstacle) -> bool {
    player.bounds().overlaps(&obstacle.bounds())
}
