//! Collision and scoring detection
//!
//! Everything is axis-aligned: the avatar hitbox is tested against the
//! ceiling, the floor, and the two blocking regions of every obstacle.

use super::rect::Rect;
use super::state::{Avatar, Obstacle};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    Ceiling,
    Floor,
    Obstacle,
}

impl CollisionOutcome {
    /// Any hit ends the run the same way
    pub fn is_hit(&self) -> bool {
        *self != CollisionOutcome::Clear
    }

    pub fn hit_ceiling(&self) -> bool {
        *self == CollisionOutcome::Ceiling
    }

    pub fn hit_floor(&self) -> bool {
        *self == CollisionOutcome::Floor
    }
}

/// Test the avatar against world bounds, then obstacles.
///
/// Touching the ceiling (top ≤ 0) or floor (bottom ≥ `area_height`) counts
/// as a hit; obstacle regions must actually overlap.
pub fn check_collision(avatar: &Avatar, obstacles: &[Obstacle], area_height: f32) -> CollisionOutcome {
    let bounds = avatar.bounds();

    if bounds.top() <= 0.0 {
        return CollisionOutcome::Ceiling;
    }
    if bounds.bottom() >= area_height {
        return CollisionOutcome::Floor;
    }

    let blocked = obstacles
        .iter()
        .any(|obstacle| hits_obstacle(&bounds, obstacle, area_height));
    if blocked {
        CollisionOutcome::Obstacle
    } else {
        CollisionOutcome::Clear
    }
}

fn hits_obstacle(bounds: &Rect, obstacle: &Obstacle, area_height: f32) -> bool {
    bounds.intersects(&obstacle.upper_bounds())
        || bounds.intersects(&obstacle.lower_bounds(area_height))
}

/// Unscored obstacles whose center the avatar has moved past
pub fn count_newly_passed(avatar: &Avatar, obstacles: &[Obstacle]) -> u32 {
    obstacles
        .iter()
        .filter(|o| is_newly_passed(avatar, o))
        .count() as u32
}

/// Copy of `obstacles` with every newly passed one flagged as scored.
///
/// Pair with [`count_newly_passed`] on the same inputs: count first, then
/// mark, so each pass is scored exactly once.
pub fn mark_passed(avatar: &Avatar, obstacles: &[Obstacle]) -> Vec<Obstacle> {
    obstacles
        .iter()
        .map(|o| {
            if is_newly_passed(avatar, o) {
                o.marked_scored()
            } else {
                *o
            }
        })
        .collect()
}

#[inline]
fn is_newly_passed(avatar: &Avatar, obstacle: &Obstacle) -> bool {
    !obstacle.scored && obstacle.has_been_passed(avatar.x)
}
