//! Obstacle lifecycle: scroll, cull, spawn
//!
//! The spawner keeps two private counters between calls: the distance
//! scrolled since the last spawn and the tint of the next obstacle.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleTint, Viewport};
use crate::tuning::Tuning;

#[derive(Clone)]
pub struct ObstacleSpawner<R: Rng = Pcg32> {
    rng: R,
    tuning: Tuning,
    distance_since_spawn: f32,
    next_tint: ObstacleTint,
}

impl ObstacleSpawner<Pcg32> {
    pub fn from_seed(seed: u64, tuning: &Tuning) -> Self {
        Self::new(Pcg32::seed_from_u64(seed), tuning)
    }
}

impl<R: Rng> ObstacleSpawner<R> {
    pub fn new(rng: R, tuning: &Tuning) -> Self {
        Self {
            rng,
            tuning: *tuning,
            distance_since_spawn: 0.0,
            next_tint: ObstacleTint::default(),
        }
    }

    /// Advance the field by one step: scroll left, drop what left the
    /// screen, and spawn at most one new obstacle at the right edge.
    pub fn update(
        &mut self,
        obstacles: &[Obstacle],
        scroll_speed: f32,
        dt: f32,
        viewport: Viewport,
        avatar_height: f32,
    ) -> Vec<Obstacle> {
        let mut visible: Vec<Obstacle> = obstacles
            .iter()
            .map(|o| o.moved(scroll_speed, dt))
            .filter(|o| !o.is_off_screen())
            .collect();

        self.distance_since_spawn += scroll_speed * dt;

        if self.should_spawn(&visible, viewport.width) {
            let obstacle = self.spawn(viewport, avatar_height);
            log::debug!(
                "Spawned {:?} obstacle: gap center {:.1}, gap height {:.1}",
                obstacle.tint,
                obstacle.gap_center,
                obstacle.gap_height
            );
            visible.push(obstacle);
            self.distance_since_spawn = 0.0;
            self.next_tint = self.next_tint.toggled();
        }

        visible
    }

    /// Prime the accumulator for a new run; no obstacle is created yet.
    pub fn initial_obstacles(&mut self, viewport: Viewport) -> Vec<Obstacle> {
        self.distance_since_spawn = viewport.width * self.tuning.initial_distance_ratio;
        Vec::new()
    }

    pub fn reset(&mut self) {
        self.distance_since_spawn = 0.0;
        self.next_tint = ObstacleTint::default();
    }

    pub fn distance_since_spawn(&self) -> f32 {
        self.distance_since_spawn
    }

    pub fn next_tint(&self) -> ObstacleTint {
        self.next_tint
    }

    fn should_spawn(&self, obstacles: &[Obstacle], viewport_width: f32) -> bool {
        // Empty field: leave the player some room first
        let Some(rightmost) = obstacles.iter().map(|o| o.x).reduce(f32::max) else {
            return self.distance_since_spawn
                >= viewport_width * self.tuning.first_spawn_distance_ratio;
        };
        rightmost <= viewport_width - self.tuning.obstacle_spacing
    }

    fn spawn(&mut self, viewport: Viewport, avatar_height: f32) -> Obstacle {
        let gap_height = avatar_height * self.tuning.gap_multiplier;
        let min_segment = viewport.height * self.tuning.min_obstacle_height_ratio;
        let min_center = min_segment + gap_height / 2.0;
        let max_center = viewport.height - min_segment - gap_height / 2.0;

        let gap_center = if max_center > min_center {
            min_center + self.rng.random::<f32>() * (max_center - min_center)
        } else {
            // Viewport too short for the constraint; center the gap
            viewport.height / 2.0
        };

        Obstacle::new(
            viewport.width,
            gap_center,
            gap_height,
            viewport.width * self.tuning.obstacle_width_ratio,
        )
        .with_tint(self.next_tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 600.0,
    };
    const AVATAR_HEIGHT: f32 = 32.0;

    fn spawner() -> ObstacleSpawner {
        ObstacleSpawner::from_seed(42, &Tuning::default())
    }

    #[test]
    fn test_initial_setup_creates_nothing() {
        let mut spawner = spawner();
        let obstacles = spawner.initial_obstacles(VIEWPORT);
        assert!(obstacles.is_empty());
        assert!((spawner.distance_since_spawn() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_first_spawn_after_breathing_room() {
        let mut spawner = spawner();
        let mut obstacles = spawner.initial_obstacles(VIEWPORT);

        // 180 seeded, needs 200: 0.1 s at 100/s adds only 10
        obstacles = spawner.update(&obstacles, 100.0, 0.1, VIEWPORT, AVATAR_HEIGHT);
        assert!(obstacles.is_empty());

        obstacles = spawner.update(&obstacles, 100.0, 0.15, VIEWPORT, AVATAR_HEIGHT);
        assert_eq!(obstacles.len(), 1);
        let first = obstacles[0];
        assert_eq!(first.x, VIEWPORT.width);
        assert!((first.gap_height - AVATAR_HEIGHT * 6.0).abs() < 1e-4);
        assert!((first.width - 60.0).abs() < 1e-4);
        assert!(!first.scored);
        assert_eq!(first.tint, ObstacleTint::Red);
        assert_eq!(spawner.distance_since_spawn(), 0.0);
        assert_eq!(spawner.next_tint(), ObstacleTint::Blue);
    }

    #[test]
    fn test_gap_respects_min_segments() {
        let mut spawner = spawner();
        for _ in 0..200 {
            let obstacle = spawner.spawn(VIEWPORT, AVATAR_HEIGHT);
            let min_segment = VIEWPORT.height * 0.1;
            assert!(obstacle.gap_top() >= min_segment - 1e-3);
            assert!(obstacle.gap_bottom() <= VIEWPORT.height - min_segment + 1e-3);
        }
    }

    #[test]
    fn test_spacing_controls_next_spawn() {
        let mut spawner = spawner();
        // Left edge at 400 - 550 + 1: not far enough yet
        let waiting = [Obstacle::new(-149.0, 300.0, 192.0, 200.0)];
        let out = spawner.update(&waiting, 0.0, 0.016, VIEWPORT, AVATAR_HEIGHT);
        assert_eq!(out.len(), 1);

        let ready = [Obstacle::new(-150.0, 300.0, 192.0, 200.0)];
        let out = spawner.update(&ready, 0.0, 0.016, VIEWPORT, AVATAR_HEIGHT);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].x, VIEWPORT.width);
    }

    #[test]
    fn test_off_screen_culled() {
        let mut spawner = spawner();
        let obstacles = [
            Obstacle::new(-59.0, 300.0, 192.0, 60.0),
            Obstacle::new(350.0, 300.0, 192.0, 60.0),
        ];
        let out = spawner.update(&obstacles, 100.0, 0.02, VIEWPORT, AVATAR_HEIGHT);
        assert_eq!(out.len(), 1);
        assert!((out[0].x - 348.0).abs() < 1e-4);
    }

    #[test]
    fn test_tint_alternates_across_spawns() {
        let mut spawner = spawner();
        let mut obstacles = spawner.initial_obstacles(VIEWPORT);
        let mut tints = Vec::new();
        for _ in 0..5000 {
            obstacles = spawner.update(&obstacles, 250.0, 0.016, VIEWPORT, AVATAR_HEIGHT);
            // A fresh spawn is the only obstacle sitting exactly on the right edge
            if let Some(spawned) = obstacles.last().filter(|o| o.x == VIEWPORT.width) {
                tints.push(spawned.tint);
            }
        }
        assert!(tints.len() >= 3);
        for pair in tints.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_reset_restores_counters() {
        let mut spawner = spawner();
        spawner.initial_obstacles(VIEWPORT);
        spawner.update(&[], 100.0, 0.5, VIEWPORT, AVATAR_HEIGHT);
        spawner.reset();
        assert_eq!(spawner.distance_since_spawn(), 0.0);
        assert_eq!(spawner.next_tint(), ObstacleTint::Red);
    }

    #[test]
    fn test_short_viewport_centers_gap() {
        let mut spawner = spawner();
        let short = Viewport::new(400.0, 100.0);
        let obstacle = spawner.spawn(short, AVATAR_HEIGHT);
        assert_eq!(obstacle.gap_center, 50.0);
    }
}
