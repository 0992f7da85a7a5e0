//! Run orchestration
//!
//! The engine owns one run: it advances physics, drives the obstacle field,
//! detects hits, awards points, and accepts answers. All mutations happen
//! through `&mut self`, so a driver calls one operation at a time and
//! observes the result through [`Snapshot`]s.

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{check_collision, count_newly_passed, mark_passed};
use super::physics::PhysicsIntegrator;
use super::spawner::ObstacleSpawner;
use super::state::{Avatar, RngState, RunState, SimulationState, Snapshot, Viewport};
use crate::error::{Error, Result};
use crate::math::{DifficultyTier, MathProblem, ProblemGenerator};
use crate::tuning::Tuning;

#[derive(Clone)]
pub struct SimulationEngine<R: Rng = Pcg32> {
    tuning: Tuning,
    /// `None` until the driver supplies usable geometry
    viewport: Option<Viewport>,
    physics: PhysicsIntegrator,
    spawner: ObstacleSpawner<R>,
    generator: ProblemGenerator<R>,
    state: SimulationState,
}

impl SimulationEngine<Pcg32> {
    /// Engine with default tuning; the seed fixes every random draw of the run
    pub fn new(seed: u64) -> Self {
        let rng = RngState::new(seed);
        Self::build(Tuning::default(), rng.spawner_rng(), rng.generator_rng())
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self> {
        let rng = RngState::new(seed);
        Self::with_sources(tuning, rng.spawner_rng(), rng.generator_rng())
    }

    /// Engine seeded from the thread RNG, for drivers that don't care about replay
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Engine over caller-supplied randomness (one source per consumer)
    pub fn with_sources(tuning: Tuning, spawner_rng: R, generator_rng: R) -> Result<Self> {
        tuning.validate()?;
        Ok(Self::build(tuning, spawner_rng, generator_rng))
    }

    fn build(tuning: Tuning, spawner_rng: R, generator_rng: R) -> Self {
        let mut engine = Self {
            tuning,
            viewport: None,
            physics: PhysicsIntegrator::new(&tuning),
            spawner: ObstacleSpawner::new(spawner_rng, &tuning),
            generator: ProblemGenerator::new(generator_rng),
            state: SimulationState {
                avatar: Avatar::fallback(),
                obstacles: Vec::new(),
                score: 0,
                // Replaced by the first draw in `reset`
                problem: MathProblem::addition(1, 1),
                scroll_speed: tuning.initial_scroll_speed,
                run_state: RunState::Ready,
            },
        };
        engine.reset();
        engine
    }

    /// Record the play-area size and reset. Non-positive (or non-finite)
    /// dimensions leave the geometry unset, and placement falls back to
    /// fixed defaults.
    pub fn initialize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if viewport.is_valid() {
            log::info!("Play area set to {}x{}", width, height);
            self.viewport = Some(viewport);
        } else {
            log::warn!("Rejected play area {}x{}, using fallback placement", width, height);
            self.viewport = None;
        }
        self.reset();
    }

    /// Ready -> Running; ignored from any other state
    pub fn start(&mut self) {
        if self.state.run_state == RunState::Ready {
            self.state.run_state = RunState::Running;
            log::info!("Run started");
        }
    }

    /// Back to a fresh Ready run from any state
    pub fn reset(&mut self) {
        self.state.avatar = match self.viewport {
            Some(viewport) => Avatar::at_start(viewport, &self.tuning),
            None => Avatar::fallback(),
        };
        self.spawner.reset();
        self.generator.reset();
        self.state.obstacles = self.spawner.initial_obstacles(self.effective_viewport());
        self.state.problem = self.generator.generate_for_score(0);
        self.state.score = 0;
        self.state.scroll_speed = self.tuning.initial_scroll_speed;
        self.state.run_state = RunState::Ready;
        log::info!("Run reset");
    }

    /// Advance the run by `dt` seconds. Outside Running this changes
    /// nothing and just reports the current state.
    pub fn step(&mut self, dt: f32) -> Snapshot {
        if self.state.run_state != RunState::Running {
            return self.state.snapshot();
        }

        // Hitches (tab switches, breakpoints) must not teleport the avatar
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.tuning.max_delta_time)
        } else {
            0.0
        };
        let viewport = self.effective_viewport();

        let avatar = self.physics.advance(&self.state.avatar, dt);
        let obstacles = self.spawner.update(
            &self.state.obstacles,
            self.state.scroll_speed,
            dt,
            viewport,
            avatar.height,
        );
        self.state.avatar = avatar;
        self.state.obstacles = obstacles;

        let outcome = check_collision(&self.state.avatar, &self.state.obstacles, viewport.height);
        if outcome.is_hit() {
            self.state.run_state = RunState::Ended;
            log::info!("Run ended ({:?}) with score {}", outcome, self.state.score);
            return self.state.snapshot();
        }

        let passed = count_newly_passed(&self.state.avatar, &self.state.obstacles);
        if passed > 0 {
            let previous_tier = self.tier();
            self.state.obstacles = mark_passed(&self.state.avatar, &self.state.obstacles);
            self.state.score += passed;
            self.state.scroll_speed = (self.state.scroll_speed
                + self.tuning.speed_increment_per_score * passed as f32)
                .min(self.tuning.max_scroll_speed);
            log::debug!(
                "Score {} (+{}), scroll speed {:.1}",
                self.state.score,
                passed,
                self.state.scroll_speed
            );

            let tier = self.tier();
            if tier != previous_tier {
                log::info!("Difficulty {:?} -> {:?}: {}", previous_tier, tier, tier.description());
            }
        }

        self.state.snapshot()
    }

    /// Like [`step`](Self::step), but reports a call outside Running as an error
    pub fn try_step(&mut self, dt: f32) -> Result<Snapshot> {
        self.require_running("step")?;
        Ok(self.step(dt))
    }

    /// Check `input` against the current problem. A correct answer while
    /// Running lifts the avatar and draws the next problem; anything else
    /// returns `false` and leaves the run untouched.
    pub fn submit_answer(&mut self, input: u32) -> bool {
        if self.state.run_state != RunState::Running || !self.state.problem.is_correct(input) {
            return false;
        }
        self.state.avatar = self.physics.impulse(&self.state.avatar);
        self.state.problem = self.generator.generate(self.tier());
        true
    }

    pub fn try_submit_answer(&mut self, input: u32) -> Result<bool> {
        self.require_running("submit an answer")?;
        Ok(self.submit_answer(input))
    }

    pub fn current_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn current_score(&self) -> u32 {
        self.state.score
    }

    pub fn current_problem(&self) -> MathProblem {
        self.state.problem
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::for_score(self.state.score)
    }

    pub fn scroll_speed(&self) -> f32 {
        self.state.scroll_speed
    }

    /// Geometry supplied through [`initialize`](Self::initialize), if any
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn effective_viewport(&self) -> Viewport {
        self.viewport.unwrap_or(Viewport::FALLBACK)
    }

    fn require_running(&self, operation: &'static str) -> Result<()> {
        match self.state.run_state {
            RunState::Running => Ok(()),
            state => Err(Error::InvalidState { operation, state }),
        }
    }
}
