//! Sum Glider headless demo
//!
//! Plays one run with an autopilot that answers on the avatar's behalf,
//! then reports the final score.
//!
//! Usage: `sum-glider [SEED] [--tuning PATH]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::{HashSet, VecDeque};
    use std::error::Error;

    use sum_glider::sim::{Avatar, PhysicsIntegrator, RunState, SimulationEngine, Snapshot, Viewport};
    use sum_glider::{Tuning, game_area_height};

    /// Fixed simulation step (seconds)
    pub const STEP: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_STEPS: u32 = 60 * 120;
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;

    /// Steps between autopilot decisions
    const DECISION_STEPS: u32 = 3;
    /// A plan is complete once it survives this many steps
    const PLAN_HORIZON: u32 = 300;
    /// Replan when no more than this many planned steps remain
    const REPLAN_STEPS: u32 = 150;
    /// Search nodes per plan
    const SEARCH_BUDGET: usize = 200_000;
    /// Quantization for merging near-identical search states
    const Y_BUCKET: f32 = 4.0;
    const VELOCITY_BUCKET: f32 = 10.0;

    struct Args {
        seed: Option<u64>,
        tuning_path: Option<String>,
    }

    fn parse_args() -> Result<Args, Box<dyn Error>> {
        let mut args = Args {
            seed: None,
            tuning_path: None,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            if arg == "--tuning" {
                args.tuning_path = Some(iter.next().ok_or("--tuning needs a path")?);
            } else {
                args.seed = Some(arg.parse()?);
            }
        }
        Ok(args)
    }

    /// Height worth hovering around: the next unpassed gap, or mid-area
    fn target_height(snapshot: &Snapshot, area_height: f32) -> f32 {
        let avatar = &snapshot.avatar;
        snapshot
            .obstacles
            .iter()
            .find(|o| o.right_edge() > avatar.x - avatar.width / 2.0)
            .map(|o| o.gap_center)
            .unwrap_or(area_height / 2.0)
    }

    /// Answers on a plan found by searching the engine's own future.
    ///
    /// Engines are deterministic, so a cloned engine replays exactly what the
    /// real one will do. Every `DECISION_STEPS` the plan says whether to
    /// answer before stepping.
    pub struct Autopilot {
        apex_height: f32,
        area_height: f32,
        plan: VecDeque<bool>,
    }

    impl Autopilot {
        pub fn new(engine: &SimulationEngine) -> Self {
            Self {
                apex_height: PhysicsIntegrator::new(engine.tuning()).impulse_apex_height(),
                area_height: engine.viewport().unwrap_or(Viewport::FALLBACK).height,
                plan: VecDeque::new(),
            }
        }

        /// Whether to answer before step number `step`
        pub fn decide(&mut self, engine: &SimulationEngine, step: u32) -> bool {
            if step % DECISION_STEPS != 0 {
                return false;
            }
            if self.plan.len() as u32 * DECISION_STEPS <= REPLAN_STEPS {
                let planner = Planner {
                    apex_height: self.apex_height,
                    area_height: self.area_height,
                    visited: HashSet::new(),
                    nodes: 0,
                    path: Vec::new(),
                    best: Vec::new(),
                };
                self.plan = planner.search(engine);
            }
            self.plan.pop_front().unwrap_or(false)
        }
    }

    /// Depth-first search over answer/wait decisions, keeping the longest
    /// surviving sequence when no sequence reaches the horizon
    struct Planner {
        apex_height: f32,
        area_height: f32,
        visited: HashSet<(u32, i32, i32)>,
        nodes: usize,
        path: Vec<bool>,
        best: Vec<bool>,
    }

    impl Planner {
        fn search(mut self, engine: &SimulationEngine) -> VecDeque<bool> {
            self.explore(engine, 0);
            log::debug!(
                "Planned {} decisions ({} nodes)",
                self.best.len(),
                self.nodes
            );
            self.best.into()
        }

        fn explore(&mut self, engine: &SimulationEngine, depth: u32) -> bool {
            if self.path.len() > self.best.len() {
                self.best = self.path.clone();
            }
            if depth * DECISION_STEPS >= PLAN_HORIZON {
                return true;
            }
            if self.nodes >= SEARCH_BUDGET {
                return false;
            }
            self.nodes += 1;

            let snapshot = engine.snapshot();
            let avatar = snapshot.avatar;
            let key = (
                depth,
                (avatar.y / Y_BUCKET).round() as i32,
                (avatar.velocity / VELOCITY_BUCKET).round() as i32,
            );
            if !self.visited.insert(key) {
                return false;
            }

            // Try answering first when a climb from here would center on the target
            let options = if avatar.y - self.apex_height / 2.0 > target_height(&snapshot, self.area_height) {
                [true, false]
            } else {
                [false, true]
            };
            for answer in options {
                if answer && !self.climb_clears_ceiling(&avatar) {
                    continue;
                }
                let mut next = engine.clone();
                if answer {
                    next.submit_answer(next.current_problem().answer());
                }
                if survives_decision(&mut next) {
                    self.path.push(answer);
                    if self.explore(&next, depth + 1) {
                        return true;
                    }
                    self.path.pop();
                }
            }
            false
        }

        /// A full climb from here keeps the avatar's top below the ceiling
        fn climb_clears_ceiling(&self, avatar: &Avatar) -> bool {
            avatar.y - avatar.height / 2.0 - self.apex_height > 0.0
        }
    }

    fn survives_decision(engine: &mut SimulationEngine) -> bool {
        (0..DECISION_STEPS).all(|_| engine.step(STEP).run_state == RunState::Running)
    }

    pub struct RunSummary {
        pub steps: u32,
        pub answers: u32,
        pub score: u32,
    }

    /// Drive a started engine at the fixed step until the run ends or
    /// `max_steps` elapse
    pub fn play(engine: &mut SimulationEngine, max_steps: u32) -> RunSummary {
        let mut autopilot = Autopilot::new(engine);
        let mut summary = RunSummary {
            steps: 0,
            answers: 0,
            score: 0,
        };
        while engine.current_state() == RunState::Running && summary.steps < max_steps {
            if autopilot.decide(engine, summary.steps) {
                let problem = engine.current_problem();
                log::debug!("Autopilot answers {}", problem.display());
                if engine.submit_answer(problem.answer()) {
                    summary.answers += 1;
                }
            }
            engine.step(STEP);
            summary.steps += 1;
        }
        summary.score = engine.current_score();
        summary
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        let args = parse_args()?;

        let tuning = match &args.tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Sum Glider (headless) starting with seed {}", seed);

        let mut engine = SimulationEngine::with_tuning(tuning, seed)?;
        engine.initialize(SCREEN_WIDTH, game_area_height(SCREEN_HEIGHT));
        engine.start();

        let summary = play(&mut engine, MAX_STEPS);
        log::info!(
            "Run over after {:.1}s: score {}, {} answers, {:?}",
            summary.steps as f32 * STEP,
            summary.score,
            summary.answers,
            engine.tier()
        );
        println!("seed {} score {}", seed, summary.score);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use sum_glider::sim::{CollisionOutcome, check_collision};

        fn started(seed: u64) -> SimulationEngine {
            let mut engine = SimulationEngine::new(seed);
            engine.initialize(SCREEN_WIDTH, game_area_height(SCREEN_HEIGHT));
            engine.start();
            engine
        }

        #[test]
        fn test_autopilot_scores() {
            for seed in [1, 2, 3, 42, 1234] {
                let mut engine = started(seed);
                let summary = play(&mut engine, 600);
                assert!(summary.score > 0, "seed {seed} scored nothing");
                assert!(summary.answers > 0);
            }
        }

        #[test]
        fn test_autopilot_never_climbs_into_ceiling() {
            for seed in [1, 42] {
                let mut engine = started(seed);
                play(&mut engine, 600);
                let snapshot = engine.snapshot();
                let outcome = check_collision(&snapshot.avatar, &snapshot.obstacles, 600.0);
                assert_ne!(outcome, CollisionOutcome::Ceiling);
                assert!(snapshot.avatar.bounds().top() > 0.0);
            }
        }

        #[test]
        fn test_decides_only_on_decision_steps() {
            let engine = started(7);
            let mut autopilot = Autopilot::new(&engine);
            assert!(!autopilot.decide(&engine, 1));
            assert!(!autopilot.decide(&engine, 2));
        }

        #[test]
        fn test_replays_identically() {
            let mut a = started(99);
            let mut b = started(99);
            let first = play(&mut a, 300);
            let second = play(&mut b, 300);
            assert_eq!(first.steps, second.steps);
            assert_eq!(first.answers, second.answers);
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo on the web; embed the library instead
}
