//! Tiered problem generation
//!
//! Answers are always non-negative integers by construction, and the
//! generator avoids handing out the same operator twice in a row whenever
//! the tier offers an alternative.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::problem::{MathProblem, Operator};
use super::tier::{DIVISOR_RANGE, DifficultyTier, QUOTIENT_RANGE, SINGLE_DIGIT_FACTORS};

/// Lowest first operand of a subtraction, so results aren't trivial
const SUBTRACTION_MIN_MINUEND: u32 = 10;
/// Attempts at drawing something other than the previous problem
const MAX_REDRAWS: usize = 8;

#[derive(Clone)]
pub struct ProblemGenerator<R: Rng = Pcg32> {
    rng: R,
    last_operator: Option<Operator>,
    last_problem: Option<MathProblem>,
}

impl ProblemGenerator<Pcg32> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            last_operator: None,
            last_problem: None,
        }
    }

    pub fn generate(&mut self, tier: DifficultyTier) -> MathProblem {
        let operator = self.select_operator(tier.operators());
        self.last_operator = Some(operator);

        let mut problem = self.build(operator, tier);
        // Only single-operator tiers can land on the exact same problem again
        for _ in 0..MAX_REDRAWS {
            if Some(problem) != self.last_problem {
                break;
            }
            problem = self.build(operator, tier);
        }
        self.last_problem = Some(problem);

        log::debug!("{:?} problem: {}", tier, problem.short_display());
        problem
    }

    pub fn generate_for_score(&mut self, score: u32) -> MathProblem {
        self.generate(DifficultyTier::for_score(score))
    }

    /// Forget the previous draw (new run)
    pub fn reset(&mut self) {
        self.last_operator = None;
        self.last_problem = None;
    }

    pub fn last_operator(&self) -> Option<Operator> {
        self.last_operator
    }

    fn build(&mut self, operator: Operator, tier: DifficultyTier) -> MathProblem {
        match operator {
            Operator::Add => self.addition(tier),
            Operator::Subtract => self.subtraction(tier),
            Operator::Multiply => self.multiplication(tier),
            Operator::Divide => self.division(),
        }
    }

    fn select_operator(&mut self, available: &[Operator]) -> Operator {
        if let [only] = available {
            return *only;
        }

        let candidates: Vec<Operator> = available
            .iter()
            .copied()
            .filter(|op| Some(*op) != self.last_operator)
            .collect();
        let pool = if candidates.is_empty() {
            available
        } else {
            &candidates[..]
        };

        // Tier operator sets are never empty
        pool[self.rng.random_range(0..pool.len())]
    }

    fn addition(&mut self, tier: DifficultyTier) -> MathProblem {
        let max = tier.max_operand();
        let a = self.rng.random_range(1..=max);
        let b = self.rng.random_range(1..=max);
        MathProblem::addition(a, b)
    }

    fn subtraction(&mut self, tier: DifficultyTier) -> MathProblem {
        // Floor of 2 keeps `1..a` non-empty even for a degenerate digit cap
        let max = tier.max_operand().max(2);
        let low = SUBTRACTION_MIN_MINUEND.min(max);
        let a = self.rng.random_range(low..=max);
        let b = self.rng.random_range(1..a);
        MathProblem::subtraction(a, b)
    }

    fn multiplication(&mut self, tier: DifficultyTier) -> MathProblem {
        let (first, second) = tier
            .multiplication_ranges()
            .unwrap_or((SINGLE_DIGIT_FACTORS, SINGLE_DIGIT_FACTORS));
        let a = self.rng.random_range(first);
        let b = self.rng.random_range(second);
        MathProblem::multiplication(a, b)
    }

    fn division(&mut self) -> MathProblem {
        let divisor = self.rng.random_range(DIVISOR_RANGE);
        let quotient = self.rng.random_range(QUOTIENT_RANGE);
        MathProblem::division(quotient, divisor)
    }
}
