//! Score-indexed difficulty schedule
//!
//! A static table: each tier owns a score range, the operators it allows, an
//! operand digit cap, and its own multiplication ranges (kept narrower than
//! the digit cap to bound mental-math load).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::problem::Operator;

/// Difficulty bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

/// Policy attached to a tier
#[derive(Debug)]
struct TierPolicy {
    tier: DifficultyTier,
    min_score: u32,
    /// Inclusive upper bound; `None` = unbounded
    max_score: Option<u32>,
    operators: &'static [Operator],
    max_digits: u8,
    /// (first factor, second factor); only tiers that multiply have one
    multiplication: Option<(RangeInclusive<u32>, RangeInclusive<u32>)>,
    description: &'static str,
}

static TIER_TABLE: [TierPolicy; 4] = [
    TierPolicy {
        tier: DifficultyTier::Tier1,
        min_score: 0,
        max_score: Some(7),
        operators: &[Operator::Add],
        max_digits: 1,
        multiplication: None,
        description: "Easy Addition (single digits)",
    },
    TierPolicy {
        tier: DifficultyTier::Tier2,
        min_score: 8,
        max_score: Some(15),
        operators: &[Operator::Add, Operator::Subtract],
        max_digits: 2,
        multiplication: None,
        description: "Addition & Subtraction (2 digits)",
    },
    TierPolicy {
        tier: DifficultyTier::Tier3,
        min_score: 16,
        max_score: Some(24),
        operators: &[Operator::Add, Operator::Subtract, Operator::Multiply],
        max_digits: 2,
        multiplication: Some((SINGLE_DIGIT_FACTORS, SINGLE_DIGIT_FACTORS)),
        description: "+ Multiplication (1d × 1d)",
    },
    TierPolicy {
        tier: DifficultyTier::Tier4,
        min_score: 25,
        max_score: None,
        operators: &[
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ],
        max_digits: 3,
        multiplication: Some((10..=99, SINGLE_DIGIT_FACTORS)),
        description: "+ Division, harder problems",
    },
];

/// Factor range for single-digit multiplication
pub const SINGLE_DIGIT_FACTORS: RangeInclusive<u32> = 2..=9;

/// Division draws are tier-independent: divisor and quotient stay small
pub const DIVISOR_RANGE: RangeInclusive<u32> = 2..=9;
pub const QUOTIENT_RANGE: RangeInclusive<u32> = 2..=12;

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Tier1,
        DifficultyTier::Tier2,
        DifficultyTier::Tier3,
        DifficultyTier::Tier4,
    ];

    fn policy(&self) -> &'static TierPolicy {
        match self {
            DifficultyTier::Tier1 => &TIER_TABLE[0],
            DifficultyTier::Tier2 => &TIER_TABLE[1],
            DifficultyTier::Tier3 => &TIER_TABLE[2],
            DifficultyTier::Tier4 => &TIER_TABLE[3],
        }
    }

    /// Tier whose range holds `score`; the last tier catches everything above
    pub fn for_score(score: u32) -> Self {
        TIER_TABLE
            .iter()
            .find(|p| score >= p.min_score && p.max_score.is_none_or(|max| score <= max))
            .map(|p| p.tier)
            .unwrap_or(DifficultyTier::Tier4)
    }

    pub fn min_score(&self) -> u32 {
        self.policy().min_score
    }

    pub fn max_score(&self) -> Option<u32> {
        self.policy().max_score
    }

    pub fn operators(&self) -> &'static [Operator] {
        self.policy().operators
    }

    pub fn max_digits(&self) -> u8 {
        self.policy().max_digits
    }

    /// Largest generic operand for the digit cap (1 → 9, 2 → 99, 3 → 999)
    pub fn max_operand(&self) -> u32 {
        match self.max_digits() {
            1 => 9,
            2 => 99,
            3 => 999,
            _ => 99,
        }
    }

    /// Factor ranges, or `None` for tiers without multiplication
    pub fn multiplication_ranges(&self) -> Option<(RangeInclusive<u32>, RangeInclusive<u32>)> {
        self.policy().multiplication.clone()
    }

    pub fn description(&self) -> &'static str {
        self.policy().description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_score_boundaries() {
        assert_eq!(DifficultyTier::for_score(0), DifficultyTier::Tier1);
        assert_eq!(DifficultyTier::for_score(7), DifficultyTier::Tier1);
        assert_eq!(DifficultyTier::for_score(8), DifficultyTier::Tier2);
        assert_eq!(DifficultyTier::for_score(15), DifficultyTier::Tier2);
        assert_eq!(DifficultyTier::for_score(16), DifficultyTier::Tier3);
        assert_eq!(DifficultyTier::for_score(24), DifficultyTier::Tier3);
        assert_eq!(DifficultyTier::for_score(25), DifficultyTier::Tier4);
        assert_eq!(DifficultyTier::for_score(u32::MAX), DifficultyTier::Tier4);
    }

    #[test]
    fn test_table_is_contiguous() {
        let mut expected_min = 0;
        for tier in DifficultyTier::ALL {
            assert_eq!(tier.min_score(), expected_min);
            match tier.max_score() {
                Some(max) => expected_min = max + 1,
                None => assert_eq!(tier, DifficultyTier::Tier4),
            }
        }
    }

    #[test]
    fn test_operator_sets_grow() {
        assert_eq!(DifficultyTier::Tier1.operators(), &[Operator::Add]);
        for pair in DifficultyTier::ALL.windows(2) {
            assert!(pair[1].operators().len() > pair[0].operators().len());
        }
        assert!(DifficultyTier::Tier4.operators().contains(&Operator::Divide));
    }

    #[test]
    fn test_max_operand() {
        assert_eq!(DifficultyTier::Tier1.max_operand(), 9);
        assert_eq!(DifficultyTier::Tier2.max_operand(), 99);
        assert_eq!(DifficultyTier::Tier4.max_operand(), 999);
    }

    #[test]
    fn test_top_tier_multiplication_is_two_by_one_digit() {
        assert_eq!(
            DifficultyTier::Tier4.multiplication_ranges(),
            Some((10..=99, 2..=9))
        );
    }

    #[test]
    fn test_multiplication_ranges_only_where_allowed() {
        for tier in DifficultyTier::ALL {
            let multiplies = tier.operators().contains(&Operator::Multiply);
            assert_eq!(tier.multiplication_ranges().is_some(), multiplies, "{tier:?}");
        }
    }

    #[test]
    fn test_every_tier_offers_an_operator() {
        for tier in DifficultyTier::ALL {
            assert!(!tier.operators().is_empty());
        }
    }
}
