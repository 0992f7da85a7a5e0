//! Arithmetic problem value types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic operator of a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Evaluate `a op b`, or `None` when the result is not a non-negative
    /// integer (underflow, overflow, inexact or zero division)
    pub fn apply(&self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A two-operand problem with its precomputed answer.
///
/// Only the constructors below build one, so `answer` always equals
/// `operator` applied to the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    operand1: u32,
    operand2: u32,
    operator: Operator,
    answer: u32,
}

impl MathProblem {
    pub fn addition(a: u32, b: u32) -> Self {
        Self {
            operand1: a,
            operand2: b,
            operator: Operator::Add,
            answer: a + b,
        }
    }

    /// Larger operand goes first so the answer is never negative
    pub fn subtraction(a: u32, b: u32) -> Self {
        let (larger, smaller) = if a >= b { (a, b) } else { (b, a) };
        Self {
            operand1: larger,
            operand2: smaller,
            operator: Operator::Subtract,
            answer: larger - smaller,
        }
    }

    pub fn multiplication(a: u32, b: u32) -> Self {
        Self {
            operand1: a,
            operand2: b,
            operator: Operator::Multiply,
            answer: a * b,
        }
    }

    /// Built from the answer side: dividend = quotient × divisor
    pub fn division(quotient: u32, divisor: u32) -> Self {
        Self {
            operand1: quotient * divisor,
            operand2: divisor,
            operator: Operator::Divide,
            answer: quotient,
        }
    }

    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn answer(&self) -> u32 {
        self.answer
    }

    pub fn is_correct(&self, input: u32) -> bool {
        input == self.answer
    }

    /// "24 + 13 = ?"
    pub fn display(&self) -> String {
        format!("{} = ?", self.short_display())
    }

    /// "24 + 13"
    pub fn short_display(&self) -> String {
        format!("{} {} {}", self.operand1, self.operator, self.operand2)
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.operand1, self.operator, self.operand2)
    }
}
