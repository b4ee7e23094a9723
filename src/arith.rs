//! Fixed-width integer arithmetic
//!
//! The four operations behind the exported C symbols. Overflow wraps modulo
//! 2^32 for every operation; division truncates toward zero and reports a
//! zero divisor as [`ArithError::DivisionByZero`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("division by zero")]
    DivisionByZero,
}

/// Add two integers, wrapping on overflow.
///
/// # Test Cases
/// - add(2, 3) = 5
/// - add(-7, 7) = 0
/// - add(2147483647, 1) = -2147483648
#[inline]
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// Subtract `b` from `a`, wrapping on overflow.
///
/// # Test Cases
/// - subtract(10, 4) = 6
/// - subtract(4, 10) = -6
/// - subtract(-2147483648, 1) = 2147483647
#[inline]
pub fn subtract(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

/// Multiply two integers, wrapping on overflow.
///
/// # Test Cases
/// - multiply(6, 7) = 42
/// - multiply(0, n) = 0
/// - multiply(65536, 65536) = 0
#[inline]
pub fn multiply(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

/// Divide `a` by `b`, truncating toward zero.
///
/// `i32::MIN / -1` wraps to `i32::MIN` like the other operations.
///
/// # Test Cases
/// - divide(10, 3) = 3
/// - divide(-10, 3) = -3
/// - divide(a, 0) = DivisionByZero
pub fn divide(a: i32, b: i32) -> Result<i32, ArithError> {
    if b == 0 {
        tracing::trace!(a, "rejected division by zero");
        return Err(ArithError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

/// One of the four exported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations in export order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Evaluate the operation through the safe API.
    pub fn apply(self, a: i32, b: i32) -> Result<i32, ArithError> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }

    /// Name of the exported C symbol.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}' (expected add, sub, mul, div or + - * /)")]
pub struct ParseOperationError(pub String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "plus" | "+" => Ok(Operation::Add),
            "sub" | "subtract" | "minus" | "-" => Ok(Operation::Subtract),
            "mul" | "multiply" | "times" | "*" | "x" => Ok(Operation::Multiply),
            "div" | "divide" | "/" => Ok(Operation::Divide),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}
