// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Relational predicates over temperatures.

use std::{fmt::Display, str::FromStr};

use crate::Error;

/// A comparison between two temperatures.
///
/// `Always` and `Never` ignore their operands.  All other variants compare
/// the operands literally, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureCondition {
    Greater,
    GreaterOrEqual,
    Equal,
    Less,
    LessOrEqual,
    NotEqual,
    Always,
    Never,
}

impl TemperatureCondition {
    /// Returns `true` if `lhs` and `rhs` satisfy the condition.
    pub fn check(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            TemperatureCondition::Greater => lhs > rhs,
            TemperatureCondition::GreaterOrEqual => lhs >= rhs,
            TemperatureCondition::Equal => lhs == rhs,
            TemperatureCondition::Less => lhs < rhs,
            TemperatureCondition::LessOrEqual => lhs <= rhs,
            TemperatureCondition::NotEqual => lhs != rhs,
            TemperatureCondition::Always => true,
            TemperatureCondition::Never => false,
        }
    }
}

impl FromStr for TemperatureCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(TemperatureCondition::Greater),
            ">=" => Ok(TemperatureCondition::GreaterOrEqual),
            "=" => Ok(TemperatureCondition::Equal),
            "<" => Ok(TemperatureCondition::Less),
            "<=" => Ok(TemperatureCondition::LessOrEqual),
            "!=" => Ok(TemperatureCondition::NotEqual),
            "true" => Ok(TemperatureCondition::Always),
            "false" => Ok(TemperatureCondition::Never),
            other => Err(Error::unsupported_condition(format!(
                "Unsupported temperature condition: {other:?}"
            ))),
        }
    }
}

impl Display for TemperatureCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            TemperatureCondition::Greater => ">",
            TemperatureCondition::GreaterOrEqual => ">=",
            TemperatureCondition::Equal => "=",
            TemperatureCondition::Less => "<",
            TemperatureCondition::LessOrEqual => "<=",
            TemperatureCondition::NotEqual => "!=",
            TemperatureCondition::Always => "true",
            TemperatureCondition::Never => "false",
        };
        write!(f, "{op}")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn always_and_never_ignore_operands(lhs in -300.0_f64..1000.0, rhs in -300.0_f64..1000.0) {
            prop_assert!(TemperatureCondition::Always.check(lhs, rhs));
            prop_assert!(!TemperatureCondition::Never.check(lhs, rhs));
        }

        #[test]
        fn strict_and_negated_are_complementary(lhs in -300.0_f64..1000.0, rhs in -300.0_f64..1000.0) {
            prop_assert_eq!(
                TemperatureCondition::Greater.check(lhs, rhs),
                !TemperatureCondition::LessOrEqual.check(lhs, rhs)
            );
            prop_assert_eq!(
                TemperatureCondition::Equal.check(lhs, rhs),
                !TemperatureCondition::NotEqual.check(lhs, rhs)
            );
        }
    }
}
