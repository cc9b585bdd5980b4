//! Outcome values with an undefined bottom element

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::game::StepOutcome;

/// Believed outcome of a move for the player who makes it.
///
/// The order is `Win > Draw > Lose > Undefined`. `Undefined` is the identity
/// of [`Ord::max`], so folding a set of values starting from it yields the
/// best defined value, or `Undefined` if there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Value {
    #[default]
    Undefined,
    Win,
    Draw,
    Lose,
}

impl Value {
    /// Numeric rank of a defined value: win 1, draw 0, lose -1.
    pub fn rank(self) -> Option<i8> {
        match self {
            Value::Win => Some(1),
            Value::Draw => Some(0),
            Value::Lose => Some(-1),
            Value::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        self != Value::Undefined
    }

    /// The same result seen from the other player's side.
    pub fn negate(self) -> Value {
        match self {
            Value::Win => Value::Lose,
            Value::Lose => Value::Win,
            other => other,
        }
    }

    /// Value fixed by an immediate outcome; continuing moves stay undefined.
    pub fn from_outcome(outcome: StepOutcome) -> Value {
        match outcome {
            StepOutcome::Win => Value::Win,
            StepOutcome::Draw => Value::Draw,
            StepOutcome::WaitingNextAction => Value::Undefined,
        }
    }

    fn order_key(self) -> i8 {
        self.rank().unwrap_or(i8::MIN)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Value::Undefined => "UNDEFINED",
            Value::Win => "WIN",
            Value::Draw => "DRAW",
            Value::Lose => "LOSE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Value; 4] = [Value::Undefined, Value::Lose, Value::Draw, Value::Win];

    #[test]
    fn test_total_order() {
        assert!(Value::Win > Value::Draw);
        assert!(Value::Draw > Value::Lose);
        assert!(Value::Lose > Value::Undefined);

        let mut shuffled = vec![Value::Draw, Value::Undefined, Value::Win, Value::Lose];
        shuffled.sort();
        assert_eq!(shuffled, ALL.to_vec());
    }

    #[test]
    fn test_undefined_is_max_identity() {
        for value in ALL {
            assert_eq!(Value::Undefined.max(value), value);
            assert_eq!(value.max(Value::Undefined), value);
        }
    }

    #[test]
    fn test_undefined_never_equals_defined() {
        for value in [Value::Lose, Value::Draw, Value::Win] {
            assert_ne!(Value::Undefined, value);
            assert_ne!(Value::Undefined.cmp(&value), Ordering::Equal);
        }
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Win.negate(), Value::Lose);
        assert_eq!(Value::Lose.negate(), Value::Win);
        assert_eq!(Value::Draw.negate(), Value::Draw);
        assert_eq!(Value::Undefined.negate(), Value::Undefined);
    }

    #[test]
    fn test_from_outcome_and_rank() {
        assert_eq!(Value::from_outcome(StepOutcome::Win), Value::Win);
        assert_eq!(Value::from_outcome(StepOutcome::Draw), Value::Draw);
        assert_eq!(
            Value::from_outcome(StepOutcome::WaitingNextAction),
            Value::Undefined
        );
        assert_eq!(Value::Lose.rank(), Some(-1));
        assert_eq!(Value::Undefined.rank(), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Value::Win.to_string(), "WIN");
        assert_eq!(serde_json::to_string(&Value::Draw).unwrap(), "\"DRAW\"");
        let parsed: Value = serde_json::from_str("\"LOSE\"").unwrap();
        assert_eq!(parsed, Value::Lose);
    }
}
