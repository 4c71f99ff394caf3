//! AND combinator - both validators must pass

use crate::foundation::{Validate, ValidationError};

/// Runs `left`, then `right`; the first failure wins.
///
/// Ordering matters: put the structural check (e.g. "not blank") on the left
/// so the format check on the right only ever sees well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    /// Creates a new AND combinator.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.left.validate(input)?;
        self.right.validate(input)
    }
}

/// Creates an AND combinator.
pub fn and<L, R>(left: L, right: R) -> And<L, R> {
    And::new(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorKind;
    use std::cell::Cell;

    struct Counting<'a> {
        calls: &'a Cell<usize>,
        pass: bool,
    }

    impl Validate for Counting<'_> {
        type Input = str;

        fn validate(&self, _input: &str) -> Result<(), ValidationError> {
            self.calls.set(self.calls.get() + 1);
            if self.pass {
                Ok(())
            } else {
                Err(ValidationError::new(ErrorKind::FormatViolation, "counting", "failed"))
            }
        }
    }

    #[test]
    fn test_and_both_pass() {
        let calls = Cell::new(0);
        let validator = and(
            Counting { calls: &calls, pass: true },
            Counting { calls: &calls, pass: true },
        );
        assert!(validator.validate("x").is_ok());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Cell::new(0);
        let validator = and(
            Counting { calls: &calls, pass: false },
            Counting { calls: &calls, pass: true },
        );
        assert!(validator.validate("x").is_err());
        assert_eq!(calls.get(), 1);
    }
}
