//! String validators
//!
//! Presence, path-shape, pattern and closed-set checks over `str`. Errors
//! carry no field path; the rule that applies the validator roots them.

use crate::foundation::ValidationError;
use regex::Regex;

// ============================================================================
// PRESENCE
// ============================================================================

crate::validator! {
    /// Validates that a string has at least one non-whitespace character.
    pub NotBlank for str;
    rule(input) { !input.trim().is_empty() }
    error(input) { ValidationError::empty() }
    fn not_blank();
}

// ============================================================================
// PATHS
// ============================================================================

crate::validator! {
    /// Validates that a string is an absolute filesystem path (starts with `/`).
    ///
    /// Only the shape of the string is checked; whether the path exists on
    /// the target host is not this validator's concern.
    pub AbsolutePath for str;
    rule(input) { input.starts_with('/') }
    error(input) {
        ValidationError::invalid_format(input, "an absolute path starting with '/'")
            .with_help("paths are resolved on the target host, relative paths are ambiguous")
    }
    fn absolute_path();
}

// ============================================================================
// PATTERN
// ============================================================================

crate::validator! {
    /// Validates that the whole string matches a regular expression.
    ///
    /// `expected` is the operator-facing description of the contract.
    pub MatchesPattern { pattern: Regex, expected: &'static str } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) {
        ValidationError::invalid_format(input, self.expected)
            .with_param("pattern", self.pattern.as_str().to_owned())
    }
    fn matches_pattern(pattern: Regex, expected: &'static str);
}

// ============================================================================
// CLOSED SET
// ============================================================================

crate::validator! {
    /// Validates that a string is one of a closed set of options (case-sensitive).
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub OneOf { allowed: &'static [&'static str] } for str;
    rule(self, input) { self.allowed.contains(&input) }
    error(self, input) { ValidationError::not_one_of(input, self.allowed) }
    fn one_of(allowed: &'static [&'static str]);
}

crate::validator! {
    /// Validates that a string contains no whitespace.
    pub NoWhitespace for str;
    rule(input) { !input.chars().any(char::is_whitespace) }
    error(input) { ValidationError::invalid_format(input, "a value without whitespace") }
    fn no_whitespace();
}
