//! Macros for creating validators with minimal boilerplate.
//!
//! [`validator!`] generates the struct, its `Validate` implementation, an
//! optional constructor and an optional factory function from a rule
//! expression and an error expression.
//!
//! ```rust
//! use preflight_validator::validator;
//! use preflight_validator::foundation::{Validate, ValidationError};
//!
//! validator! {
//!     /// Rejects strings containing whitespace.
//!     pub NoWhitespace for str;
//!     rule(input) { !input.chars().any(char::is_whitespace) }
//!     error(input) { ValidationError::invalid_format(input, "text without whitespace") }
//!     fn no_whitespace();
//! }
//!
//! assert!(no_whitespace().validate("rw,sync").is_ok());
//! assert!(no_whitespace().validate("rw, sync").is_err());
//! ```

/// Creates a complete validator: struct definition, `Validate` implementation,
/// constructor, and factory function.
///
/// Struct validators derive `Debug` and `Clone`; unit validators also derive
/// `Copy`, `PartialEq`, `Eq`, `Hash` and `Default`.
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```rust,ignore
/// validator! {
///     pub NotBlank for str;
///     rule(input) { !input.trim().is_empty() }
///     error(input) { ValidationError::empty() }
///     fn not_blank();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     pub OneOf { allowed: &'static [&'static str] } for str;
///     rule(self, input) { self.allowed.contains(&input) }
///     error(self, input) { ValidationError::not_one_of(input, self.allowed) }
///     fn one_of(allowed: &'static [&'static str]);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Unit validator (no fields) + factory fn ──────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name for $input;
            rule($inp) $rule
            error($einp) $err
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Unit validator (no fields), no factory ───────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&self, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Struct with fields + auto new + factory fn ───────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Struct with fields + auto new, no factory ────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}
