//! Built-in validators
//!
//! Value-level checks the rule catalogue is assembled from.
//!
//! # Categories
//!
//! - **String**: presence, absolute paths, whitespace, patterns, closed sets
//! - **Network**: RFC 1123 hostnames
//! - **Collection**: non-empty sequences
//!
//! # Examples
//!
//! ```rust
//! use preflight_validator::prelude::*;
//!
//! let keytab = not_blank().and(absolute_path());
//! assert!(keytab.validate("/etc/krb5.keytab").is_ok());
//!
//! let security = one_of(&["user", "ads", "domain"]);
//! assert!(security.validate("share").is_err());
//! ```

pub mod collection;
pub mod hostname;
pub mod string;

pub use collection::{NonEmpty, non_empty};
pub use hostname::{Hostname, hostname};
pub use string::{
    AbsolutePath, MatchesPattern, NoWhitespace, NotBlank, OneOf, absolute_path, matches_pattern,
    no_whitespace, not_blank, one_of,
};
