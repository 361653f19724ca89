//! Shared test utilities for the imap-data-access workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample filenames for each naming convention
//! - Temporary archive roots with placeholder files
//! - Assertion helpers for aggregated validation errors
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, temp_archive};
//! ```

pub mod fixtures;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use paths::*;

/// Assert that a list of violation messages contains the given fragments, in order.
///
/// Works with anything exposing `.violations() -> &[String]`, such as a
/// validation error.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_violations;
///
/// let err = ScienceFilePath::new("imap_foo_l1a_x_20240312_v000.cdf").unwrap_err();
/// assert_violations!(err, ["Invalid instrument foo"]);
/// ```
#[macro_export]
macro_rules! assert_violations {
    ($err:expr, [$($fragment:expr),+ $(,)?]) => {{
        let violations: Vec<String> = $err.violations().to_vec();
        let expected: Vec<&str> = vec![$($fragment),+];
        if violations.len() != expected.len() {
            panic!(
                "assertion failed: expected {} violations, got {}:\n{:#?}",
                expected.len(),
                violations.len(),
                violations
            );
        }
        for (actual, fragment) in violations.iter().zip(expected.iter()) {
            if !actual.contains(fragment) {
                panic!(
                    "assertion failed: violation `{}` does not contain `{}`",
                    actual, fragment
                );
            }
        }
    }};
}
