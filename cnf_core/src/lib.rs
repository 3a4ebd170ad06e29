#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Fetch a daily fact over HTTP, pull it out of the response with a regular
//! expression and hand it to the build as an environment variable.
//!
//! Nothing in this crate knows about a particular build host. [`perform`]
//! takes the step settings and the build environment and returns a
//! [`StepOutcome`] holding the variables to publish and the lines to write
//! to the build log; the caller does the merging and printing.

pub mod env;
pub mod error;
pub mod extract;
pub mod publish;
pub mod source;
pub mod step;
pub mod validation;

pub use env::EnvironmentContext;
pub use error::{ExtractError, FactError, FetchError};
pub use extract::extract;
pub use publish::{ExtractedFact, PublishedVariables, fact_log_line, publish};
pub use source::{FactSource, FetchedBody, fetch};
pub use step::{FactRequestConfig, StepOutcome, perform};
pub use validation::{
    FormValidation, check_facts_url, check_regex_pattern, check_var_name, is_valid_var_name,
};

/// Fact used whenever the real one cannot be fetched or extracted.
pub const FALLBACK_FACT: &str = "There is no fact today! Chuck Norris is on Holiday!";

/// Prefix of the build log line carrying the fact.
pub const FACT_LOG_PREFIX: &str = "Chuck Norris Daily Fact: ";

/// Human readable name of the build step.
pub const DISPLAY_NAME: &str = "Retrieve Chuck Norris Fact.";
