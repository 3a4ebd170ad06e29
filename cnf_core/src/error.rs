use thiserror::Error;

/// The response could not be obtained, or came back with a status other
/// than 200.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unable to retrieve the fact: invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unable to retrieve the fact: {0}")]
    Transport(String),

    #[error("Unable to retrieve the fact (HTTP {status})")]
    Status { status: u16 },
}

/// The response body did not yield a usable fact.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unable to compile the fact pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unable to parse the fact pattern: {0}")]
    Syntax(#[from] regex_syntax::Error),

    #[error("Unable to retrieve the fact from the response: {excerpt}")]
    NoMatch { excerpt: String },

    #[error("The fact pattern has no capture group 1")]
    MissingGroup,

    #[error("The fact pattern matched but captured an empty fact")]
    EmptyCapture,
}

/// Everything that sends a build step to the fallback fact.
#[derive(Debug, Error)]
pub enum FactError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
