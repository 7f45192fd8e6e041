use thiserror::Error;

/// ConfigError
///
/// Raised by `AppConfig::load` when an environment variable is missing in
/// production or cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// RouteError
///
/// Raised while assembling a `RouteTable`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route pattern {0:?} is already registered")]
    DuplicatePattern(String),
}

/// NavigationError
///
/// Failures of the navigation loop itself. Pre-action failures never show up
/// here; they are logged and dropped (see `ActionError`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("no route matches {0:?}")]
    Unrouted(String),
    #[error("route {pattern:?} needs path parameter {param:?}")]
    MissingParam { pattern: String, param: &'static str },
    #[error("navigation to {path:?} exceeded {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}

/// ActionError
///
/// Failures of an asynchronous pre-action. Only ever observed by the task
/// that ran the action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("page controllers failed to load: {0}")]
    Load(String),
    #[error("page controller failed: {0}")]
    Controller(String),
}

/// DatasetError
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("dataset response is not a JSON array of records: {0}")]
    Decode(#[from] serde_json::Error),
}
