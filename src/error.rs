//! Error type shared by the controller and its hosts.
//!
//! Host failures never reach the page: the controller logs them and carries
//! on with whatever steps remain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("preference store: {0}")]
    Storage(String),
    #[error("document: {0}")]
    Dom(String),
    #[error("color-scheme query: {0}")]
    MediaQuery(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("{0} is not available in this environment")]
    Unavailable(&'static str),
}
