use std::fmt;

use thiserror::Error;

/// High-level error type shared across portal components.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("unexpected status {status} for {resource}")]
    Status { resource: String, status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for PortalError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<handlebars::RenderError> for PortalError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl PortalError {
    pub fn context<T: fmt::Display>(self, ctx: T) -> Self {
        match self {
            PortalError::Fetch(msg) => PortalError::Fetch(format!("{ctx}: {msg}")),
            PortalError::Status { resource, status } => PortalError::Status {
                resource: format!("{ctx}: {resource}"),
                status,
            },
            PortalError::Parse(msg) => PortalError::Parse(format!("{ctx}: {msg}")),
            PortalError::Config(msg) => PortalError::Config(format!("{ctx}: {msg}")),
            PortalError::Template(msg) => PortalError::Template(format!("{ctx}: {msg}")),
            PortalError::Io(err) => PortalError::Io(err),
        }
    }
}
