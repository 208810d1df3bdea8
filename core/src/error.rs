//! Error types for the showcase engine.
//!
//! # Design
//! Request and navigation failures (`ValidationError`, `NotFoundError`,
//! `ParseError`, `NavigationError`, `ViewError`) are recovered by `Session`
//! and turned into an `ApiResponse` or a `Notice`. Only `ConfigError` is
//! expected to escape, and only while a session is being built.

use std::path::PathBuf;

use thiserror::Error;

use crate::router::{Section, Tab};

/// Result type alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A create or rename input that does not describe a valid user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("no user ids left to assign")]
    IdsExhausted,
}

/// No user record carries the requested id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("user {id} not found")]
pub struct NotFoundError {
    pub id: u64,
}

/// A request body that is not the expected JSON document.
#[derive(Debug, Error)]
#[error("malformed request body: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);

/// A method string outside GET, POST, PUT, PATCH and DELETE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported method: {0}")]
pub struct UnknownMethod(pub String);

/// A navigation target the router does not know, or cannot reach from
/// the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("unknown tab: {0}")]
    UnknownTab(String),

    #[error("tab '{tab}' is only available in the demo section (active: {active})")]
    TabOutsideDemo { tab: Tab, active: Section },
}

/// Failures reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("view container not found: {0}")]
    MissingContainer(String),
}

/// Startup configuration and static data loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse {what}: {source}")]
    Data {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Crate-level error wrapping every failure kind.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Method(#[from] UnknownMethod),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether a session can keep running after this error.
    ///
    /// Everything except configuration problems is local to one event.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Config(_))
    }
}
