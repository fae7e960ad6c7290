//! Error types raised by the map front-end.

/// Failures reported synchronously by [`crate::map::MapLifecycleManager`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Missing or invalid mount point, credential or viewport.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// `start` was called while a map instance is already live.
    #[error("map is already started")]
    AlreadyStarted,

    /// The engine could not create a map (e.g. no WebGL context).
    #[error("map engine failed to initialize: {0}")]
    EngineInitialization(String),

    /// The engine failed while releasing a map. Logged by `stop`, never raised.
    #[error("map teardown failed: {0}")]
    Teardown(String),
}

impl MapError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::EngineInitialization(msg.into())
    }
}

/// A failure the engine reports after `start` already returned, such as the
/// remote service rejecting the access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredMapError {
    pub message: String,
    /// HTTP status of the failed request, when the engine reports one.
    pub status: Option<u16>,
}

impl DeferredMapError {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl std::fmt::Display for DeferredMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => f.write_str(&self.message),
        }
    }
}
