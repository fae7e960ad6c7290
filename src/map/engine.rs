//! The seam between the lifecycle manager and whatever actually draws the map.

use super::style::StyleDocument;
use super::viewport::ViewportConstraints;
use crate::error::{DeferredMapError, MapError};
use serde::Serialize;
use std::rc::Rc;

/// Callback for failures the engine reports after construction.
pub type ErrorHandler = Rc<dyn Fn(DeferredMapError)>;

/// Non-empty access token for the engine's tile and style service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: &str) -> Result<Self, MapError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MapError::configuration("access token is empty"));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Zoom in/out buttons plus compass.
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "top-left",
            ControlPosition::TopRight => "top-right",
            ControlPosition::BottomLeft => "bottom-left",
            ControlPosition::BottomRight => "bottom-right",
        }
    }
}

/// Everything the engine needs to build one map. The container is passed
/// alongside the serializable part since it is a live DOM handle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions<'a, T> {
    #[serde(skip)]
    pub container: &'a T,
    pub access_token: &'a str,
    pub style: &'a StyleDocument,
    #[serde(flatten)]
    pub viewport: &'a ViewportConstraints,
}

/// Constructs map instances bound to a render target.
pub trait MapEngine {
    /// Render target the map is drawn into.
    type Target;
    type Map: EngineMap;

    /// Whether the target can currently host a map (e.g. is attached to the page).
    fn is_render_target(&self, target: &Self::Target) -> bool;

    fn create(&self, options: MapOptions<'_, Self::Target>) -> Result<Self::Map, MapError>;
}

/// A live map instance.
pub trait EngineMap {
    fn add_control(&mut self, control: Control, position: ControlPosition);

    /// Route asynchronous engine failures to `handler`.
    fn on_error(&mut self, handler: ErrorHandler);

    /// Style and visible tiles are fully loaded.
    fn loaded(&self) -> bool;

    /// Release engine resources and detach from the container. The instance
    /// is gone either way; an error only reports that cleanup was incomplete.
    fn remove(self) -> Result<(), MapError>;
}
