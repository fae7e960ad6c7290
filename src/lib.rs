//! Otter Curve browser front-end: a styled, constrained map that serves as
//! the playing surface for a geographic pattern-matching game.

pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;

pub use error::{DeferredMapError, MapError};
pub use map::MapLifecycleManager;
