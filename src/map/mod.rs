pub mod engine;
pub mod manager;
pub mod mapbox;
pub mod style;
pub mod viewport;

pub use engine::{
    Control, ControlPosition, Credential, EngineMap, ErrorHandler, MapEngine, MapOptions,
};
pub use manager::MapLifecycleManager;
pub use mapbox::{MapboxEngine, MapboxMap};
pub use style::{StyleDocument, water_emphasis_style};
pub use viewport::{LngLat, LngLatBounds, ViewportConstraints};
