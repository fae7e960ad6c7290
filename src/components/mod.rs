pub mod app;
pub mod error_overlay;
pub mod map_view;

pub use app::App;
pub use error_overlay::ErrorOverlay;
pub use map_view::{MapView, MapViewProps, use_map_lifecycle};
