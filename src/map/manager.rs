use super::engine::{
    Control, ControlPosition, Credential, EngineMap, ErrorHandler, MapEngine, MapOptions,
};
use super::style::water_emphasis_style;
use super::viewport::ViewportConstraints;
use crate::error::MapError;
use log::{debug, info, warn};

/// Sole owner of one engine map instance.
///
/// The manager is either stopped (no instance) or started (exactly one live
/// instance). `start` refuses to run twice without a `stop` in between, and
/// `stop` is always safe to call. Dropping the manager stops it.
pub struct MapLifecycleManager<E: MapEngine> {
    engine: E,
    mount: E::Target,
    credential: Credential,
    viewport: ViewportConstraints,
    on_error: Option<ErrorHandler>,
    instance: Option<E::Map>,
}

impl<E: MapEngine> MapLifecycleManager<E> {
    /// Validates the mount point and credential. Nothing is rendered yet.
    pub fn new(engine: E, mount: Option<E::Target>, credential: &str) -> Result<Self, MapError> {
        let mount = mount.ok_or_else(|| MapError::configuration("mount point is missing"))?;
        if !engine.is_render_target(&mount) {
            return Err(MapError::configuration("mount point is not attached to the page"));
        }
        let credential = Credential::new(credential)?;
        Ok(Self {
            engine,
            mount,
            credential,
            viewport: ViewportConstraints::game_region(),
            on_error: None,
            instance: None,
        })
    }

    /// Construct and start in one step, the on-attach half of the component lifecycle.
    pub fn attach(
        engine: E,
        mount: Option<E::Target>,
        credential: &str,
        on_error: Option<ErrorHandler>,
    ) -> Result<Self, MapError> {
        let mut manager = Self::new(engine, mount, credential)?;
        if let Some(handler) = on_error {
            manager.on_deferred_error(handler);
        }
        manager.start()?;
        Ok(manager)
    }

    pub fn with_viewport(mut self, viewport: ViewportConstraints) -> Result<Self, MapError> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(self)
    }

    /// Failures the engine reports after `start` returned (e.g. token rejected
    /// by the tile service) go to `handler`. Applies from the next `start`.
    pub fn on_deferred_error(&mut self, handler: ErrorHandler) {
        self.on_error = Some(handler);
    }

    pub fn viewport(&self) -> &ViewportConstraints {
        &self.viewport
    }

    pub fn start(&mut self) -> Result<(), MapError> {
        if self.instance.is_some() {
            warn!("map start requested while already started");
            return Err(MapError::AlreadyStarted);
        }
        let style = water_emphasis_style();
        let options = MapOptions {
            container: &self.mount,
            access_token: self.credential.as_str(),
            style: &style,
            viewport: &self.viewport,
        };
        let mut map = self.engine.create(options).inspect_err(|e| {
            warn!("map engine creation failed: {e}");
        })?;
        map.add_control(Control::Navigation, ControlPosition::TopRight);
        if let Some(handler) = &self.on_error {
            map.on_error(handler.clone());
        }
        self.instance = Some(map);
        info!(
            "map started at ({}, {}) zoom {}",
            self.viewport.center.lng, self.viewport.center.lat, self.viewport.zoom
        );
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(map) = self.instance.take() {
            match map.remove() {
                Ok(()) => info!("map stopped"),
                Err(e) => warn!("map stopped with incomplete teardown: {e}"),
            }
        } else {
            debug!("map stop requested with no live instance");
        }
    }

    pub fn instance(&self) -> Option<&E::Map> {
        self.instance.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.instance.is_some()
    }

    /// Readiness of the live instance; false when stopped.
    pub fn is_loaded(&self) -> bool {
        self.instance.as_ref().is_some_and(|m| m.loaded())
    }
}

impl<E: MapEngine> Drop for MapLifecycleManager<E> {
    fn drop(&mut self) {
        self.stop();
    }
}
