//! Mapbox GL JS, imported from the page's global `mapboxgl` namespace.
//!
//! `index.html` loads the library script; the bindings below cover only the
//! calls the lifecycle manager makes.

use super::engine::{Control, ControlPosition, EngineMap, ErrorHandler, MapEngine, MapOptions};
use crate::error::{DeferredMapError, MapError};
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen(js_namespace = mapboxgl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    type JsMap;

    #[wasm_bindgen(constructor, catch, js_class = "Map")]
    fn new(options: &JsValue) -> Result<JsMap, JsValue>;

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &JsMap, control: &JsValue, position: &str);

    #[wasm_bindgen(method)]
    fn on(this: &JsMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, catch)]
    fn off(this: &JsMap, event: &str, listener: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn loaded(this: &JsMap) -> bool;

    #[wasm_bindgen(method, catch)]
    fn remove(this: &JsMap) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = NavigationControl)]
    type JsNavigationControl;

    #[wasm_bindgen(constructor, js_class = "NavigationControl")]
    fn new() -> JsNavigationControl;

    #[wasm_bindgen(js_name = supported)]
    fn supported() -> bool;
}

/// Class the engine adds to its container during construction.
const ENGINE_CONTAINER_CLASS: &str = "mapboxgl-map";

/// Message from a thrown JS value (usually an `Error`).
fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Converts an engine `error` event (`{ error: { message, status? } }`).
fn deferred_from_event(event: &JsValue) -> DeferredMapError {
    let error =
        js_sys::Reflect::get(event, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
    if error.is_undefined() {
        return DeferredMapError::new("map engine error", None);
    }
    let status = js_sys::Reflect::get(&error, &JsValue::from_str("status"))
        .ok()
        .and_then(|s| s.as_f64())
        .and_then(status_code);
    DeferredMapError::new(describe(&error), status)
}

/// HTTP status from a JS number; anything outside `u16` is dropped.
fn status_code(raw: f64) -> Option<u16> {
    if !raw.is_finite() {
        return None;
    }
    u16::try_from(raw.round() as i64).ok()
}

/// DOM access needed to undo a constructor that failed halfway.
trait MountSurface {
    fn child_count(&self) -> u32;
    fn remove_last_child(&self) -> bool;
    fn remove_class(&self, class: &str);
}

impl MountSurface for HtmlElement {
    fn child_count(&self) -> u32 {
        self.child_element_count()
    }

    fn remove_last_child(&self) -> bool {
        match self.last_element_child() {
            Some(child) => {
                child.remove();
                true
            }
            None => false,
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.class_list().remove_1(class) {
            warn!("could not clear {} from mount point: {}", class, describe(&e));
        }
    }
}

/// Drop whatever the engine appended after `children_before` and its marker class.
fn restore_mount<S: MountSurface>(mount: &S, children_before: u32) {
    while mount.child_count() > children_before {
        if !mount.remove_last_child() {
            break;
        }
    }
    mount.remove_class(ENGINE_CONTAINER_CLASS);
}

fn library_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("mapboxgl")).unwrap_or(false)
}

fn js_options(options: &MapOptions<'_, HtmlElement>) -> Result<JsValue, MapError> {
    let json = serde_json::to_string(options).map_err(|e| MapError::engine(e.to_string()))?;
    let value = js_sys::JSON::parse(&json).map_err(|e| MapError::engine(describe(&e)))?;
    let container: &JsValue = options.container.as_ref();
    js_sys::Reflect::set(&value, &JsValue::from_str("container"), container)
        .map_err(|e| MapError::engine(describe(&e)))?;
    Ok(value)
}

/// Builds maps with the browser's Mapbox GL JS.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapboxEngine;

impl MapEngine for MapboxEngine {
    type Target = HtmlElement;
    type Map = MapboxMap;

    fn is_render_target(&self, target: &HtmlElement) -> bool {
        target.is_connected()
    }

    fn create(&self, options: MapOptions<'_, HtmlElement>) -> Result<MapboxMap, MapError> {
        if !library_loaded() {
            return Err(MapError::engine("mapboxgl is not loaded on this page"));
        }
        if !supported() {
            return Err(MapError::engine("this browser does not support WebGL maps"));
        }
        let js = js_options(&options)?;
        let children_before = options.container.child_count();
        let map = JsMap::new(&js).map_err(|e| {
            restore_mount(options.container, children_before);
            MapError::engine(describe(&e))
        })?;
        Ok(MapboxMap {
            map,
            error_listeners: Vec::new(),
        })
    }
}

/// A live `mapboxgl.Map`. Listener closures live as long as the map.
pub struct MapboxMap {
    map: JsMap,
    error_listeners: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl EngineMap for MapboxMap {
    fn add_control(&mut self, control: Control, position: ControlPosition) {
        let control: JsValue = match control {
            Control::Navigation => JsNavigationControl::new().into(),
        };
        self.map.add_control(&control, position.as_str());
    }

    fn on_error(&mut self, handler: ErrorHandler) {
        let listener = Closure::wrap(Box::new(move |event: JsValue| {
            handler(deferred_from_event(&event));
        }) as Box<dyn FnMut(JsValue)>);
        self.map.on("error", listener.as_ref().unchecked_ref());
        self.error_listeners.push(listener);
    }

    fn loaded(&self) -> bool {
        self.map.loaded()
    }

    fn remove(self) -> Result<(), MapError> {
        // Detach listeners first; a fetch failing during teardown must not
        // reach a dropped closure. A listener that cannot be detached is leaked.
        for listener in self.error_listeners {
            if let Err(e) = self.map.off("error", listener.as_ref().unchecked_ref()) {
                warn!("could not detach map error listener: {}", describe(&e));
                listener.forget();
            }
        }
        self.map
            .remove()
            .map_err(|e| MapError::Teardown(describe(&e)))
    }
}
