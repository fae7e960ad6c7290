use crate::error::DeferredMapError;
use crate::map::{ErrorHandler, MapLifecycleManager, MapboxEngine};
use log::{error, warn};
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

/// Full-viewport render target; the engine fills it with its canvas.
const MAP_CONTAINER_STYLE: &str =
    "width:100vw; height:100vh; margin:0; padding:0; box-sizing:border-box;";

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub access_token: AttrValue,
    /// Start failures and fatal later engine errors, as display text.
    pub on_error: Callback<String>,
}

/// Display text for engine errors that leave the map unusable. A rejected
/// token is fatal; a failed tile fetch is not, the map keeps working.
fn fatal_message(err: &DeferredMapError) -> Option<String> {
    err.is_authentication()
        .then(|| format!("The map service rejected the access token: {}", err))
}

/// Ties a map to the lifetime of `container`'s component: attach on mount,
/// stop exactly once on unmount. A new token remounts the map.
#[hook]
pub fn use_map_lifecycle(container: NodeRef, access_token: AttrValue, on_error: Callback<String>) {
    use_effect_with(access_token, move |token| {
        let handler: ErrorHandler = {
            let on_error = on_error.clone();
            Rc::new(move |err: DeferredMapError| match fatal_message(&err) {
                Some(msg) => {
                    error!("map engine error after start: {}", err);
                    on_error.emit(msg);
                }
                None => warn!("map engine error after start: {}", err),
            })
        };
        let manager = match MapLifecycleManager::attach(
            MapboxEngine,
            container.cast::<HtmlElement>(),
            token.as_str(),
            Some(handler),
        ) {
            Ok(manager) => Some(manager),
            Err(e) => {
                error!("map failed to start: {}", e);
                on_error.emit(e.to_string());
                None
            }
        };
        move || {
            if let Some(mut manager) = manager {
                manager.stop();
            }
        }
    });
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let container_ref = use_node_ref();
    use_map_lifecycle(
        container_ref.clone(),
        props.access_token.clone(),
        props.on_error.clone(),
    );
    html! {
        <div id="map" data-testid="map-container" ref={container_ref} style={MAP_CONTAINER_STYLE}></div>
    }
}
