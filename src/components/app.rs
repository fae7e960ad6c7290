use super::{error_overlay::ErrorOverlay, map_view::MapView};
use crate::config::AppConfig;
use log::error;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());
    let failure = use_state(|| None::<String>);

    let on_error = {
        let failure = failure.clone();
        Callback::from(move |msg: String| failure.set(Some(msg)))
    };

    let map = match config.access_token() {
        Ok(token) => html! {
            <MapView access_token={AttrValue::from(token.to_string())} on_error={on_error} />
        },
        Err(e) => {
            error!("{}", e);
            html! { <ErrorOverlay title="Map unavailable" message={e.to_string()} /> }
        }
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; margin:0; padding:0; overflow:hidden;">
            { map }
            {
                match (*failure).clone() {
                    Some(msg) => html! { <ErrorOverlay title="Map unavailable" message={msg} /> },
                    None => html! {},
                }
            }
        </div>
    }
}
