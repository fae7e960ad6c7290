use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ErrorOverlayProps {
    pub title: AttrValue,
    pub message: AttrValue,
}

#[function_component]
pub fn ErrorOverlay(props: &ErrorOverlayProps) -> Html {
    html! {
        <div role="alert" data-testid="map-error" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); color:#f0f6fc; border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px; max-width:520px; font-family:sans-serif;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{ props.title.clone() }</h2>
            <p style="margin:4px 0; line-height:1.4;">{ props.message.clone() }</p>
        </div>
    }
}
