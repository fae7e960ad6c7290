use otter_curve::components::App;
use otter_curve::config::AppConfig;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    otter_curve::logging::init(AppConfig::from_build_env().log_level);
    yew::Renderer::<App>::new().render();
}
