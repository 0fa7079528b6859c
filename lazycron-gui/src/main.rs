use lazycron_gui::app::App;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        logging::warn!("Logger not installed: {}", err);
    }
    mount_to_body(|| {
        view! {
            <App/>
        }
    })
}
