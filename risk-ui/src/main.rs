mod app;
mod bridge;
mod pages;
mod screen;

use leptos::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    mount_to_body(|| view! { <app::App/> });
}
