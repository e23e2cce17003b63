//! Todo Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod logging;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::BuildEnv::current().log_level());
    mount_to_body(App);
}
