mod components;
mod config;
mod hooks;
mod pages;
mod platform;
mod redirect;
mod utils;

use pages::landing::Landing;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<Landing>::new().render();
}
