#![allow(non_snake_case)]
use dioxus::prelude::*;

use tracing::Level;

mod common;

mod page;
use page::Page;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    launch(App);
}

#[component]
pub fn App() -> Element {
    rsx! {
        style { "{common::style::PORTFOLIO_STYLES}" }
        Page {}
    }
}
