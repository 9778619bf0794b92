use crate::app::App;

mod api;
mod app;
mod components;
mod config;
mod helpers;
mod i18n;
mod mirror;
mod storage;
mod tops_sheet;

fn main() {
    yew::Renderer::<App>::new().render();
}
