//! Landing page: navigation cards and a rotating highlight of exhibits.

use common::catalog::Catalog;
use common::model::language::Language;
use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::app::Route;
use crate::config::AppConfig;
use crate::storage::BrowserStore;

const WELCOME_SLIDES: [&str; 3] = [
    "Welcome to the Seerah Exhibition",
    "Scan the QR code next to a model to rate it",
    "Tell us about your visit on the feedback page",
];

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub config: AppConfig,
    pub on_navigate: Callback<Route>,
}

pub enum Msg {
    NextSlide,
}

pub struct Home {
    slides: Vec<String>,
    current: usize,
    _carousel: Interval,
}

impl Component for Home {
    type Message = Msg;
    type Properties = HomeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut slides: Vec<String> = WELCOME_SLIDES.iter().map(|s| s.to_string()).collect();
        let catalog = Catalog::new(BrowserStore::local(), ctx.props().config.dashboard.offset);
        if let Some(exhibits) = catalog.cached() {
            slides.extend(
                exhibits
                    .iter()
                    .take(5)
                    .map(|e| format!("#{} {} ({})", e.model_number, e.name(Language::English), e.location)),
            );
        }

        let link = ctx.link().clone();
        let carousel = Interval::new(ctx.props().config.carousel_ms, move || link.send_message(Msg::NextSlide));

        Self {
            slides,
            current: 0,
            _carousel: carousel,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::NextSlide => {
                self.current = (self.current + 1) % self.slides.len().max(1);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let card = |route: Route, title: &str, text: &str| {
            let on_navigate = ctx.props().on_navigate.clone();
            let onclick = Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                on_navigate.emit(route);
            });
            html! {
                <a class="card" href={route.path()} {onclick}>
                    <h2>{ title }</h2>
                    <p>{ text }</p>
                </a>
            }
        };
        let slide = self.slides.get(self.current).cloned().unwrap_or_default();

        html! {
            <div class="page">
                <h1 style="text-align: center;">{ "Seerah Exhibition" }</h1>
                <div class="card carousel">
                    <p style="font-size: 1.3em;">{ slide }</p>
                    <small>{ format!("{} / {}", self.current + 1, self.slides.len()) }</small>
                </div>
                <div class="grid">
                    { card(Route::Register, "Register", "Sign in for your visit") }
                    { card(Route::Models, "View Models", "Track your visit and rate the exhibition models") }
                    { card(Route::Feedback, "Feedback", "Your feedback helps us improve the experience") }
                    { card(Route::Dashboard, "Live Dashboard", "View real-time rankings and statistics") }
                    { card(Route::Admin, "Admin Panel", "Manage models, volunteers, and export data") }
                </div>
            </div>
        }
    }
}
