//! Exhibits grouped by location, with the visitor's visited checklist.

use common::catalog::{group_by_location, Catalog, LocationGroup};
use common::model::exhibit::Exhibit;
use common::model::language::Language;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::app::Route;
use crate::config::AppConfig;
use crate::storage::BrowserStore;

#[derive(Properties, PartialEq)]
pub struct ModelsProps {
    pub config: AppConfig,
    pub on_navigate: Callback<Route>,
}

pub enum Msg {
    Loaded(Vec<Exhibit>),
    LoadFailed(String),
    Select(Option<String>),
    Toggle(u32),
}

pub struct ModelsView {
    catalog: Catalog<BrowserStore>,
    groups: Vec<LocationGroup>,
    selected: Option<String>,
    loading: bool,
}

impl Component for ModelsView {
    type Message = Msg;
    type Properties = ModelsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let gateway = HttpGateway::new(config.api_base.clone());
        let offset = config.dashboard.offset;
        let link = ctx.link().clone();
        spawn_local(async move {
            let catalog = Catalog::new(BrowserStore::local(), offset);
            match catalog.load(&gateway, chrono::Utc::now()).await {
                Ok(exhibits) => link.send_message(Msg::Loaded(exhibits)),
                Err(e) => link.send_message(Msg::LoadFailed(e.to_string())),
            }
        });

        Self {
            catalog: Catalog::new(BrowserStore::local(), offset),
            groups: Vec::new(),
            selected: None,
            loading: true,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(exhibits) => {
                self.loading = false;
                self.groups = group_by_location(&exhibits);
            }
            Msg::LoadFailed(reason) => {
                self.loading = false;
                gloo_console::error!(format!("Error loading exhibit data: {reason}"));
            }
            Msg::Select(location) => self.selected = location,
            Msg::Toggle(model_number) => {
                match self.catalog.toggle_visited(model_number) {
                    Ok(Some(_)) => {}
                    Ok(None) => gloo_console::warn!(format!("Model {model_number} is not cached")),
                    Err(e) => gloo_console::error!(format!("Could not save visited flag: {e}")),
                }
                if let Some(exhibits) = self.catalog.cached() {
                    self.groups = group_by_location(&exhibits);
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="page"><p>{ "Loading..." }</p></div> };
        }
        if self.groups.is_empty() {
            return html! { <div class="page"><h2>{ "No Exhibition Data" }</h2></div> };
        }
        let selected = self
            .selected
            .as_ref()
            .and_then(|location| self.groups.iter().find(|g| &g.location == location));
        html! {
            <div class="page">
                { match selected {
                    Some(group) => self.view_group(ctx, group),
                    None => self.view_groups(ctx),
                } }
            </div>
        }
    }
}

impl ModelsView {
    fn view_groups(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="grid">
                { for self.groups.iter().map(|group| {
                    let location = group.location.clone();
                    let onclick = ctx.link().callback(move |_| Msg::Select(Some(location.clone())));
                    let percent = group.visited_percent();
                    let progress = if group.is_complete() { "progress complete" } else { "progress" };
                    html! {
                        <div class="card" {onclick} style="cursor: pointer;">
                            <h2>{ &group.location }</h2>
                            <p>{ format!("Total: {}  Visited: {}  Complete: {:.0}%", group.total(), group.visited_count(), percent) }</p>
                            <div class={progress}><div style={format!("width: {percent}%;")}></div></div>
                        </div>
                    }
                }) }
            </div>
        }
    }

    fn view_group(&self, ctx: &Context<Self>, group: &LocationGroup) -> Html {
        let back = ctx.link().callback(|_| Msg::Select(None));
        html! {
            <>
                <button class="btn secondary" onclick={back}>{ "← Back to Groups" }</button>
                <h1>{ format!("{} ({})", group.location, group.total()) }</h1>
                <div class="grid">
                    { for group.exhibits.iter().map(|exhibit| self.view_exhibit(ctx, exhibit)) }
                </div>
            </>
        }
    }

    fn view_exhibit(&self, ctx: &Context<Self>, exhibit: &Exhibit) -> Html {
        let model_number = exhibit.model_number;
        let toggle = ctx.link().callback(move |_| Msg::Toggle(model_number));
        let on_navigate = ctx.props().on_navigate.clone();
        let rate = Callback::from(move |_| on_navigate.emit(Route::Rating(Some(model_number))));
        let class = if exhibit.is_visited() { "card visited" } else { "card" };
        html! {
            <div {class}>
                <h3>{ format!("#{} {}", exhibit.model_number, exhibit.name(Language::English)) }</h3>
                <p>{ exhibit.description(Language::English) }</p>
                <label>
                    <input type="checkbox" checked={exhibit.is_visited()} onchange={toggle} />
                    { " Visited" }
                </label>
                if exhibit.rating_submitted {
                    <p>{ "★ Rated" }</p>
                } else {
                    <button class="btn" onclick={rate}>{ "Rate" }</button>
                }
            </div>
        }
    }
}
