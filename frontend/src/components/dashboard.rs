//! Live ratings dashboard. Snapshots are cached for a short TTL and
//! refreshed on a timer; a failed fetch falls back to the last snapshot.

use std::rc::Rc;

use common::dashboard::{DashboardLoader, DashboardSnapshot, ModelRanking, ScoredRating, SnapshotOrigin};
use common::model::rating::{Rating, MAX_STARS};
use gloo_timers::callback::Interval;
use num_format::{Locale, ToFormattedString};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::app::Route;
use crate::config::AppConfig;
use crate::storage::BrowserStore;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub config: AppConfig,
    pub on_navigate: Callback<Route>,
}

pub enum Msg {
    Refresh,
    Loaded(DashboardSnapshot, SnapshotOrigin),
}

pub struct Dashboard {
    loader: Rc<DashboardLoader<BrowserStore>>,
    snapshot: Option<DashboardSnapshot>,
    origin: Option<SnapshotOrigin>,
    refreshing: bool,
    _refresh: Interval,
}

impl Dashboard {
    fn fetch(&mut self, ctx: &Context<Self>, force: bool) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        let loader = self.loader.clone();
        let gateway = HttpGateway::new(ctx.props().config.api_base.clone());
        let link = ctx.link().clone();
        spawn_local(async move {
            let now = chrono::Utc::now();
            let (snapshot, origin) = if force {
                loader.refresh(&gateway, &gateway, now).await
            } else {
                loader.load(&gateway, &gateway, now).await
            };
            link.send_message(Msg::Loaded(snapshot, origin));
        });
    }
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let link = ctx.link().clone();
        let mut dashboard = Self {
            loader: Rc::new(DashboardLoader::new(BrowserStore::local(), config.dashboard)),
            snapshot: None,
            origin: None,
            refreshing: false,
            _refresh: Interval::new(config.dashboard_refresh_ms, move || link.send_message(Msg::Refresh)),
        };
        dashboard.fetch(ctx, false);
        dashboard
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => {
                self.fetch(ctx, true);
                true
            }
            Msg::Loaded(snapshot, origin) => {
                if origin == SnapshotOrigin::StaleFallback {
                    gloo_console::warn!("Showing cached dashboard data; the service is unreachable");
                }
                self.refreshing = false;
                self.snapshot = Some(snapshot);
                self.origin = Some(origin);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_home = ctx.props().on_navigate.reform(|_| Route::Home);

        let Some(snapshot) = &self.snapshot else {
            return html! { <div class="page"><p>{ "Loading dashboard..." }</p></div> };
        };
        let stats = &snapshot.stats;
        let peak = snapshot.trend.iter().map(|b| b.count).max().unwrap_or(0).max(1);

        html! {
            <div class="page">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h1>{ "Exhibition Dashboard" }</h1>
                    <div>
                        <button class="btn secondary" onclick={on_home}>{ "Home" }</button>
                        <button class="btn" disabled={self.refreshing} onclick={link.callback(|_| Msg::Refresh)}>
                            { if self.refreshing { "Refreshing..." } else { "Refresh" } }
                        </button>
                    </div>
                </div>
                if matches!(self.origin, Some(SnapshotOrigin::StaleFallback | SnapshotOrigin::Empty)) {
                    <p class="error">{ "Live data is unavailable; figures may be out of date." }</p>
                }

                <div class="grid">
                    { stat_card("Total Ratings", stats.total_ratings.to_formatted_string(&Locale::en)) }
                    { stat_card("Unique Visitors", stats.unique_visitors.to_formatted_string(&Locale::en)) }
                    { stat_card("Average Score", format!("{:.2}", stats.average_score)) }
                    { stat_card("Models Rated", stats.models_rated.to_formatted_string(&Locale::en)) }
                </div>

                <div class="card">
                    <h2>{ "Rating Distribution" }</h2>
                    { for stats.distribution.iter().rev().map(|share| html! {
                        <div class="bar-row">
                            <span>{ format!("{} ★", share.stars) }</span>
                            <div class="bar" style={format!("width: {:.0}%;", share.percent)}></div>
                            <span>{ format!("{} ({:.2}%)", share.count.to_formatted_string(&Locale::en), share.percent) }</span>
                        </div>
                    }) }
                </div>

                <div class="card">
                    <h2>{ "Ratings by Hour" }</h2>
                    { for snapshot.trend.iter().map(|bucket| html! {
                        <div class="bar-row">
                            <span>{ &bucket.label }</span>
                            <div class="bar" style={format!("width: {:.0}%;", bucket.count as f64 * 100.0 / peak as f64)}></div>
                            <span>{ format!("{} / {}", bucket.count, bucket.cumulative) }</span>
                        </div>
                    }) }
                </div>

                <div class="card">
                    <h2>{ "Model Rankings" }</h2>
                    { rankings_table(&snapshot.rankings) }
                </div>
            </div>
        }
    }
}

fn stat_card(label: &'static str, value: String) -> Html {
    html! {
        <div class="card" style="text-align: center;">
            <p>{ label }</p>
            <h2>{ value }</h2>
        </div>
    }
}

fn rankings_table(rankings: &[ModelRanking]) -> Html {
    if rankings.is_empty() {
        return html! { <p>{ "No models yet." }</p> };
    }
    html! {
        <table style="width: 100%;">
            <thead>
                <tr>
                    <th>{ "#" }</th>
                    <th>{ "Model" }</th>
                    <th>{ "Location" }</th>
                    { for Rating::CATEGORIES.iter().map(|label| html! { <th>{ *label }</th> }) }
                    <th>{ "Ratings" }</th>
                    <th>{ format!("Score / {MAX_STARS}") }</th>
                </tr>
            </thead>
            <tbody>
                { for rankings.iter().enumerate().map(|(rank, row)| html! {
                    <tr>
                        <td>{ rank + 1 }</td>
                        <td>{ format!("{}. {}", row.model_number, row.name) }</td>
                        <td>{ &row.location }</td>
                        { for row.category_means.iter().map(|mean| html! { <td>{ format!("{mean:.2}") }</td> }) }
                        <td>{ row.rating_count.to_formatted_string(&Locale::en) }</td>
                        <td>{ format!("{:.2}", row.composite) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
