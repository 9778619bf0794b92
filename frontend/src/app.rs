//! Root component: path-based routing, startup bookkeeping and the admin
//! session.
//!
//! On start the visitor identity is created if missing, the visit is
//! classified against `latestVisit`, and the models cache is warmed so the
//! first rating page opened from a QR code has data to show.

use common::cache::LocalCache;
use common::catalog::Catalog;
use common::clock::SystemClock;
use common::identity::{ensure_identity, UuidEntropy};
use common::requests::LoginResponse;
use common::visit::{track_visit, VisitKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::components::admin::AdminPanel;
use crate::components::dashboard::Dashboard;
use crate::components::feedback::FeedbackPage;
use crate::components::home::Home;
use crate::components::login_sheet::LoginSheet;
use crate::components::models::ModelsView;
use crate::components::rating::RatingPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::helpers::{pathname, push_path, query_param, show_toast};
use crate::storage::BrowserStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    Models,
    /// `None` when the link carried no usable model number.
    Rating(Option<u32>),
    Feedback,
    Dashboard,
    Admin,
}

impl Route {
    /// Resolves a path plus the `id` (or legacy `modelNumber`) query value.
    pub fn resolve(path: &str, model_param: Option<&str>) -> Self {
        match path.trim_end_matches('/') {
            "/register" => Route::Register,
            "/models" => Route::Models,
            "/feedback" => Route::Feedback,
            "/dashboard" => Route::Dashboard,
            "/admin" => Route::Admin,
            p if p.starts_with("/rating") => Route::Rating(model_param.and_then(|v| v.trim().parse().ok())),
            _ => Route::Home,
        }
    }

    pub fn current() -> Self {
        Self::from_query(&pathname(), query_param("id"), query_param("modelNumber"))
    }

    /// `id` wins over the legacy `modelNumber` parameter when both are present.
    fn from_query(path: &str, id: Option<String>, legacy: Option<String>) -> Self {
        Self::resolve(path, id.or(legacy).as_deref())
    }

    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Register => "/register".to_string(),
            Route::Models => "/models".to_string(),
            Route::Rating(Some(n)) => format!("/rating?id={n}"),
            Route::Rating(None) => "/rating".to_string(),
            Route::Feedback => "/feedback".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }
}

pub enum Msg {
    Navigate(Route),
    PopState,
    CloseLogin,
    LoggedIn(LoginResponse),
    Logout,
}

pub struct App {
    config: AppConfig,
    route: Route,
    visit: VisitKind,
    session: Option<LoginResponse>,
    show_login: bool,
    pending_admin: bool,
    popstate: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = AppConfig::default();
        let cache = LocalCache::new(BrowserStore::local());
        if let Err(e) = ensure_identity(&cache, &SystemClock, &UuidEntropy) {
            gloo_console::error!(format!("Could not store visitor identity: {e}"));
        }
        let visit = track_visit(&cache, chrono::Utc::now()).unwrap_or_else(|e| {
            gloo_console::warn!(format!("Could not record visit: {e}"));
            VisitKind::First
        });

        let gateway = HttpGateway::new(config.api_base.clone());
        let offset = config.dashboard.offset;
        spawn_local(async move {
            let catalog = Catalog::new(BrowserStore::local(), offset);
            if let Err(e) = catalog.load(&gateway, chrono::Utc::now()).await {
                gloo_console::warn!(format!("Could not warm the models cache: {e}"));
            }
        });

        let link = ctx.link().clone();
        let popstate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| link.send_message(Msg::PopState));
        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
                .ok();
        }

        let mut app = Self {
            config,
            route: Route::current(),
            visit,
            session: None,
            show_login: false,
            pending_admin: false,
            popstate: Some(popstate),
        };
        app.guard_admin();
        app
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => {
                push_path(&route.path());
                self.route = route;
                self.guard_admin();
                true
            }
            Msg::PopState => {
                self.route = Route::current();
                self.guard_admin();
                true
            }
            Msg::CloseLogin => {
                self.show_login = false;
                self.pending_admin = false;
                true
            }
            Msg::LoggedIn(session) => {
                show_toast(&format!("Signed in as {}", session.email));
                self.session = Some(session);
                self.show_login = false;
                if self.pending_admin {
                    self.pending_admin = false;
                    self.route = Route::Admin;
                    push_path(&Route::Admin.path());
                }
                true
            }
            Msg::Logout => {
                if let Some(session) = self.session.take() {
                    let gateway = HttpGateway::new(self.config.api_base.clone()).with_token(session.token);
                    spawn_local(async move {
                        if let Err(e) = gateway.logout().await {
                            gloo_console::warn!(format!("Logout failed: {e}"));
                        }
                    });
                }
                self.route = Route::Home;
                push_path(&Route::Home.path());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let navigate = link.callback(Msg::Navigate);
        let config = self.config.clone();

        let page = match self.route {
            Route::Home => html! { <Home {config} on_navigate={navigate} /> },
            Route::Register => html! { <RegisterPage {config} visit={self.visit} on_navigate={navigate} /> },
            Route::Models => html! { <ModelsView {config} on_navigate={navigate} /> },
            Route::Rating(model_number) => html! {
                <RatingPage key={self.route.path()} {config} {model_number} on_navigate={navigate} />
            },
            Route::Feedback => html! { <FeedbackPage {config} on_navigate={navigate} /> },
            Route::Dashboard => html! { <Dashboard {config} on_navigate={navigate} /> },
            Route::Admin => match &self.session {
                Some(session) => html! {
                    <AdminPanel {config} session={session.clone()} on_logout={link.callback(|_| Msg::Logout)} />
                },
                None => html! { <Home {config} on_navigate={navigate} /> },
            },
        };

        html! {
            <>
                { page }
                <LoginSheet
                    open={self.show_login}
                    api_base={self.config.api_base.clone()}
                    on_close={link.callback(|_| Msg::CloseLogin)}
                    on_login={link.callback(Msg::LoggedIn)}
                />
            </>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(window), Some(popstate)) = (web_sys::window(), self.popstate.take()) {
            window
                .remove_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl App {
    /// The admin route needs a session; without one the login sheet opens.
    fn guard_admin(&mut self) {
        if self.route == Route::Admin && self.session.is_none() {
            self.pending_admin = true;
            self.show_login = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_links_resolve_to_their_model() {
        assert_eq!(Route::resolve("/rating", Some("7")), Route::Rating(Some(7)));
        assert_eq!(Route::resolve("/rating", Some("seven")), Route::Rating(None));
        assert_eq!(Route::resolve("/rating", None), Route::Rating(None));
        assert_eq!(Route::Rating(Some(7)).path(), "/rating?id=7");
    }

    #[test]
    fn legacy_model_number_parameter_still_works() {
        let some = |v: &str| Some(v.to_string());
        assert_eq!(Route::from_query("/rating", None, some("12")), Route::Rating(Some(12)));
        assert_eq!(Route::from_query("/rating", some("3"), some("12")), Route::Rating(Some(3)));
        assert_eq!(Route::from_query("/rating", some(" 4 "), None), Route::Rating(Some(4)));
    }

    #[test]
    fn unknown_paths_go_home() {
        assert_eq!(Route::resolve("/models/", None), Route::Models);
        assert_eq!(Route::resolve("/nowhere", None), Route::Home);
        assert_eq!(Route::resolve("", None), Route::Home);
    }
}
