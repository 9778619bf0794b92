//! Visitor registration.
//!
//! A visitor already registered in this browser is greeted instead of shown
//! the form; after a four-hour gap they are asked only for today's group
//! size. When the service matches the registration to an older record (same
//! phone, other browser) this browser adopts the stored identity and moves
//! its cached ratings across.

use common::cache::{keys, LocalCache};
use common::clock::SystemClock;
use common::identity::{adopt_identity, ensure_identity, UuidEntropy, VisitorId};
use common::mirror::NoMirror;
use common::model::user::{Registration, RegistrationOutcome, UserRecord};
use common::reconcile::RatingLedger;
use common::visit::VisitKind;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::app::Route;
use crate::config::AppConfig;
use crate::helpers::show_toast;
use crate::storage::BrowserStore;

#[derive(Properties, PartialEq)]
pub struct RegisterProps {
    pub config: AppConfig,
    pub visit: VisitKind,
    pub on_navigate: Callback<Route>,
}

#[derive(Clone, Copy)]
pub enum Field {
    Name,
    Place,
    Phone,
    Email,
    VisitorCount,
}

pub enum Msg {
    Input(Field, String),
    Submit,
    Registered(RegistrationOutcome),
    Failed(String),
}

pub struct RegisterPage {
    cache: LocalCache<BrowserStore>,
    current: Option<UserRecord>,
    name: String,
    place: String,
    phone: String,
    email: String,
    visitor_count: String,
    submitting: bool,
    /// Set once this page has registered the visitor.
    done: bool,
    error: Option<String>,
}

impl Component for RegisterPage {
    type Message = Msg;
    type Properties = RegisterProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let cache = LocalCache::new(BrowserStore::local());
        let current = cache.get_json::<UserRecord>(keys::CURRENT_USER);
        Self {
            cache,
            current,
            name: String::new(),
            place: String::new(),
            phone: String::new(),
            email: String::new(),
            visitor_count: "1".to_string(),
            submitting: false,
            done: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(field, value) => {
                match field {
                    Field::Name => self.name = value,
                    Field::Place => self.place = value,
                    Field::Phone => self.phone = value,
                    Field::Email => self.email = value,
                    Field::VisitorCount => self.visitor_count = value,
                }
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let registration = match self.registration() {
                    Ok(registration) => registration,
                    Err(message) => {
                        self.error = Some(message);
                        return true;
                    }
                };
                self.submitting = true;
                self.error = None;
                let gateway = HttpGateway::new(ctx.props().config.api_base.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.register(&registration).await {
                        Ok(outcome) => link.send_message(Msg::Registered(outcome)),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
                true
            }
            Msg::Registered(outcome) => {
                self.submitting = false;
                if let Some(replaced) = &outcome.merged_from {
                    self.adopt(replaced, &outcome.user.user_id, &ctx.props().config);
                }
                if let Err(e) = self.cache.set_json(keys::CURRENT_USER, &outcome.user) {
                    gloo_console::warn!(format!("Could not remember the registration: {e}"));
                }
                show_toast("Registered successfully!");
                self.current = Some(outcome.user);
                self.done = true;
                true
            }
            Msg::Failed(reason) => {
                self.submitting = false;
                gloo_console::error!(format!("Registration failed: {reason}"));
                self.error = Some("Something went wrong, please try again".to_string());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match (&self.current, ctx.props().visit) {
            (Some(user), VisitKind::Returning) if !self.done => self.view_returning(ctx, user),
            (Some(user), _) => self.view_welcome(ctx, user),
            (None, _) => self.view_form(ctx),
        };
        html! { <div class="page">{ body }</div> }
    }
}

impl RegisterPage {
    fn registration(&self) -> Result<Registration, String> {
        let visitor_count = self
            .visitor_count
            .trim()
            .parse::<u32>()
            .map_err(|_| "Visitor count must be a number".to_string())?;
        let user_id = ensure_identity(&self.cache, &SystemClock, &UuidEntropy).map_err(|e| e.to_string())?;

        let registration = match &self.current {
            Some(user) => Registration {
                user_id: user_id.into_inner(),
                name: user.name.clone(),
                place: user.place.clone(),
                phone: user.phone.clone(),
                email: user.email.clone(),
                visitor_count,
            },
            None => Registration {
                user_id: user_id.into_inner(),
                name: self.name.clone(),
                place: self.place.clone(),
                phone: Some(self.phone.clone()),
                email: Some(self.email.clone()),
                visitor_count,
            },
        }
        .normalized();
        registration.validate().map_err(|e| e.to_string())?;
        Ok(registration)
    }

    /// Switches this browser to the identity the service kept.
    fn adopt(&self, replaced: &str, kept: &str, config: &AppConfig) {
        let kept = VisitorId::new(kept);
        if let Err(e) = adopt_identity(&self.cache, &kept) {
            gloo_console::error!(format!("Could not adopt identity {kept}: {e}"));
            return;
        }
        let mut ledger = RatingLedger::new(
            HttpGateway::new(config.api_base.clone()),
            BrowserStore::local(),
            NoMirror,
            VisitorId::new(replaced),
        );
        if let Err(e) = ledger.rewrite_identity(kept) {
            gloo_console::warn!(format!("Could not rewrite cached ratings: {e}"));
            ledger.forget_identity_ratings();
        }
    }

    fn input(ctx: &Context<Self>, label: &str, field: Field, value: &str, kind: &str) -> Html {
        let oninput = ctx
            .link()
            .callback(move |e: InputEvent| Msg::Input(field, e.target_unchecked_into::<HtmlInputElement>().value()));
        html! {
            <label class="field">{ label }
                <input type={kind.to_string()} value={value.to_string()} {oninput} />
            </label>
        }
    }

    fn submit_button(&self) -> Html {
        html! {
            <button class="btn" type="submit" disabled={self.submitting}>
                { if self.submitting { "Registering..." } else { "Register" } }
            </button>
        }
    }

    fn error(&self) -> Html {
        match &self.error {
            Some(error) => html! { <p class="error">{ error }</p> },
            None => html! {},
        }
    }

    fn onsubmit(ctx: &Context<Self>) -> Callback<SubmitEvent> {
        ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        html! {
            <form class="card" onsubmit={Self::onsubmit(ctx)}>
                <h1>{ "Visitor Registration" }</h1>
                { Self::input(ctx, "Name *", Field::Name, &self.name, "text") }
                { Self::input(ctx, "Place *", Field::Place, &self.place, "text") }
                { Self::input(ctx, "Phone", Field::Phone, &self.phone, "tel") }
                { Self::input(ctx, "Email", Field::Email, &self.email, "email") }
                { Self::input(ctx, "Visitor Count", Field::VisitorCount, &self.visitor_count, "number") }
                { self.error() }
                { self.submit_button() }
            </form>
        }
    }

    fn view_returning(&self, ctx: &Context<Self>, user: &UserRecord) -> Html {
        html! {
            <form class="card" onsubmit={Self::onsubmit(ctx)}>
                <h2>{ format!("Welcome back {}!", user.name) }</h2>
                <p>{ "Wish you to have a great experience today again!" }</p>
                { Self::input(ctx, "Visitor Count", Field::VisitorCount, &self.visitor_count, "number") }
                { self.error() }
                { self.submit_button() }
            </form>
        }
    }

    fn view_welcome(&self, ctx: &Context<Self>, user: &UserRecord) -> Html {
        let on_navigate = ctx.props().on_navigate.clone();
        html! {
            <div class="card">
                <h2>{ format!("Welcome dear {}!", user.name) }</h2>
                <p>{ "Wish you to have a great experience today!" }</p>
                <button class="btn" onclick={move |_| on_navigate.emit(Route::Models)}>{ "Review Navigation" }</button>
            </div>
        }
    }
}
