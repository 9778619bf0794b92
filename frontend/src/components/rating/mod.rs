//! Rating page opened from an exhibit's QR code.
//!
//! All duplicate handling lives in `RatingLedger`: the page only reflects
//! its answer. The submit button stays disabled while a submission for the
//! model is in flight.

mod view;

use std::rc::Rc;

use common::cache::LocalCache;
use common::catalog::Catalog;
use common::clock::SystemClock;
use common::identity::{ensure_identity, UuidEntropy, VisitorId};
use common::model::exhibit::Exhibit;
use common::model::language::Language;
use common::reconcile::{RatingLedger, SubmitOutcome};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::app::Route;
use crate::config::AppConfig;
use crate::helpers::show_toast;
use crate::i18n::texts;
use crate::mirror::FormMirror;
use crate::storage::BrowserStore;

type Ledger = RatingLedger<HttpGateway, BrowserStore, FormMirror>;

#[derive(Properties, PartialEq)]
pub struct RatingProps {
    pub config: AppConfig,
    pub model_number: Option<u32>,
    pub on_navigate: Callback<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    NotFound,
    Form,
    Rated,
}

pub enum Msg {
    Found(Exhibit, bool),
    Missing,
    SetLanguage(Language),
    SetStars(u8),
    SetComments(String),
    Submit,
    Submitted(SubmitOutcome),
    SubmitFailed(String),
}

pub struct RatingPage {
    ledger: Option<Rc<Ledger>>,
    catalog: Catalog<BrowserStore>,
    phase: Phase,
    exhibit: Option<Exhibit>,
    language: Language,
    stars: u8,
    comments: String,
    submitting: bool,
}

impl Component for RatingPage {
    type Message = Msg;
    type Properties = RatingProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let catalog = Catalog::new(BrowserStore::local(), config.dashboard.offset);
        let ledger = match ensure_identity(&LocalCache::new(BrowserStore::local()), &SystemClock, &UuidEntropy) {
            Ok(visitor) => Some(Rc::new(new_ledger(config, visitor))),
            Err(e) => {
                gloo_console::error!(format!("No visitor identity available: {e}"));
                None
            }
        };

        match (ctx.props().model_number, &ledger) {
            (Some(model_number), Some(ledger)) => {
                let ledger = ledger.clone();
                let gateway = HttpGateway::new(config.api_base.clone());
                let offset = config.dashboard.offset;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let catalog = Catalog::new(BrowserStore::local(), offset);
                    let exhibit = match catalog.find(&gateway, model_number, chrono::Utc::now()).await {
                        Ok(Some(exhibit)) => exhibit,
                        Ok(None) => return link.send_message(Msg::Missing),
                        Err(e) => {
                            gloo_console::error!(format!("Could not load model {model_number}: {e}"));
                            return link.send_message(Msg::Missing);
                        }
                    };
                    let rated = ledger.has_rated(model_number).await.unwrap_or_else(|e| {
                        gloo_console::warn!(format!("Could not check earlier ratings: {e}"));
                        false
                    });
                    link.send_message(Msg::Found(exhibit, rated));
                });
            }
            _ => ctx.link().send_message(Msg::Missing),
        }

        Self {
            ledger,
            catalog,
            phase: Phase::Loading,
            exhibit: None,
            language: Language::English,
            stars: 0,
            comments: String::new(),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Found(exhibit, rated) => {
                self.phase = if rated { Phase::Rated } else { Phase::Form };
                if rated {
                    self.mark_rated(exhibit.model_number);
                }
                self.exhibit = Some(exhibit);
            }
            Msg::Missing => self.phase = Phase::NotFound,
            Msg::SetLanguage(language) => self.language = language,
            Msg::SetStars(stars) => self.stars = stars,
            Msg::SetComments(comments) => self.comments = comments,
            Msg::Submit => {
                let t = texts(self.language);
                if self.stars == 0 {
                    show_toast(t.select_stars);
                    return false;
                }
                let (Some(ledger), Some(exhibit)) = (self.ledger.clone(), &self.exhibit) else {
                    return false;
                };
                if self.submitting || ledger.is_submitting(exhibit.model_number) {
                    return false;
                }
                self.submitting = true;
                let model_number = exhibit.model_number;
                let stars = self.stars;
                let comments = Some(self.comments.trim().to_string()).filter(|c| !c.is_empty());
                let link = ctx.link().clone();
                spawn_local(async move {
                    match ledger.submit_rating(model_number, stars, comments).await {
                        Ok(outcome) => link.send_message(Msg::Submitted(outcome)),
                        Err(e) => link.send_message(Msg::SubmitFailed(e.to_string())),
                    }
                });
            }
            Msg::Submitted(outcome) => {
                self.submitting = false;
                let t = texts(self.language);
                match outcome {
                    SubmitOutcome::Inserted(_) => show_toast(t.success),
                    SubmitOutcome::AlreadyRated => show_toast(t.already_rated),
                    SubmitOutcome::InFlight => return false,
                }
                if let Some(model_number) = self.exhibit.as_ref().map(|e| e.model_number) {
                    self.mark_rated(model_number);
                }
                self.phase = Phase::Rated;
            }
            Msg::SubmitFailed(reason) => {
                self.submitting = false;
                show_toast(&format!("Could not submit rating: {reason}"));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

impl RatingPage {
    fn mark_rated(&self, model_number: u32) {
        if let Err(e) = self.catalog.mark_rated(model_number) {
            gloo_console::warn!(format!("Could not flag model {model_number} as rated: {e}"));
        }
    }
}

fn new_ledger(config: &AppConfig, visitor: VisitorId) -> Ledger {
    RatingLedger::new(
        HttpGateway::new(config.api_base.clone()),
        BrowserStore::local(),
        FormMirror::new(config.mirror.clone()),
        visitor,
    )
}
