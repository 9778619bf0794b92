//! Exhibition feedback survey: language choice, personal details, five
//! multiple-choice questions and a closing comment. One submission per
//! visitor identity; submitting again replaces the earlier answers.

mod view;

use common::cache::LocalCache;
use common::clock::SystemClock;
use common::feedback::FeedbackForm;
use common::identity::{ensure_identity, UuidEntropy};
use common::model::feedback::Question;
use common::model::language::Language;
use gloo_timers::callback::Timeout;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::app::Route;
use crate::config::AppConfig;
use crate::helpers::show_toast;
use crate::storage::BrowserStore;

#[derive(Properties, PartialEq)]
pub struct FeedbackProps {
    pub config: AppConfig,
    pub on_navigate: Callback<Route>,
}

#[derive(Debug, Clone, Copy)]
pub enum PersonalField {
    Name,
    Place,
    Mobile,
    Email,
    Profession,
    AccompanyingCount,
}

pub enum Msg {
    Choose(Language),
    Personal(PersonalField, String),
    Select(Question, usize),
    Comment(Question, String),
    Additional(String),
    Next,
    Previous,
    Submit,
    Submitted,
    Failed(String),
    Home,
}

pub struct FeedbackPage {
    form: FeedbackForm,
    submitting: bool,
    submitted: bool,
    error: Option<String>,
    redirect: Option<Timeout>,
}

impl Component for FeedbackPage {
    type Message = Msg;
    type Properties = FeedbackProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: FeedbackForm::new(),
            submitting: false,
            submitted: false,
            error: None,
            redirect: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Choose(language) => self.form.choose_language(language),
            Msg::Personal(field, value) => match field {
                PersonalField::Name => self.form.name = value,
                PersonalField::Place => self.form.place = value,
                PersonalField::Mobile => self.form.mobile = value,
                PersonalField::Email => self.form.email = value,
                PersonalField::Profession => self.form.profession = value,
                PersonalField::AccompanyingCount => self.form.accompanying_count = value,
            },
            Msg::Select(question, option) => self.form.select(question, option),
            Msg::Comment(question, comment) => self.form.comment(question, comment),
            Msg::Additional(comment) => self.form.additional_comments = comment,
            Msg::Next => {
                self.error = self.form.next().err().map(|e| e.to_string());
            }
            Msg::Previous => {
                self.error = None;
                self.form.previous();
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let cache = LocalCache::new(BrowserStore::local());
                let submission = ensure_identity(&cache, &SystemClock, &UuidEntropy)
                    .map_err(|e| e.to_string())
                    .and_then(|visitor| {
                        self.form
                            .build(visitor.as_str(), chrono::Utc::now())
                            .map_err(|e| e.to_string())
                    });
                let submission = match submission {
                    Ok(submission) => submission,
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
                    match gateway.submit_feedback(&submission).await {
                        Ok(_) => link.send_message(Msg::Submitted),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
            }
            Msg::Submitted => {
                self.submitting = false;
                self.submitted = true;
                let link = ctx.link().clone();
                self.redirect = Some(Timeout::new(ctx.props().config.feedback_redirect_ms, move || {
                    link.send_message(Msg::Home)
                }));
            }
            Msg::Failed(reason) => {
                self.submitting = false;
                gloo_console::error!(format!("Feedback submission failed: {reason}"));
                show_toast("Could not submit feedback, please try again");
            }
            Msg::Home => {
                ctx.props().on_navigate.emit(Route::Home);
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
