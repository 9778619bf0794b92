use common::requests::{LoginRequest, LoginResponse};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::tops_sheet::top_sheet::TopSheet;

#[derive(Properties, PartialEq)]
pub struct LoginSheetProps {
    pub open: bool,
    pub api_base: String,
    pub on_close: Callback<()>,
    pub on_login: Callback<LoginResponse>,
}

pub enum Msg {
    Email(String),
    Password(String),
    Submit,
    Failed(String),
    Succeeded(LoginResponse),
}

pub struct LoginSheet {
    email: String,
    password: String,
    error: Option<String>,
    submitting: bool,
}

impl Component for LoginSheet {
    type Message = Msg;
    type Properties = LoginSheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            error: None,
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Email(email) => self.email = email,
            Msg::Password(password) => self.password = password,
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if self.email.trim().is_empty() || self.password.is_empty() {
                    self.error = Some("Enter email and password".to_string());
                    return true;
                }
                self.submitting = true;
                self.error = None;
                let request = LoginRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                let gateway = HttpGateway::new(ctx.props().api_base.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.login(&request).await {
                        Ok(session) => link.send_message(Msg::Succeeded(session)),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
            }
            Msg::Failed(reason) => {
                self.submitting = false;
                self.error = Some(format!("Login failed: {reason}"));
            }
            Msg::Succeeded(session) => {
                self.submitting = false;
                self.password.clear();
                ctx.props().on_login.emit(session);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        html! {
            <TopSheet open={ctx.props().open} title="Admin Login" on_close={ctx.props().on_close.clone()}>
                <form {onsubmit}>
                    <label class="field">{ "Email" }
                        <input
                            type="email"
                            value={self.email.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::Email(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </label>
                    <label class="field">{ "Password" }
                        <input
                            type="password"
                            value={self.password.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::Password(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </label>
                    if let Some(error) = &self.error {
                        <p class="error">{ error }</p>
                    }
                    <button class="btn" type="submit" disabled={self.submitting}>
                        { if self.submitting { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </TopSheet>
        }
    }
}
