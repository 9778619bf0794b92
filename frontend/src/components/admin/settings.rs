//! Password change and mirror delivery health.

use common::error::GatewayError;
use common::mirror::DeadLetterLog;
use common::requests::PasswordChange;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::SectionProps;
use crate::helpers::show_toast;
use crate::storage::BrowserStore;

pub enum Msg {
    NewPassword(String),
    Confirm(String),
    Change,
    Changed,
    Failed(String),
    ClearDeadLetters,
}

pub struct SettingsSection {
    change: PasswordChange,
    busy: bool,
    error: Option<String>,
    dead_letters: DeadLetterLog<BrowserStore>,
}

impl Component for SettingsSection {
    type Message = Msg;
    type Properties = SectionProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            change: PasswordChange {
                new_password: String::new(),
                confirm: String::new(),
            },
            busy: false,
            error: None,
            dead_letters: DeadLetterLog::new(BrowserStore::local()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::NewPassword(value) => self.change.new_password = value,
            Msg::Confirm(value) => self.change.confirm = value,
            Msg::Change => {
                if self.busy {
                    return false;
                }
                if let Err(e) = self.change.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.busy = true;
                self.error = None;
                let gateway = ctx.props().gateway();
                let change = self.change.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.change_password(&change).await {
                        Ok(()) => link.send_message(Msg::Changed),
                        Err(GatewayError::Unauthorized) => {
                            link.send_message(Msg::Failed("Your session has expired, please log in again".to_string()))
                        }
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
            }
            Msg::Changed => {
                self.busy = false;
                self.change.new_password.clear();
                self.change.confirm.clear();
                show_toast("Password updated");
            }
            Msg::Failed(reason) => {
                gloo_console::error!(format!("Password change failed: {reason}"));
                self.busy = false;
                self.error = Some(reason);
            }
            Msg::ClearDeadLetters => self.dead_letters.clear(),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_new =
            link.callback(|e: InputEvent| Msg::NewPassword(e.target_unchecked_into::<HtmlInputElement>().value()));
        let on_confirm = link.callback(|e: InputEvent| Msg::Confirm(e.target_unchecked_into::<HtmlInputElement>().value()));
        let failures = self.dead_letters.failure_count();
        let letters = self.dead_letters.entries();

        html! {
            <>
                <h2>{ "Change Password" }</h2>
                <label class="field">{ "New password" }
                    <input type="password" value={self.change.new_password.clone()} oninput={on_new} />
                </label>
                <label class="field">{ "Confirm password" }
                    <input type="password" value={self.change.confirm.clone()} oninput={on_confirm} />
                </label>
                if let Some(error) = &self.error {
                    <p class="error">{ error }</p>
                }
                <button class="btn" disabled={self.busy} onclick={link.callback(|_| Msg::Change)}>
                    { if self.busy { "Updating..." } else { "Update Password" } }
                </button>

                <h2>{ "Form Mirror" }</h2>
                <p>{ format!("Failed deliveries on this device: {failures}") }</p>
                if !letters.is_empty() {
                    <ul>
                        { for letters.iter().rev().map(|letter| html! {
                            <li>
                                { format!(
                                    "{} model {} ({} stars) by {}: {}",
                                    letter.failed_at.format("%Y-%m-%d %H:%M"),
                                    letter.entry.model_number,
                                    letter.entry.star_rating,
                                    letter.entry.user_id,
                                    letter.reason,
                                ) }
                            </li>
                        }) }
                    </ul>
                }
                <button
                    class="btn secondary"
                    disabled={failures == 0}
                    onclick={link.callback(|_| Msg::ClearDeadLetters)}
                >
                    { "Clear log" }
                </button>
            </>
        }
    }
}
