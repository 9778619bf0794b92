use common::error::GatewayError;
use common::model::volunteer::{volunteer_code, Volunteer, VolunteerDraft};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::SectionProps;
use crate::helpers::show_toast;

pub enum Msg {
    Reload,
    Loaded(Vec<Volunteer>),
    Failed(String),
    Name(String),
    Code(String),
    Add,
    Added,
    Delete(i64),
}

pub struct VolunteersSection {
    volunteers: Vec<Volunteer>,
    draft: VolunteerDraft,
    busy: bool,
    error: Option<String>,
}

impl VolunteersSection {
    /// Next free `V###` code, used when the code field is left blank.
    fn suggested_code(&self) -> String {
        let mut sequence = self.volunteers.len() as u32 + 1;
        while self.volunteers.iter().any(|v| v.volunteer_code == volunteer_code(sequence)) {
            sequence += 1;
        }
        volunteer_code(sequence)
    }
}

impl Component for VolunteersSection {
    type Message = Msg;
    type Properties = SectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Reload);
        Self {
            volunteers: Vec::new(),
            draft: VolunteerDraft::default(),
            busy: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Reload => {
                let gateway = ctx.props().gateway();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.list_volunteers().await {
                        Ok(volunteers) => link.send_message(Msg::Loaded(volunteers)),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
                false
            }
            Msg::Loaded(volunteers) => {
                self.volunteers = volunteers;
                true
            }
            Msg::Failed(reason) => {
                gloo_console::error!(format!("Volunteer administration failed: {reason}"));
                self.busy = false;
                self.error = Some(reason);
                true
            }
            Msg::Name(name) => {
                self.draft.name = name;
                true
            }
            Msg::Code(code) => {
                self.draft.volunteer_code = code;
                true
            }
            Msg::Add => {
                if self.busy {
                    return false;
                }
                if self.draft.volunteer_code.trim().is_empty() {
                    self.draft.volunteer_code = self.suggested_code();
                }
                if let Err(e) = self.draft.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.busy = true;
                self.error = None;
                let gateway = ctx.props().gateway();
                let draft = self.draft.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.create_volunteer(&draft).await {
                        Ok(_) => link.send_message(Msg::Added),
                        Err(GatewayError::Conflict) => {
                            link.send_message(Msg::Failed("That volunteer code is already taken".to_string()))
                        }
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
                true
            }
            Msg::Added => {
                show_toast("Volunteer added");
                self.busy = false;
                self.draft = VolunteerDraft::default();
                ctx.link().send_message(Msg::Reload);
                true
            }
            Msg::Delete(id) => {
                let gateway = ctx.props().gateway();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match gateway.delete_volunteer(id).await {
                        Ok(_) => link.send_message(Msg::Reload),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_name = link.callback(|e: InputEvent| Msg::Name(e.target_unchecked_into::<HtmlInputElement>().value()));
        let on_code = link.callback(|e: InputEvent| Msg::Code(e.target_unchecked_into::<HtmlInputElement>().value()));

        html! {
            <>
                <h2>{ "Add Volunteer" }</h2>
                <div class="grid">
                    <label class="field">{ "Name" }
                        <input type="text" value={self.draft.name.clone()} oninput={on_name} />
                    </label>
                    <label class="field">{ "Volunteer code" }
                        <input
                            type="text"
                            placeholder={self.suggested_code()}
                            value={self.draft.volunteer_code.clone()}
                            oninput={on_code}
                        />
                    </label>
                </div>
                if let Some(error) = &self.error {
                    <p class="error">{ error }</p>
                }
                <button class="btn" disabled={self.busy} onclick={link.callback(|_| Msg::Add)}>{ "Add" }</button>

                <h2>{ format!("Volunteers ({})", self.volunteers.len()) }</h2>
                if self.volunteers.is_empty() {
                    <p>{ "No volunteers registered yet." }</p>
                }
                <ul>
                    { for self.volunteers.iter().map(|volunteer| html! {
                        <li>
                            <strong>{ &volunteer.volunteer_code }</strong>{ " " }{ &volunteer.name }
                            if let Some(id) = volunteer.id {
                                { " " }
                                <button class="btn danger" onclick={link.callback(move |_| Msg::Delete(id))}>
                                    { "Remove" }
                                </button>
                            }
                        </li>
                    }) }
                </ul>
            </>
        }
    }
}
