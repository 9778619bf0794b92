//! Exhibit records: create, edit and delete.

use common::catalog::Catalog;
use common::error::GatewayError;
use common::model::exhibit::{Exhibit, ExhibitChanges, ExhibitDraft};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::SectionProps;
use crate::helpers::show_toast;
use crate::storage::BrowserStore;

#[derive(Debug, Clone, Copy)]
pub enum Field {
    ModelNumber,
    NameEn,
    NameUr,
    NameKn,
    DescriptionEn,
    DescriptionUr,
    DescriptionKn,
    Location,
}

pub enum Msg {
    Reload,
    Loaded(Vec<Exhibit>),
    Failed(String),
    Input(Field, String),
    Save,
    Saved,
    Edit(Exhibit),
    Cancel,
    Delete(i64),
}

pub struct ModelsSection {
    models: Vec<Exhibit>,
    draft: ExhibitDraft,
    model_number: String,
    editing: Option<i64>,
    busy: bool,
    error: Option<String>,
}

impl ModelsSection {
    fn reset_form(&mut self) {
        self.draft = ExhibitDraft::default();
        self.model_number.clear();
        self.editing = None;
    }

    fn describe(e: &GatewayError) -> String {
        match e {
            GatewayError::Conflict => "A model with this number already exists".to_string(),
            other => other.to_string(),
        }
    }

    /// Drops this device's visitor cache so the next catalog load fetches.
    fn invalidate_catalog(ctx: &Context<Self>) {
        Catalog::new(BrowserStore::local(), ctx.props().config.dashboard.offset).invalidate();
    }
}

impl Component for ModelsSection {
    type Message = Msg;
    type Properties = SectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Reload);
        Self {
            models: Vec::new(),
            draft: ExhibitDraft::default(),
            model_number: String::new(),
            editing: None,
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
                    match gateway.list_models().await {
                        Ok(models) => link.send_message(Msg::Loaded(models)),
                        Err(e) => link.send_message(Msg::Failed(e.to_string())),
                    }
                });
                false
            }
            Msg::Loaded(models) => {
                self.models = models;
                true
            }
            Msg::Failed(reason) => {
                gloo_console::error!(format!("Model administration failed: {reason}"));
                self.busy = false;
                self.error = Some(reason);
                true
            }
            Msg::Input(field, value) => {
                let draft = &mut self.draft;
                match field {
                    Field::ModelNumber => self.model_number = value,
                    Field::NameEn => draft.name_en = value,
                    Field::NameUr => draft.name_ur = value,
                    Field::NameKn => draft.name_kn = value,
                    Field::DescriptionEn => draft.description_en = value,
                    Field::DescriptionUr => draft.description_ur = value,
                    Field::DescriptionKn => draft.description_kn = value,
                    Field::Location => draft.location = value,
                }
                true
            }
            Msg::Save => {
                if self.busy {
                    return false;
                }
                self.draft.model_number = self.model_number.trim().parse().unwrap_or(0);
                if let Err(e) = self.draft.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.busy = true;
                self.error = None;
                let gateway = ctx.props().gateway();
                let draft = self.draft.clone();
                let editing = self.editing;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = match editing {
                        Some(id) => gateway.update_model(id, &ExhibitChanges::from(draft)).await,
                        None => gateway.create_model(&draft).await,
                    };
                    match result {
                        Ok(_) => link.send_message(Msg::Saved),
                        Err(e) => link.send_message(Msg::Failed(Self::describe(&e))),
                    }
                });
                true
            }
            Msg::Saved => {
                show_toast(if self.editing.is_some() { "Model updated" } else { "Model added" });
                self.busy = false;
                self.reset_form();
                Self::invalidate_catalog(ctx);
                ctx.link().send_message(Msg::Reload);
                true
            }
            Msg::Edit(exhibit) => {
                self.draft = ExhibitDraft::from(&exhibit);
                self.model_number = exhibit.model_number.to_string();
                self.editing = exhibit.id;
                self.error = None;
                true
            }
            Msg::Cancel => {
                self.reset_form();
                self.error = None;
                true
            }
            Msg::Delete(id) => {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message("Are you sure you want to delete this model? This cannot be undone.")
                            .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return false;
                }
                if self.editing == Some(id) {
                    self.reset_form();
                }
                let gateway = ctx.props().gateway();
                let link = ctx.link().clone();
                Self::invalidate_catalog(ctx);
                spawn_local(async move {
                    match gateway.delete_model(id).await {
                        Ok(_) => link.send_message(Msg::Reload),
                        Err(e) => link.send_message(Msg::Failed(Self::describe(&e))),
                    }
                });
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |label: &'static str, field: Field, value: &str| {
            let oninput =
                link.callback(move |e: InputEvent| Msg::Input(field, e.target_unchecked_into::<HtmlInputElement>().value()));
            html! {
                <label class="field">{ label }
                    <input type="text" value={value.to_string()} {oninput} />
                </label>
            }
        };
        let area = |label: &'static str, field: Field, value: &str| {
            let oninput = link
                .callback(move |e: InputEvent| Msg::Input(field, e.target_unchecked_into::<HtmlTextAreaElement>().value()));
            html! {
                <label class="field">{ label }
                    <textarea rows="2" value={value.to_string()} {oninput} />
                </label>
            }
        };
        let draft = &self.draft;

        html! {
            <>
                <h2>{ if self.editing.is_some() { "Edit Model" } else { "Add Model" } }</h2>
                <div class="grid">
                    { input("Model number", Field::ModelNumber, &self.model_number) }
                    { input("Location", Field::Location, &draft.location) }
                    { input("Name (English)", Field::NameEn, &draft.name_en) }
                    { input("Name (Urdu)", Field::NameUr, &draft.name_ur) }
                    { input("Name (Kannada)", Field::NameKn, &draft.name_kn) }
                </div>
                { area("Description (English)", Field::DescriptionEn, &draft.description_en) }
                { area("Description (Urdu)", Field::DescriptionUr, &draft.description_ur) }
                { area("Description (Kannada)", Field::DescriptionKn, &draft.description_kn) }
                if let Some(error) = &self.error {
                    <p class="error">{ error }</p>
                }
                <div style="display: flex; gap: 8px;">
                    <button class="btn" disabled={self.busy} onclick={link.callback(|_| Msg::Save)}>
                        { if self.editing.is_some() { "Update Model" } else { "Add Model" } }
                    </button>
                    if self.editing.is_some() {
                        <button class="btn secondary" onclick={link.callback(|_| Msg::Cancel)}>{ "Cancel" }</button>
                    }
                </div>

                <h2>{ format!("Models ({})", self.models.len()) }</h2>
                <table style="width: 100%;">
                    <thead>
                        <tr><th>{ "#" }</th><th>{ "Name" }</th><th>{ "Location" }</th><th></th></tr>
                    </thead>
                    <tbody>
                        { for self.models.iter().map(|exhibit| {
                            let edit = {
                                let exhibit = exhibit.clone();
                                link.callback(move |_| Msg::Edit(exhibit.clone()))
                            };
                            let id = exhibit.id;
                            html! {
                                <tr>
                                    <td>{ exhibit.model_number }</td>
                                    <td>{ &exhibit.name_en }</td>
                                    <td>{ &exhibit.location }</td>
                                    <td>
                                        <button class="btn secondary" onclick={edit}>{ "Edit" }</button>
                                        if let Some(id) = id {
                                            <button class="btn danger" onclick={link.callback(move |_| Msg::Delete(id))}>
                                                { "Delete" }
                                            </button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </>
        }
    }
}
