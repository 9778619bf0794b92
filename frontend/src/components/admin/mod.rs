//! Admin panel. Every section talks to the service with the bearer token of
//! the current session; the token never leaves application memory.

mod export;
mod models;
mod qr;
mod settings;
mod volunteers;

use common::requests::LoginResponse;
use yew::prelude::*;

use crate::api::HttpGateway;
use crate::config::AppConfig;

use export::ExportSection;
use models::ModelsSection;
use qr::QrSection;
use settings::SettingsSection;
use volunteers::VolunteersSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Models,
    Volunteers,
    QrCodes,
    Export,
    Settings,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Models,
        Section::Volunteers,
        Section::QrCodes,
        Section::Export,
        Section::Settings,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Models => "Models",
            Section::Volunteers => "Volunteers",
            Section::QrCodes => "QR Codes",
            Section::Export => "Export",
            Section::Settings => "Settings",
        }
    }
}

/// Props shared by every admin section.
#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub config: AppConfig,
    pub token: String,
}

impl SectionProps {
    pub fn gateway(&self) -> HttpGateway {
        HttpGateway::new(self.config.api_base.clone()).with_token(self.token.clone())
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminProps {
    pub config: AppConfig,
    pub session: LoginResponse,
    pub on_logout: Callback<()>,
}

pub enum Msg {
    Show(Section),
}

pub struct AdminPanel {
    active: Section,
}

impl Component for AdminPanel {
    type Message = Msg;
    type Properties = AdminProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { active: Section::Models }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Show(section) if section != self.active => {
                self.active = section;
                true
            }
            Msg::Show(_) => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let config = props.config.clone();
        let token = props.session.token.clone();
        let on_logout = props.on_logout.reform(|_: MouseEvent| ());

        let body = match self.active {
            Section::Models => html! { <ModelsSection {config} {token} /> },
            Section::Volunteers => html! { <VolunteersSection {config} {token} /> },
            Section::QrCodes => html! { <QrSection {config} {token} /> },
            Section::Export => html! { <ExportSection {config} {token} /> },
            Section::Settings => html! { <SettingsSection {config} {token} /> },
        };

        html! {
            <div class="page">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <div>
                        <h1>{ "Admin Panel" }</h1>
                        <p>{ format!("Signed in as {}", props.session.email) }</p>
                    </div>
                    <button class="btn secondary" onclick={on_logout}>{ "Log out" }</button>
                </div>
                <div style="display: flex; gap: 8px; margin-bottom: 16px;">
                    { for Section::ALL.into_iter().map(|section| {
                        let class = if section == self.active { "btn" } else { "btn secondary" };
                        html! {
                            <button {class} onclick={link.callback(move |_| Msg::Show(section))}>
                                { section.label() }
                            </button>
                        }
                    }) }
                </div>
                <div class="card">{ body }</div>
            </div>
        }
    }
}
