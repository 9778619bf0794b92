//! Printable QR codes, one per exhibit, each linking to its rating page.

use common::model::exhibit::Exhibit;
use common::qr::{bulk_qr_links, rating_link, QrLink};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::SectionProps;
use crate::helpers::origin;

pub enum Msg {
    Loaded(Vec<Exhibit>),
    Failed(String),
    Generate,
}

pub struct QrSection {
    models: Vec<Exhibit>,
    links: Vec<QrLink>,
    error: Option<String>,
}

impl Component for QrSection {
    type Message = Msg;
    type Properties = SectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        let gateway = ctx.props().gateway();
        let link = ctx.link().clone();
        spawn_local(async move {
            match gateway.list_models().await {
                Ok(models) => link.send_message(Msg::Loaded(models)),
                Err(e) => link.send_message(Msg::Failed(e.to_string())),
            }
        });
        Self {
            models: Vec::new(),
            links: Vec::new(),
            error: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(models) => self.models = models,
            Msg::Failed(reason) => {
                gloo_console::error!(format!("Could not load models for QR codes: {reason}"));
                self.error = Some(reason);
            }
            Msg::Generate => {
                self.links = bulk_qr_links(&origin(), &self.models);
                gloo_console::info!(format!("Generated {} QR links", self.links.len()));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let site = origin();
        html! {
            <>
                <h2>{ "QR Codes" }</h2>
                <p>{ "Each code opens the rating page of its model." }</p>
                if let Some(error) = &self.error {
                    <p class="error">{ error }</p>
                }
                <button
                    class="btn"
                    disabled={self.models.is_empty()}
                    onclick={ctx.link().callback(|_| Msg::Generate)}
                >
                    { format!("Generate QR codes for {} models", self.models.len()) }
                </button>
                <div class="grid" style="margin-top: 16px;">
                    { for self.links.iter().map(|qr| {
                        let target = rating_link(&site, qr.model_number);
                        html! {
                            <div class="card" style="text-align: center;">
                                <img src={qr.qr.clone()} alt={format!("QR code for model {}", qr.model_number)} width="150" />
                                <p><strong>{ format!("Model {}", qr.model_number) }</strong></p>
                                <a href={target.clone()} target="_blank">{ target }</a>
                            </div>
                        }
                    }) }
                </div>
            </>
        }
    }
}
