//! CSV downloads of ratings, registered visitors and survey answers.

use common::error::GatewayError;
use common::export::{to_csv, CsvRow};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::SectionProps;
use crate::api::HttpGateway;
use crate::helpers::{download_text, show_toast};

const CSV_MIME: &str = "text/csv;charset=utf-8;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Ratings,
    Visitors,
    Feedback,
}

impl Dataset {
    const ALL: [Dataset; 3] = [Dataset::Ratings, Dataset::Visitors, Dataset::Feedback];

    fn label(self) -> &'static str {
        match self {
            Dataset::Ratings => "Ratings",
            Dataset::Visitors => "Visitors",
            Dataset::Feedback => "Feedback",
        }
    }

    fn filename(self) -> &'static str {
        match self {
            Dataset::Ratings => "ratings_export.csv",
            Dataset::Visitors => "visitors_export.csv",
            Dataset::Feedback => "feedback_export.csv",
        }
    }

    async fn render(self, gateway: &HttpGateway) -> Result<String, String> {
        match self {
            Dataset::Ratings => csv_of(gateway.list_ratings().await),
            Dataset::Visitors => csv_of(gateway.list_users().await),
            Dataset::Feedback => csv_of(gateway.list_feedback().await),
        }
    }
}

fn csv_of<R: CsvRow>(rows: Result<Vec<R>, GatewayError>) -> Result<String, String> {
    let rows = rows.map_err(|e| e.to_string())?;
    to_csv(&rows).map_err(|e| e.to_string())
}

pub enum Msg {
    Export(Dataset),
    Ready(Dataset, String),
    Failed(String),
}

pub struct ExportSection {
    busy: Option<Dataset>,
}

impl Component for ExportSection {
    type Message = Msg;
    type Properties = SectionProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { busy: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Export(dataset) => {
                if self.busy.is_some() {
                    return false;
                }
                self.busy = Some(dataset);
                let gateway = ctx.props().gateway();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match dataset.render(&gateway).await {
                        Ok(csv) => link.send_message(Msg::Ready(dataset, csv)),
                        Err(reason) => link.send_message(Msg::Failed(reason)),
                    }
                });
            }
            Msg::Ready(dataset, csv) => {
                self.busy = None;
                if csv.is_empty() {
                    show_toast("Nothing to export yet");
                } else if let Err(e) = download_text(dataset.filename(), &csv, CSV_MIME) {
                    gloo_console::error!("Download failed", e);
                    show_toast("Could not start the download");
                }
            }
            Msg::Failed(reason) => {
                self.busy = None;
                gloo_console::error!(format!("Export failed: {reason}"));
                show_toast("Export failed, please try again");
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <>
                <h2>{ "Export Data" }</h2>
                <p>{ "Download the collected data as CSV files." }</p>
                <div style="display: flex; gap: 8px;">
                    { for Dataset::ALL.into_iter().map(|dataset| html! {
                        <button
                            class="btn"
                            disabled={self.busy.is_some()}
                            onclick={link.callback(move |_| Msg::Export(dataset))}
                        >
                            { if self.busy == Some(dataset) { "Exporting...".to_string() } else { format!("Export {}", dataset.label()) } }
                        </button>
                    }) }
                </div>
            </>
        }
    }
}
