//! Copies accepted ratings to the external form endpoint.
//!
//! The request is sent in `no-cors` mode, so the response is opaque: only a
//! network failure is observable. Failures go to the dead-letter log in
//! `localStorage`, where the admin panel reads the count.

use chrono::Utc;
use common::mirror::{DeadLetterLog, MirrorEndpoint, MirrorEntry, MirrorSink};
use gloo_net::http::Request;
use web_sys::RequestMode;
use yew::platform::spawn_local;

use crate::storage::BrowserStore;

#[derive(Debug, Clone, PartialEq)]
pub struct FormMirror {
    endpoint: MirrorEndpoint,
}

impl FormMirror {
    pub fn new(endpoint: MirrorEndpoint) -> Self {
        Self { endpoint }
    }
}

impl MirrorSink for FormMirror {
    fn dispatch(&self, entry: MirrorEntry) {
        let url = self.endpoint.url_for(&entry);
        spawn_local(async move {
            let sent = Request::get(&url).mode(RequestMode::NoCors).send().await;
            if let Err(e) = sent {
                gloo_console::warn!(format!("Mirror request for model {} failed: {e}", entry.model_number));
                let log = DeadLetterLog::new(BrowserStore::local());
                if let Err(e) = log.record(entry, e.to_string(), Utc::now()) {
                    gloo_console::error!(format!("Could not record mirror failure: {e}"));
                }
            }
        });
    }
}
