//! Deep links to the rating page and the QR image URLs that encode them.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::model::exhibit::Exhibit;

pub const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrLink {
    pub model_number: u32,
    pub qr: String,
}

/// Rating page for one exhibit, e.g. `https://expo.example/rating?id=7`.
pub fn rating_link(origin: &str, model_number: u32) -> String {
    format!("{}/rating?id={model_number}", origin.trim_end_matches('/'))
}

pub fn qr_image_url(origin: &str, model_number: u32) -> String {
    format!("{QR_SERVICE}{}", encode_component(&rating_link(origin, model_number)))
}

pub fn bulk_qr_links(origin: &str, exhibits: &[Exhibit]) -> Vec<QrLink> {
    exhibits
        .iter()
        .map(|e| QrLink {
            model_number: e.model_number,
            qr: qr_image_url(origin, e.model_number),
        })
        .collect()
}

/// Bytes escaped in a URI component: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_fully_encoded_inside_the_qr_url() {
        assert_eq!(
            qr_image_url("https://expo.example/", 7),
            "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=https%3A%2F%2Fexpo.example%2Frating%3Fid%3D7"
        );
    }

    #[test]
    fn non_ascii_is_encoded_per_utf8_byte() {
        assert_eq!(encode_component("a b/é"), "a%20b%2F%C3%A9");
    }

    #[test]
    fn unreserved_marks_pass_through() {
        assert_eq!(encode_component("x-_.!~*'()y"), "x-_.!~*'()y");
        assert_eq!(encode_component("a+b&c"), "a%2Bb%26c");
    }
}
