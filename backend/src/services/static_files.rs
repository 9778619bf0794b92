//! Serves the compiled frontend embedded into the binary.
//!
//! Unknown paths fall back to `index.html` so client-side routes such as
//! `/rating?id=7` load the app. Unknown `/api/` paths stay a JSON 404.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{Dir, include_dir};
use common::requests::ErrorBody;
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    if path == "api" || path.starts_with("api/") {
        return HttpResponse::NotFound().json(ErrorBody {
            error: format!("no endpoint at {}", req.path()),
        });
    }
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Frontend not built"),
        },
    }
}
