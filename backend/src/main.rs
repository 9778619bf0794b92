use std::thread;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use backend::config::Config;
use backend::db::Database;
use backend::services::static_files::serve_embedded;
use backend::session_controller::state::SessionsState;
use backend::AppState;
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::load();
    let url = config.url();

    let db = Database::new(&config.db_path);
    if let Err(e) = db.migrate() {
        error!("Could not prepare the database: {e}");
        return Err(std::io::Error::other(e.to_string()));
    }

    let state = AppState {
        db,
        sessions: SessionsState::new(config.admin_email.clone(), config.admin_password.clone()),
    };

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url) {
                error!("Could not open a browser at {url}: {e}");
            }
        });
    }

    info!("Server running at {url}");

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(backend::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
