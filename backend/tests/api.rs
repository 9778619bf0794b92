use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use backend::AppState;
use backend::db::Database;
use backend::session_controller::state::SessionsState;
use common::model::exhibit::Exhibit;
use common::model::feedback::{FeedbackSubmission, Question};
use common::model::rating::Rating;
use common::model::user::RegistrationOutcome;
use common::requests::{ErrorBody, LoginResponse};
use serde_json::{Value, json};
use tempfile::TempDir;

const EMAIL: &str = "admin@example.org";
const PASSWORD: &str = "letmein";

fn state(dir: &TempDir) -> AppState {
    let db = Database::new(dir.path().join("test.sqlite"));
    db.migrate().unwrap();
    AppState {
        db,
        sessions: SessionsState::new(EMAIL, PASSWORD),
    }
}

/// Inserts bare model rows so ratings can refer to them.
fn seed_models(state: &AppState, numbers: &[u32]) {
    let conn = state.db.connect().unwrap();
    for n in numbers {
        conn.execute(
            "INSERT INTO models (model_number, name_en, location) VALUES (?1, ?2, 'Hall A')",
            rusqlite::params![n, format!("Model {n}")],
        )
        .unwrap();
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(backend::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
            .to_request();
        let body: LoginResponse = test::call_and_read_body_json(&$app, req).await;
        body.token
    }};
}

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn feedback(user_id: &str, name: &str) -> Value {
    let first = |q: Question| q.options_en()[0];
    json!({
        "user_id": user_id,
        "name": name,
        "place": "Bengaluru",
        "accompanying_type": "Teacher",
        "accompanying_count": 2,
        "overall_experience": first(Question::OverallExperience),
        "organization": first(Question::Organization),
        "movement": first(Question::Movement),
        "learning": first(Question::Learning),
        "improvements": first(Question::Improvements),
        "submitted_at": "2025-01-10T10:00:00Z",
        "submission_language": "kn",
    })
}

#[actix_web::test]
async fn a_second_rating_for_the_same_model_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    seed_models(&state, &[7]);
    let app = app!(state);

    let rating = json!({ "user_id": "abc123", "model_number": 7, "star_rating": 4 });
    let req = test::TestRequest::post().uri("/api/ratings").set_json(&rating).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rows: Vec<Rating> = test::read_body_json(resp).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].star_rating, 4);

    let req = test::TestRequest::post().uri("/api/ratings").set_json(&rating).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/ratings").to_request();
    let rows: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 1);
}

#[actix_web::test]
async fn ratings_for_unknown_models_are_not_stored() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ratings")
        .set_json(json!({ "user_id": "abc123", "model_number": 999, "star_rating": 5 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/ratings").to_request();
    let rows: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn stars_outside_one_to_five_are_rejected() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    for stars in [0, 6] {
        let req = test::TestRequest::post()
            .uri("/api/ratings")
            .set_json(json!({ "user_id": "abc123", "model_number": 7, "star_rating": stars }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{stars} stars");
    }
}

#[actix_web::test]
async fn ratings_can_be_filtered_by_visitor() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    seed_models(&state, &[1, 2]);
    let app = app!(state);

    for (user, model) in [("a", 1), ("a", 2), ("b", 1)] {
        let req = test::TestRequest::post()
            .uri("/api/ratings")
            .set_json(json!({ "user_id": user, "model_number": model, "star_rating": 5 }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = test::TestRequest::get().uri("/api/ratings?user_id=a").to_request();
    let rows: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.user_id == "a"));

    let req = test::TestRequest::get().uri("/api/ratings?user_id=nobody").to_request();
    let rows: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn admin_routes_need_a_session() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": EMAIL, "password": "wrong" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let token = login!(app);
    let req = test::TestRequest::get().uri("/api/users").insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/admin/logout")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/users").insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn models_are_managed_by_the_admin() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);
    let token = login!(app);

    let model = json!({ "model_number": 12, "name_en": "Well of Zamzam", "location": "Hall A" });
    let req = test::TestRequest::post()
        .uri("/api/models")
        .insert_header(bearer(&token))
        .set_json(&model)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Vec<Exhibit> = test::read_body_json(resp).await;
    let id = created[0].id.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/models")
        .insert_header(bearer(&token))
        .set_json(&model)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri(&format!("/api/models/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "location": "Hall B" }))
        .to_request();
    let updated: Vec<Exhibit> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated[0].location, "Hall B");
    assert_eq!(updated[0].name_en, "Well of Zamzam");

    let req = test::TestRequest::get().uri("/api/models").to_request();
    let all: Vec<Exhibit> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/models/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::put()
        .uri(&format!("/api/models/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "location": "Hall C" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn registering_a_known_phone_merges_into_the_stored_identity() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    seed_models(&state, &[1, 2]);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({
            "user_id": "first", "name": "Imran", "place": "Hubli",
            "phone": "98450 12345", "visitor_count": 2
        }))
        .to_request();
    let outcome: RegistrationOutcome = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome.merged_from, None);
    assert_eq!(outcome.user.visitor_count, 2);
    assert_eq!(outcome.user.repeat_count, 0);

    for (user, model) in [("first", 1), ("second", 1), ("second", 2)] {
        let req = test::TestRequest::post()
            .uri("/api/ratings")
            .set_json(json!({ "user_id": user, "model_number": model, "star_rating": 3 }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({
            "user_id": "second", "name": "Imran", "place": "Hubli",
            "phone": "9845012345", "visitor_count": 3
        }))
        .to_request();
    let outcome: RegistrationOutcome = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome.merged_from.as_deref(), Some("second"));
    assert_eq!(outcome.user.user_id, "first");
    assert_eq!(outcome.user.visitor_count, 5);
    assert_eq!(outcome.user.repeat_count, 1);

    let req = test::TestRequest::get().uri("/api/ratings?user_id=first").to_request();
    let rows: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    let mut models: Vec<u32> = rows.iter().map(|r| r.model_number).collect();
    models.sort();
    assert_eq!(models, vec![1, 2]);
}

#[actix_web::test]
async fn feedback_is_one_row_per_visitor() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    for name in ["Sara", "Sara K"] {
        let req = test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(feedback("v1", name))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let mut incomplete = feedback("v2", "Noor");
    incomplete["learning"] = json!("");
    let req = test::TestRequest::post().uri("/api/feedback").set_json(incomplete).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let token = login!(app);
    let req = test::TestRequest::get().uri("/api/feedback").insert_header(bearer(&token)).to_request();
    let rows: Vec<FeedbackSubmission> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Sara K");
}

#[actix_web::test]
async fn password_change_is_validated_and_takes_effect() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);
    let token = login!(app);

    let change = |new: &str, confirm: &str| {
        test::TestRequest::post()
            .uri("/api/admin/password")
            .insert_header(bearer(&token))
            .set_json(json!({ "new_password": new, "confirm": confirm }))
            .to_request()
    };
    assert_eq!(test::call_service(&app, change("abcdef", "abcdeg")).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::call_service(&app, change("abc", "abc")).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::call_service(&app, change("n3w-pass", "n3w-pass")).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "ADMIN@example.org", "password": "n3w-pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unknown_api_paths_are_json_not_found() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(backend::configure)
            .default_service(web::route().to(backend::services::static_files::serve_embedded)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("/api/nothing-here"));
}
