use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use glance_shared::UploadResponse;

use crate::config::ServerConfig;
use crate::state::AppState;

fn state(media_dir: std::path::PathBuf) -> AppState {
    AppState::new(&ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        media_dir,
        public_base_url: "http://media.test".to_string(),
        max_upload_bytes: 1024,
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(super::json_config(1024))
                .configure(super::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_upload_image_then_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": "data:image/png;base64,iVBORw0K" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: UploadResponse = test::read_body_json(resp).await;
    assert_eq!(body.resource_type, "image");
    let path = body
        .secure_url
        .strip_prefix("http://media.test")
        .unwrap()
        .to_string();
    assert!(path.starts_with("/media/") && path.ends_with(".png"));

    let resp = test::call_service(&app, test::TestRequest::get().uri(&path).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[actix_web::test]
async fn test_audio_reported_as_video() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": "data:audio/webm;base64,GkXfow==" }))
        .to_request();
    let body: UploadResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.resource_type, "video");
    let path = body.secure_url.strip_prefix("http://media.test").unwrap().to_string();
    assert!(path.ends_with(".weba"));

    let resp = test::call_service(&app, test::TestRequest::get().uri(&path).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "audio/webm");
}

#[actix_web::test]
async fn test_malformed_data_uri_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": "not a data uri" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Expected a data URI");
}

#[actix_web::test]
async fn test_unsupported_type_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": "data:text/plain;base64,aGk=" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unsupported file type: text/plain");
}

#[actix_web::test]
async fn test_oversized_body_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let payload = "A".repeat(4096);
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": format!("data:image/png;base64,{payload}") }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn test_storage_failure_is_server_error_with_message() {
    let file = tempfile::NamedTempFile::new().unwrap();
    // a directory cannot be created beneath a regular file
    let app = app!(state(file.path().join("media")));

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "file": "data:image/png;base64,iVBORw0K" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[actix_web::test]
async fn test_unknown_media_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path().to_path_buf()));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/media/nothing.png").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
