//! HTTP-level integration tests for the upload front end.
//!
//! These drive the full router in-process: form page, multipart upload,
//! rejection paths and the static plot mount.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use autoreg_web::analysis::AutomatedRegression;
use autoreg_web::config::Config;
use autoreg_web::{create_router, AppState};

const BOUNDARY: &str = "----autoreg-test-boundary";

fn build_test_app(tmp: &TempDir) -> axum::Router {
    let config = Config {
        port: 0,
        data_dir: tmp.path().join("data"),
        static_dir: tmp.path().join("static"),
        test_size: 0.2,
        k_best_features: 5,
        max_upload_bytes: 1024 * 1024,
        environment: "test".to_string(),
    };
    create_router(AppState {
        config,
        selector: Arc::new(AutomatedRegression::new()),
    })
}

fn multipart_body(field_name: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field_name: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload_csv/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field_name, file_name, content)))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn linear_csv(rows: usize) -> String {
    let mut csv = String::from("x1,x2,y\n");
    for i in 0..rows {
        let x1 = i as f64;
        let x2 = ((i * 7) % 13) as f64;
        let y = 3.0 * x1 + 2.0 * x2 + 1.0;
        csv.push_str(&format!("{x1},{x2},{y}\n"));
    }
    csv
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn index_serves_the_upload_form() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert!(body.contains("<form"));
    assert!(body.contains(r#"type="file""#));
    assert!(body.contains("/upload_csv/"));
}

#[tokio::test]
async fn health_returns_ok() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn well_formed_csv_yields_a_result_page_and_a_plot() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .clone()
        .oneshot(upload_request("file", "data.csv", linear_csv(60).as_bytes()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert!(body.contains("Best model:"));
    assert!(body.contains("<img"));
    assert!(body.contains("/static/regression.svg"));

    // The generated artifacts are now retrievable from the static mount.
    let resp = app
        .clone()
        .oneshot(get_request("/static/regression.svg"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(get_request("/static/report.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_string(resp).await;
    assert!(report.contains("best_model"));
}

#[tokio::test]
async fn non_csv_filename_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .oneshot(upload_request("file", "data.txt", b"not,a,csv\n1,2,3\n"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_utf8_content_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .oneshot(upload_request("file", "data.csv", &[0xff, 0xfe, 0xc3, 0x28]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_string(resp).await;
    assert!(body.contains("UTF-8"));
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .oneshot(upload_request("other", "data.csv", b"x,y\n1,2\n"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_csv_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .oneshot(upload_request("file", "data.csv", b"a,b,c\n1,2\n"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn too_few_rows_is_unprocessable() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_app(&tmp);

    let resp = app
        .oneshot(upload_request("file", "data.csv", linear_csv(4).as_bytes()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
