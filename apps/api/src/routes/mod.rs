pub mod documents;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard steps
        .route("/api/v1/wizard/polish", post(handlers::handle_polish))
        .route("/api/v1/wizard/summary", post(handlers::handle_summary))
        .route(
            "/api/v1/wizard/bullets/:job_index",
            post(handlers::handle_bullets),
        )
        .route(
            "/api/v1/wizard/cover-letter",
            post(handlers::handle_cover_letter),
        )
        .route("/api/v1/wizard/placement", post(handlers::handle_placement))
        .route("/api/v1/wizard/allocate", post(handlers::handle_allocate))
        .route("/api/v1/wizard/reset", post(handlers::handle_reset))
        // Documents
        .route(
            "/api/v1/documents/resume",
            post(documents::handle_resume_document),
        )
        .route(
            "/api/v1/documents/cover-letter",
            post(documents::handle_cover_letter_document),
        )
        .route(
            "/api/v1/uploads/resume",
            post(documents::handle_upload_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::docx::{self, DOCX_CONTENT_TYPE};
    use crate::generation::testing::StubGenerator;
    use crate::layout::assembler::assemble;
    use crate::models::{Header, ResumeDocument};

    fn app(stub: StubGenerator) -> Router {
        build_router(AppState {
            generator: Arc::new(stub),
            config: Config::for_tests(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn wizard_json() -> Value {
        json!({
            "job_title": "Engineer",
            "company_name": "Acme",
            "job_description": "Build reliable things",
            "resume_content": "Jane Doe\nEngineer at Acme"
        })
    }

    fn polished_json() -> Value {
        let mut wizard = wizard_json();
        wizard["resume"] = serde_json::to_value(ResumeDocument {
            header: Header {
                name: "Jane Doe".to_string(),
                email: Some("jane@x.com".to_string()),
                ..Default::default()
            },
            summary: "Builds things.".to_string(),
            ..Default::default()
        })
        .unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StubGenerator::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "vitae");
    }

    #[tokio::test]
    async fn test_polish_returns_updated_state() {
        let stub = StubGenerator::new([Ok(r#"{"header": {"name": "Jane Doe"}}"#)]);
        let response = app(stub)
            .oneshot(post_json("/api/v1/wizard/polish", wizard_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["state"]["resume"]["header"]["name"], "Jane Doe");
        assert_eq!(body["state"]["step"], "cover_letter");
        assert_eq!(body["warnings"], json!([]));
        assert!(body.get("fit_report").is_none());
    }

    #[tokio::test]
    async fn test_polish_missing_description_is_400() {
        let mut wizard = wizard_json();
        wizard["job_description"] = json!("");
        let response = app(StubGenerator::default())
            .oneshot(post_json("/api/v1/wizard/polish", wizard))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    }

    #[tokio::test]
    async fn test_polish_unparseable_is_422_with_raw_output() {
        let stub = StubGenerator::new([Ok("no json here")]);
        let response = app(stub)
            .oneshot(post_json("/api/v1/wizard/polish", wizard_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["raw_output"], "no json here");
    }

    #[tokio::test]
    async fn test_summary_accepts_temperature() {
        let stub = StubGenerator::new([Ok("Seasoned engineer.")]);
        let response = app(stub)
            .oneshot(post_json(
                "/api/v1/wizard/summary",
                json!({ "state": polished_json(), "temperature": 0.4 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["state"]["resume"]["summary"], "Seasoned engineer.");
    }

    #[tokio::test]
    async fn test_allocate_returns_fit_report_and_warnings() {
        let mut wizard = polished_json();
        wizard["line_overrides"] = json!({ "experience": 70 });
        let stub = StubGenerator::new([Err(())]);
        let response = app(stub)
            .oneshot(post_json("/api/v1/wizard/allocate", wizard))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["state"]["allocation"]["experience"], 70);
        assert_eq!(body["state"]["weights"], Value::Null);
        assert_eq!(body["state"]["allocation"]["summary"], 5);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(body["fit_report"]["total_budget_lines"], 60);
    }

    #[tokio::test]
    async fn test_reset_clears_generated_output() {
        let mut wizard = polished_json();
        wizard["step"] = json!("placement");
        wizard["cover_letter"] = json!("Dear Hiring Manager,");
        let response = app(StubGenerator::default())
            .oneshot(post_json("/api/v1/wizard/reset", wizard))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["state"]["step"], "polish");
        assert_eq!(body["state"]["cover_letter"], Value::Null);
        assert_eq!(body["state"]["job_title"], "Engineer");
    }

    #[tokio::test]
    async fn test_resume_download_is_named_docx() {
        let response = app(StubGenerator::default())
            .oneshot(post_json("/api/v1/documents/resume", polished_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            DOCX_CONTENT_TYPE
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Jane Doe Resume for Acme ("));
        assert!(disposition.ends_with(").docx\""));

        let bytes = body_bytes(response).await;
        let paragraphs = docx::extract_paragraphs(&bytes).unwrap();
        assert_eq!(paragraphs[0], "Jane Doe");
        assert!(paragraphs.contains(&"Builds things.".to_string()));
    }

    #[tokio::test]
    async fn test_resume_download_requires_polished_resume() {
        let response = app(StubGenerator::default())
            .oneshot(post_json("/api/v1/documents/resume", wizard_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cover_letter_download() {
        let mut wizard = polished_json();
        wizard["cover_letter"] = json!("Dear Hiring Manager,\n\nI am writing.\n\nSincerely,\nJane Doe");
        let response = app(StubGenerator::default())
            .oneshot(post_json("/api/v1/documents/cover-letter", wizard))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Jane Doe Cover Letter for Acme ("));
        let bytes = body_bytes(response).await;
        assert_eq!(
            docx::extract_paragraphs(&bytes).unwrap(),
            vec!["Dear Hiring Manager,", "I am writing.", "Sincerely,", "Jane Doe"]
        );
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let boundary = "vitae-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.docx\"\r\nContent-Type: {DOCX_CONTENT_TYPE}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri("/api/v1/uploads/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_extracts_paragraphs() {
        let resume = ResumeDocument {
            header: Header {
                name: "Jane Doe".to_string(),
                ..Default::default()
            },
            summary: "Builds things.".to_string(),
            ..Default::default()
        };
        let bytes = assemble(&resume).unwrap();
        let response = app(StubGenerator::default())
            .oneshot(multipart_request("file", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["paragraphs"][0], "Jane Doe");
        assert!(body["resume_content"]
            .as_str()
            .unwrap()
            .starts_with("Jane Doe\nProfessional Summary\nBuilds things."));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_docx_and_missing_field() {
        let response = app(StubGenerator::default())
            .oneshot(multipart_request("file", b"plain text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_DOCUMENT");

        let response = app(StubGenerator::default())
            .oneshot(multipart_request("other", b"plain text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "MISSING_REQUIRED_FIELD"
        );
    }
}
