pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session & document editing
        .route("/api/v1/templates", get(editor::handle_list_templates))
        .route("/api/v1/session", get(editor::handle_get_session))
        .route("/api/v1/resume", patch(editor::handle_update_profile))
        .route(
            "/api/v1/resume/experience",
            post(editor::handle_add_experience),
        )
        .route(
            "/api/v1/resume/experience/:id",
            patch(editor::handle_update_experience).delete(editor::handle_remove_experience),
        )
        .route(
            "/api/v1/resume/education",
            post(editor::handle_add_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            patch(editor::handle_update_education).delete(editor::handle_remove_education),
        )
        .route("/api/v1/resume/skills", post(editor::handle_add_skill))
        .route(
            "/api/v1/resume/skills/:index",
            delete(editor::handle_remove_skill),
        )
        .route("/api/v1/resume/links", post(editor::handle_add_link))
        .route(
            "/api/v1/resume/links/:index",
            patch(editor::handle_update_link).delete(editor::handle_remove_link),
        )
        .route("/api/v1/template", put(editor::handle_select_template))
        .route("/api/v1/subscription", put(editor::handle_set_subscription))
        .route("/api/v1/preview", get(editor::handle_preview))
        // Assistants
        .route("/api/v1/skills/suggest", get(skills::handle_suggest))
        .route(
            "/api/v1/generate/cover-letter",
            post(generation::handle_cover_letter),
        )
        .route("/api/v1/generate/email", post(generation::handle_email))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::editor::session::Session;
    use crate::export::pdf::LopdfAssembler;
    use crate::export::pipeline::ExportPipeline;
    use crate::export::raster::InkRasterizer;
    use crate::storage::memory::MemoryStore;
    use crate::storage::persistence::{self, KEY_FREE};
    use crate::storage::KeyValueStore;

    fn test_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let pipeline = ExportPipeline::new(Arc::new(InkRasterizer), Arc::new(LopdfAssembler))
            .with_settle_delay(Duration::ZERO);
        let state = AppState::new(Session::fresh(1), store.clone(), pipeline);
        (state, store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "cvcraft");
    }

    #[tokio::test]
    async fn test_template_catalogue() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(&app, "GET", "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["minimal", "sidebar", "elegant", "slateShade", "indigoHeader", "cards", "compactTwoCol"]
        );
    }

    #[tokio::test]
    async fn test_add_then_remove_experience_round_trip() {
        let (state, store) = test_state();
        let app = build_router(state);
        let (_, before) = send_json(&app, "GET", "/api/v1/session", None).await;

        let (status, created) = send_json(&app, "POST", "/api/v1/resume/experience", None).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(
            created["session"]["document"]["experience"].as_array().unwrap().len(),
            3
        );

        let (status, after) =
            send_json(&app, "DELETE", &format!("/api/v1/resume/experience/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(after["document"]["experience"], before["document"]["experience"]);

        let persisted = persistence::load(store.as_ref()).await.apply(Session::fresh(1));
        assert_eq!(persisted.document.experience.len(), 2, "edits must be persisted");
    }

    #[tokio::test]
    async fn test_unknown_entry_is_not_found() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(
            &app,
            "PATCH",
            "/api/v1/resume/experience/missing",
            Some(json!({"title": "X"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send_json(&app, "DELETE", "/api/v1/resume/skills/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_patch_and_skill_add() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(
            &app,
            "PATCH",
            "/api/v1/resume",
            Some(json!({"name": "Asha Rao"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["name"], "Asha Rao");
        assert_eq!(body["document"]["role"], "Operations & E-commerce Manager");

        let (_, body) = send_json(
            &app,
            "POST",
            "/api/v1/resume/skills",
            Some(json!({"skill": "  Tableau "})),
        )
        .await;
        let skills = body["document"]["skills"].as_array().unwrap();
        assert_eq!(skills.last().unwrap(), "Tableau");

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/v1/resume/skills",
            Some(json!({"skill": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_rejects_unknown_template() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, _) = send_json(&app, "GET", "/api/v1/preview?template=fancy", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, body) = send_json(&app, "GET", "/api/v1/preview?template=cards", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "cards");
    }

    #[tokio::test]
    async fn test_skill_suggestions() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(&app, "GET", "/api/v1/skills/suggest?q=exc", None).await;
        assert_eq!(status, StatusCode::OK);
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!(suggestions.len() <= 10);
        assert!(suggestions.iter().any(|s| s.as_str().unwrap().contains("Excel")));
    }

    #[tokio::test]
    async fn test_cover_letter_fallbacks() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/v1/generate/cover-letter",
            Some(json!({"job_title": "", "company": "", "tone": "formal"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let text = body["text"].as_str().unwrap();
        assert!(text.contains("your organization"));
        assert!(text.ends_with("Your Name"));
    }

    #[tokio::test]
    async fn test_email_uses_company_team() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (_, body) = send_json(
            &app,
            "POST",
            "/api/v1/generate/email",
            Some(json!({"job_title": "Ops Lead", "company": "Acme"})),
        )
        .await;
        assert!(body["text"].as_str().unwrap().contains("Hi Acme Team,"));
    }

    #[tokio::test]
    async fn test_export_consumes_credit_then_requires_payment() {
        let (state, store) = test_state();
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        let pages: usize = response.headers()["x-export-pages"]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(pages >= 1);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        assert_eq!(state.snapshot().await.gating.free_exports_remaining, 0);
        assert_eq!(store.get(KEY_FREE).await.unwrap().as_deref(), Some("0"));

        let (status, body) =
            send_json(&app, "POST", "/api/v1/export", Some(json!({"confirm_payment": false}))).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            body["error"]["message"],
            "You've used your free download. Pay ₹5 for this download? (simulation)"
        );

        let (status, _) =
            send(&app, "POST", "/api/v1/export", Some(json!({"confirm_payment": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.snapshot().await.gating.free_exports_remaining, 0);
    }

    #[tokio::test]
    async fn test_premium_export_needs_payment_and_keeps_credit() {
        let (state, _) = test_state();
        let app = build_router(state.clone());
        send_json(&app, "PUT", "/api/v1/template", Some(json!({"template": "elegant"}))).await;

        let (status, body) = send_json(&app, "POST", "/api/v1/export", None).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            body["error"]["message"],
            "This is a premium template. Pay ₹10 to download? (simulation)"
        );

        let (status, _) =
            send(&app, "POST", "/api/v1/export", Some(json!({"confirm_payment": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.snapshot().await.gating.free_exports_remaining, 1);
    }

    #[tokio::test]
    async fn test_malformed_export_body_is_rejected() {
        let (state, _) = test_state();
        let app = build_router(state.clone());
        for raw in ["{\"confirm_payment\": tru", "{\"confirm_payment\": \"yes\"}"] {
            let request = Request::builder()
                .method("POST")
                .uri("/api/v1/export")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {raw:?}");
        }
        assert_eq!(state.snapshot().await.gating.free_exports_remaining, 1);
    }

    #[tokio::test]
    async fn test_export_while_in_flight_conflicts() {
        let (state, _) = test_state();
        let app = build_router(state.clone());
        let _permit = state.export.try_begin().unwrap();
        let (status, body) = send_json(&app, "POST", "/api/v1/export", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }
}
