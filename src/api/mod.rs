// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{verify_token, LoginForm, Principal},
    models::JoinRequest,
    state::AppState,
};

pub mod health;
pub mod join;
pub mod login;
pub mod main_page;

pub fn router(state: AppState) -> Router {
    // Token filter only wraps the routes that read the principal
    let protected = Router::new()
        .route("/", get(main_page::main_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), verify_token));

    let public = Router::new()
        .route("/login", post(login::login))
        .route("/join", post(join::join))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        join::join,
        main_page::main_page,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            LoginForm,
            JoinRequest,
            Principal,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and registration"),
        (name = "Main", description = "Authenticated identity"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::new);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SigningSecret, TokenCodec};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-please-use-32-bytes+";

    fn app() -> (Router, AppState) {
        let state = AppState::with_secret(SigningSecret::new(SECRET).unwrap());
        (router(state.clone()), state)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_root(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (app, _) = app();
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn join_login_and_read_identity() {
        let (app, _) = app();

        let response = send(&app, form_post("/join", "username=alice&password=correct+horse")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");

        let response = send(&app, form_post("/login", "username=alice&password=correct+horse")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let auth_header = response.headers()[header::AUTHORIZATION]
            .to_str()
            .unwrap()
            .to_string();
        let token = auth_header.strip_prefix("Bearer ").unwrap();

        let response = send(&app, get_root(Some(token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Main ControlleraliceROLE_USER");
    }

    #[tokio::test]
    async fn login_failures_look_the_same() {
        let (app, _) = app();
        send(&app, form_post("/join", "username=alice&password=pw")).await;

        for body in [
            "username=alice&password=wrong",
            "username=nobody&password=pw",
            "username=alice",
            "",
        ] {
            let response = send(&app, form_post("/login", body)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "body {body:?}");
            assert!(response.headers().get(header::AUTHORIZATION).is_none());
            assert!(body_string(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn duplicate_join_is_conflict() {
        let (app, _) = app();
        send(&app, form_post("/join", "username=alice&password=pw")).await;

        let response = send(&app, form_post("/join", "username=alice&password=pw2")).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn root_requires_token() {
        let (app, _) = app();
        let response = send(&app, get_root(None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error_code"], "unauthenticated");
    }

    #[tokio::test]
    async fn root_rejects_foreign_and_garbage_tokens() {
        let (app, _) = app();
        let foreign = TokenCodec::new(SigningSecret::new("another-secret-that-is-32-bytes!").unwrap())
            .issue("alice", "ROLE_ADMIN", chrono::Duration::hours(1))
            .unwrap();

        let response = send(&app, get_root(Some(&foreign))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error_code"], "invalid_signature");

        let response = send(&app, get_root(Some("a.b"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error_code"], "malformed_token");
    }

    #[tokio::test]
    async fn token_from_state_codec_is_accepted() {
        let (app, state) = app();
        let token = state
            .codec
            .issue("bob", "ROLE_ADMIN", chrono::Duration::minutes(5))
            .unwrap();

        let response = send(&app, get_root(Some(&token))).await;
        assert_eq!(body_string(response).await, "Main ControllerbobROLE_ADMIN");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (app, _) = app();
        let response = send(
            &app,
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn openapi_lists_public_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/login", "/join", "/", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer")));
    }
}
