use axum::{
    Json, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handlers::{
        handle_context, handle_home, handle_qr_generate, handle_qr_poll, handle_ranking,
        handle_related, handle_search, handle_video_detail, handle_video_stream,
    },
    state::AppState,
};
use crate::{Error, Result};

/// Create the application router.
pub fn create_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origin = cors_origin
            .parse::<HeaderValue>()
            .map_err(|e| Error::InvalidUrl(format!("CORS origin {cors_origin:?}: {e}")))?;
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/home", get(handle_home))
        .route("/api/ranking", get(handle_ranking))
        .route("/api/search", get(handle_search))
        .route("/api/context", get(handle_context))
        .route("/api/videos/{id}", get(handle_video_detail))
        .route("/api/videos/{id}/stream", get(handle_video_stream))
        .route("/api/videos/{id}/related", get(handle_related))
        .route("/api/login/qrcode", get(handle_qr_generate))
        .route("/api/login/qrcode/{key}", get(handle_qr_poll))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        service::BilibiliService,
        testing::{client_for, spawn_upstream},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn upstream() -> Router {
        Router::new()
            .route(
                "/x/web-interface/ranking/v2",
                get(|| async {
                    Json(json!({
                        "code": 0,
                        "data": { "list": [{
                            "bvid": "BV1rank", "title": "t", "pic": "http://p",
                            "owner": { "name": "up" }, "stat": { "view": 9 }, "desc": "d"
                        }] }
                    }))
                }),
            )
            .route(
                "/x/web-interface/view",
                get(|| async { Json(json!({ "code": -404, "message": "啥都木有" })) }),
            )
            .route(
                "/x/passport-login/web/qrcode/poll",
                get(|| async {
                    Json(json!({ "code": 0, "data": { "code": 86038, "message": "二维码已失效" } }))
                }),
            )
    }

    async fn app() -> Router {
        let base = spawn_upstream(upstream()).await;
        let state = AppState::new(BilibiliService::with_client(client_for(&base, 0)));
        create_router(state, "*").unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ranking_defaults() {
        let (status, body) = get_json(app().await, "/api/ranking").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "BV1rank");
        assert_eq!(body[0]["playCount"], 9);
        assert_eq!(body[0]["coverUrl"], "http://p");
    }

    #[tokio::test]
    async fn test_platform_error_response() {
        let (status, body) = get_json(app().await, "/api/videos/BV1missing").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "PLATFORM_ERROR");
        assert!(body["error"].as_str().unwrap().contains("啥都木有"));
    }

    #[tokio::test]
    async fn test_invalid_video_id() {
        let (status, body) = get_json(app().await, "/api/videos/nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_VIDEO_ID");
    }

    #[tokio::test]
    async fn test_stream_requires_cid() {
        let (status, _) = get_json(app().await, "/api/videos/BV1x/stream").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_qr_poll() {
        let (status, body) = get_json(app().await, "/api/login/qrcode/abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "EXPIRED");
        assert_eq!(body["statusMessage"], "二维码已失效");
    }

    #[tokio::test]
    async fn test_upstream_missing_route() {
        // The stand-in upstream has no search route and answers 404 with an empty body.
        let (status, body) = get_json(app().await, "/api/search?keyword=x").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_STATUS");
    }

    #[tokio::test]
    async fn test_invalid_cors_origin() {
        let state = AppState::new(BilibiliService::with_client(client_for("http://127.0.0.1:1/", 0)));
        assert!(create_router(state, "bad\norigin").is_err());
    }
}
