//! HTTP server for Podium.
//!
//! Thin axum adapter over the stream actor: parses requests, maps
//! [`StreamError`](podium_stream::StreamError) values to status codes,
//! relays the similarity and sentiment collaborators, and fans newly added
//! entries out to peer servers.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod upstream;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::PodiumServer;
pub use state::AppState;
pub use upstream::{HttpUpstream, NoOpUpstream, Upstream, UpstreamReply};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use podium_types::EntryView;

    use super::*;

    fn app() -> Router {
        let state = AppState::with_upstream(ServerConfig::default(), Arc::new(NoOpUpstream));
        build_router(state)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn add_returns_dense_ids_as_text() {
        let app = app();

        let response = app
            .clone()
            .oneshot(form_post("/add", "author=alice&text=Is+this+on%3F&type=q"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "0");

        let response = app
            .clone()
            .oneshot(form_post("/add", "author=bob&text=hello&type=c"))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "1");
    }

    #[tokio::test]
    async fn vote_flow_and_voted_annotation() {
        let app = app();

        app.clone()
            .oneshot(form_post("/add", "author=alice&text=question&type=q"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(form_post("/vote", "author=bob&id=0&vote=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1");

        // second vote from the same voter is a no-op
        let response = app
            .clone()
            .oneshot(form_post("/vote", "author=bob&id=0&vote=5"))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "1");

        let response = app.clone().oneshot(get("/all?author=bob")).await.unwrap();
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(views.len(), 1);
        assert!(views[0].voted);
        assert_eq!(views[0].score, 1);

        let response = app.clone().oneshot(get("/all?author=carol")).await.unwrap();
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert!(!views[0].voted);
    }

    #[tokio::test]
    async fn malformed_vote_id_is_rejected() {
        let app = app();

        let response = app
            .clone()
            .oneshot(form_post("/vote", "author=bob&id=abc&vote=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(form_post("/vote", "author=bob&vote=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vote_on_unknown_id_is_not_found() {
        let response = app()
            .oneshot(form_post("/vote", "author=bob&id=999&vote=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unparseable_vote_magnitude_defaults_to_one() {
        let app = app();

        app.clone()
            .oneshot(form_post("/add", "author=alice&text=hi&type=c"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(form_post("/vote", "author=bob&id=0&vote=banana"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1");
    }

    #[tokio::test]
    async fn blank_add_type_is_stored_as_comment() {
        let app = app();

        app.clone()
            .oneshot(form_post("/add", "author=alice&text=no+type+given"))
            .await
            .unwrap();

        let response = app.clone().oneshot(get("/all")).await.unwrap();
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(views[0].kind, podium_types::Kind::Comment);
    }

    #[tokio::test]
    async fn top_honors_kind_filter_and_ranking() {
        let app = app();

        for (text, kind) in [("q one", "q"), ("c one", "c"), ("q two", "q")] {
            app.clone()
                .oneshot(form_post(
                    "/add",
                    &format!("author=alice&text={}&type={}", text.replace(' ', "+"), kind),
                ))
                .await
                .unwrap();
        }
        // push the later question above the earlier one
        app.clone()
            .oneshot(form_post("/vote", "author=bob&id=2&vote=3"))
            .await
            .unwrap();

        let response = app.clone().oneshot(get("/top?type=q")).await.unwrap();
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].score, 3);
        assert_eq!(views[0].text, "q two");
        assert_eq!(views[1].text, "q one");

        let response = app.clone().oneshot(get("/top")).await.unwrap();
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(views.len(), 3);
    }

    #[tokio::test]
    async fn recent_includes_a_fresh_entry() {
        let app = app();

        app.clone()
            .oneshot(form_post("/add", "author=alice&text=just+now&type=c"))
            .await
            .unwrap();

        let response = app.clone().oneshot(get("/recent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let views: Vec<EntryView> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].text, "just now");
    }

    #[tokio::test]
    async fn unconfigured_similarity_is_bad_gateway() {
        let response = app().oneshot(get("/similar?text=hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
