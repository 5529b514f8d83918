use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::AppState;
use crate::render;

#[derive(Deserialize)]
pub struct InviteQuery {
    pub code: Option<String>,
}

/// GET /invite/{code}
pub async fn by_path(State(state): State<AppState>, Path(code): Path<String>) -> Html<String> {
    render_for_code(&state, &code).await
}

/// GET /invite?code=...
pub async fn by_query(
    State(state): State<AppState>,
    Query(query): Query<InviteQuery>,
) -> Html<String> {
    match query.code {
        Some(code) => render_for_code(&state, &code).await,
        None => Html(render::error_page(&state.config, render::NO_CODE_MESSAGE)),
    }
}

async fn render_for_code(state: &AppState, code: &str) -> Html<String> {
    match state.resolver.resolve(code).await {
        Ok(Some(details)) => Html(render::invite_page(&state.config, &details)),
        // Unknown, inactive, and store-outage all render the same page;
        // which codes exist is not leaked to the visitor.
        Ok(None) => Html(render::error_page(&state.config, render::INVALID_INVITE_MESSAGE)),
        Err(e) => {
            tracing::warn!(error = %e, transient = e.is_transient(), "invite resolution failed");
            Html(render::error_page(&state.config, render::INVALID_INVITE_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use axum::Router;
    use axum::routing::get;
    use serde_json::json;
    use std::sync::Arc;
    use wishlink_social::InviteResolver;
    use wishlink_social::testing::MockStore;

    fn config() -> AppConfig {
        AppConfig {
            base_url: "https://wishlink.app".into(),
            site_name: "WishLink".into(),
            deep_link_scheme: "app.wishlink".into(),
            app_store_url: "https://apps.apple.com/app/wishlink/id000000000".into(),
            play_store_url: "https://play.google.com/store/apps/details?id=app.wishlink".into(),
        }
    }

    async fn spawn_app(mock: &MockStore) -> String {
        let state = AppState {
            resolver: Arc::new(InviteResolver::new(Arc::new(mock.client()))),
            config: config(),
        };
        let app = Router::new()
            .route("/invite", get(by_query))
            .route("/invite/{code}", get(by_path))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn seed_invite(mock: &MockStore) {
        mock.seed(
            "invite_links",
            json!({"code": "DR5XWFLB", "owner_id": "u1", "list_id": "l1", "is_active": true}),
        );
        mock.seed(
            "users",
            json!({"uid": "u1", "display_name": "Alex", "email": "alex@example.com"}),
        );
        mock.seed("lists", json!({"id": "l1", "uid": "lu1", "title": "Birthday"}));
    }

    async fn get_text(url: &str) -> String {
        let resp = reqwest::get(url).await.unwrap();
        assert!(resp.status().is_success());
        resp.text().await.unwrap()
    }

    #[tokio::test]
    async fn path_segment_code_resolves() {
        let mock = MockStore::spawn().await;
        seed_invite(&mock);
        let base = spawn_app(&mock).await;

        let html = get_text(&format!("{base}/invite/DR5XWFLB")).await;
        assert!(html.contains("Alex invited you!"));
        assert!(html.contains("app.wishlink://invite/DR5XWFLB"));
    }

    #[tokio::test]
    async fn query_param_code_resolves() {
        let mock = MockStore::spawn().await;
        seed_invite(&mock);
        let base = spawn_app(&mock).await;

        let html = get_text(&format!("{base}/invite?code=DR5XWFLB")).await;
        assert!(html.contains("Alex invited you!"));
        assert!(html.contains("&quot;Birthday&quot;"));
    }

    #[tokio::test]
    async fn lowercase_path_code_resolves_the_same_invite() {
        let mock = MockStore::spawn().await;
        seed_invite(&mock);
        let base = spawn_app(&mock).await;

        let html = get_text(&format!("{base}/invite/dr5xwflb")).await;
        assert!(html.contains("app.wishlink://invite/DR5XWFLB"));
    }

    #[tokio::test]
    async fn missing_code_renders_no_code_message() {
        let mock = MockStore::spawn().await;
        let base = spawn_app(&mock).await;

        let html = get_text(&format!("{base}/invite")).await;
        assert!(html.contains("No invite code provided."));
    }

    #[tokio::test]
    async fn unknown_code_renders_invalid_message() {
        let mock = MockStore::spawn().await;
        let base = spawn_app(&mock).await;

        let html = get_text(&format!("{base}/invite/XXXXXXXX")).await;
        assert!(html.contains("This invite link is invalid or has expired."));
    }

    #[tokio::test]
    async fn store_failure_renders_the_same_invalid_message() {
        let mock = MockStore::spawn().await;
        seed_invite(&mock);
        mock.fail_collection("invite_links");
        let base = spawn_app(&mock).await;

        // An outage must be indistinguishable from an unknown code.
        let html = get_text(&format!("{base}/invite/DR5XWFLB")).await;
        assert!(html.contains("This invite link is invalid or has expired."));
    }
}
