// rest/spa.rs — Bundled frontend serving.
//
// /assets/* serves the build's hashed static files; every other unmatched GET
// returns the app shell (index.html) so client-side routing works. API-shaped
// paths never fall through to the shell.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use crate::AppContext;

/// Attach static-asset serving and the SPA fallback to the router.
pub fn mount(router: Router<Arc<AppContext>>, static_dir: &Path) -> Router<Arc<AppContext>> {
    let assets = static_dir.join("assets");
    let router = if assets.is_dir() {
        info!(dir = %assets.display(), "serving frontend assets");
        router.nest_service("/assets", ServeDir::new(assets))
    } else {
        router
    };
    router.fallback(serve_spa)
}

/// `GET /` — the app shell, or an API banner when no build is present.
pub async fn serve_root(State(ctx): State<Arc<AppContext>>) -> Response {
    match read_index(&ctx).await {
        Some(html) => Html(html).into_response(),
        None => Json(json!({
            "message": format!("Task Board API v{} - Frontend not built", env!("CARGO_PKG_VERSION"))
        }))
        .into_response(),
    }
}

/// Catch-all — the app shell for client-side routes, 404 for API-shaped paths.
pub async fn serve_spa(State(ctx): State<Arc<AppContext>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path.starts_with("api/")
        || path.starts_with("tasks")
        || path.starts_with("docs")
        || path.starts_with("openapi")
    {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    }

    match read_index(&ctx).await {
        Some(html) => Html(html).into_response(),
        None => Json(json!({
            "message": "Frontend not built. Run 'npm run build' in frontend folder."
        }))
        .into_response(),
    }
}

async fn read_index(ctx: &AppContext) -> Option<String> {
    let index = ctx.config.static_dir.join("index.html");
    tokio::fs::read_to_string(&index).await.ok()
}
