// rest/mod.rs — Public REST API server.
//
// Axum HTTP server bridging the task board HTTP contract to the in-memory
// store, plus static serving for the bundled frontend.
//
// Endpoints:
//   POST   /tasks
//   GET    /tasks
//   PATCH  /tasks/{id}/complete
//   PATCH  /tasks/{id}
//   DELETE /tasks/{id}
//   GET    /health
//   GET    /assets/*            (when the frontend build exists)
//   GET    /  + SPA fallback    (app shell, or a "not built" placeholder)

pub mod routes;
pub mod spa;

use anyhow::Result;
use axum::{
    routing::{get, patch},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let router = Router::new()
        // Health (no frontend involvement)
        .route("/health", get(routes::health::health))
        // Tasks
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            patch(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route("/tasks/{id}/complete", patch(routes::tasks::toggle_complete))
        // Bundled frontend
        .route("/", get(spa::serve_root));

    spa::mount(router, &ctx.config.static_dir)
        // Dev frontends run on a separate origin.
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
