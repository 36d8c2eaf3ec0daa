pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use mergington_core::ActivityStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(store: ActivityStore) -> Router {
    let app_state = state::AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::root))
        // Activities
        .route("/activities", get(routes::activities::list_activities))
        .route(
            "/activities/{name}/signup",
            post(routes::activities::signup),
        )
        .route(
            "/activities/{name}/unregister",
            delete(routes::activities::unregister),
        )
        // Frontend
        .route("/static/{*path}", get(embed::static_handler))
        .fallback(routes::index::not_found)
        .method_not_allowed_fallback(routes::index::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Serve on a pre-bound listener.
///
/// Accepting a bound `TcpListener` lets the caller read the actual port
/// before starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    store: ActivityStore,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(store);
    let url = format!("http://localhost:{actual_port}");

    tracing::info!("Mergington activities listening on {url}");

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open browser: {e}");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
