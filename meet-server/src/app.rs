use crate::room::RoomService;
use crate::signaling::ws_handler;
use axum::extract::{MatchedPath, State};
use axum::http::Request;
use axum::routing::get;
use axum::{Json, Router};
use meet_core::IceServerConfig;
use meet_core::utils::ICE_SERVERS_PATH;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info_span;

pub struct AppState {
    pub rooms: Arc<RoomService>,
    pub ice_servers: Vec<IceServerConfig>,
}

impl AppState {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            rooms: Arc::new(RoomService::new()),
            ice_servers,
        }
    }
}

pub async fn ice_servers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<IceServerConfig>> {
    Json(state.ice_servers.clone())
}

/// Builds the relay router. When `static_dir` is set, unmatched paths are
/// served from it.
pub fn router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/ws/{room}/{name}", get(ws_handler))
        .route(ICE_SERVERS_PATH, get(ice_servers_handler))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let matched_path = request
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str);

            info_span!(
                "http_request",
                method = ?request.method(),
                matched_path,
            )
        }),
    )
}
