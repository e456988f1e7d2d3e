use crate::config::{AppConfig, CategoryStyle, MapDisplayConfig};
use crate::data::{self, DataError};
use crate::processing::{self, CategoryBucket, DatasetStats, MapState};
use crate::render;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use geojson::FeatureCollection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub struct AppState {
    pub config: AppConfig,
    /// Swapped wholesale on refresh; readers always see a complete dataset.
    pub map: RwLock<MapState>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: DatasetStats,
    pub categories: BTreeMap<String, CategoryBucket>,
}

#[derive(Serialize)]
struct ConfigResponse<'a> {
    map: &'a MapDisplayConfig,
    categories: &'a HashMap<String, CategoryStyle>,
}

/// The two user-visible failure states: the fetch/parse of the whole
/// document failed, or it succeeded but yielded no rows.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub kind: &'static str,
    pub error: String,
}

pub async fn start_server(config: AppConfig, initial: MapState) -> Result<()> {
    let port = config.server.port;
    let static_dir = config.server.static_dir.clone();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let state = Arc::new(AppState {
        config,
        map: RwLock::new(initial),
    });

    println!("Starting server on http://{}", addr);

    let app = Router::new()
        .route("/api/data", get(data_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/config", get(config_handler))
        .route("/api/refresh", post(refresh_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn data_handler(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let map = state.map.read().await;
    Json(render::feature_collection(&map))
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let map = state.map.read().await;
    Json(StatsResponse {
        stats: map.stats.clone(),
        categories: map.categories.clone(),
    })
}

async fn config_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let response = ConfigResponse {
        map: &state.config.map,
        categories: &state.config.categories,
    };
    // Serialized eagerly so the borrow doesn't outlive the handler.
    Json(serde_json::to_value(&response).unwrap_or_default())
}

/// Re-fetch the spreadsheet and rebuild the dataset. The fetch happens
/// outside the lock; the clear-and-repopulate happens under the write lock.
/// There is no concurrent-refresh guard: overlapping refreshes may apply
/// out of order.
async fn refresh_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match data::fetch_rows(&state.config.source).await {
        Ok(rows) => {
            let mut map = state.map.write().await;
            processing::rebuild(&mut map, &state.config, &rows);
            Ok(Json(StatsResponse {
                stats: map.stats.clone(),
                categories: map.categories.clone(),
            }))
        }
        Err(err) => {
            let (status, kind) = match &err {
                DataError::EmptyDataset => (StatusCode::UNPROCESSABLE_ENTITY, "empty_dataset"),
                _ => (StatusCode::BAD_GATEWAY, "fetch_failed"),
            };
            tracing::error!("Refresh failed: {}", err);
            Err((
                status,
                Json(ErrorResponse {
                    kind,
                    error: err.to_string(),
                }),
            ))
        }
    }
}
