//! ゲートウェイHTTPサーバー
//!
//! ステートレス: 1リクエストにつき外部呼び出しは1回。キャッシュ・再試行なし。

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{handler, AnthropicClient, GatewayError, VisionModel};

/// 5 MiB の画像をbase64にしても収まるサイズ
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<dyn VisionModel>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, model: Arc<dyn VisionModel>) -> Self {
        Self {
            config: Arc::new(config),
            model,
            startup_time: Utc::now(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/analyze-photo", post(handler::analyze_photo))
        .route("/health", get(handler::health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if let Some(dir) = state.config.static_dir.as_ref() {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// 想定外のパニックは InternalFailure として返す
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "handler panicked");
    GatewayError::Internal(detail).into_response()
}

/// サーバーを起動
pub async fn serve(config: Config) -> Result<()> {
    if !config.is_configured() {
        warn!("model credentials are incomplete; /api/analyze-photo will return 500");
    }

    let model = AnthropicClient::new(&config)
        .map_err(|e| crate::error::CircleGridError::Config(e.to_string()))?;
    let bind_addr = config.bind_addr.clone();
    if let Some(dir) = config.static_dir.as_ref() {
        info!("Serving UI from {}", dir.display());
    }

    let app = build_router(AppState::new(config, Arc::new(model)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
