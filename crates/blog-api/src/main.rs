//! 블로그 백엔드 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 회원가입/로그인, 역할 기반 접근 제어, 헬스 체크 엔드포인트를
//! 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use blog_api::auth::TokenService;
use blog_api::openapi::swagger_ui_router;
use blog_api::repository::PgUserStore;
use blog_api::routes::create_api_router;
use blog_api::services::AuthService;
use blog_api::state::AppState;
use blog_core::config::{AuthConfig, DatabaseConfig, ServerConfig};
use blog_core::logging::init_logging_from_env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging_from_env().map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    // 설정은 시작 시 한 번 로드. 서명 비밀 키 부재는 여기서
    // 치명적 에러로 종결되며 요청별 실패로 미루지 않는다.
    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&db_config.url)
        .await?;
    info!("Connected to PostgreSQL");

    let tokens = TokenService::from_config(&auth_config);
    let store = Arc::new(PgUserStore::new(pool.clone()));
    let auth = AuthService::new(store, tokens.clone())
        .map_err(|e| anyhow::anyhow!("인증 서비스 초기화 실패: {e}"))?;

    let state = Arc::new(AppState::new(auth, tokens, Some(pool)));
    info!(token_ttl_hours = auth_config.token_ttl_hours, "Application state initialized");

    let app = create_api_router(state)
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer());

    let addr = server_config.socket_addr()?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://blog.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 서버 종료를 시작합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
