//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 요청별 가변 상태는 없으며, 유일한 공유 가변 자원은
//! 데이터베이스 연결 풀입니다.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::services::AuthService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 인증 서비스 - 회원가입/로그인 오케스트레이션
    pub auth: AuthService,

    /// 토큰 발급/검증 서비스 (가드 미들웨어와 공유)
    pub tokens: TokenService,

    /// 데이터베이스 연결 풀 (PostgreSQL) - 헬스 체크용.
    /// 인메모리 저장소로 구동되는 테스트에서는 None.
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    /// 새 애플리케이션 상태 생성.
    pub fn new(auth: AuthService, tokens: TokenService, db_pool: Option<sqlx::PgPool>) -> Self {
        Self {
            auth,
            tokens,
            db_pool,
        }
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => sqlx::query("SELECT 1").fetch_one(pool).await.is_ok(),
            None => false,
        }
    }
}

/// 테스트용 애플리케이션 상태 생성.
///
/// 인메모리 사용자 저장소와 고정 테스트 비밀 키를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> Arc<AppState> {
    use crate::repository::InMemoryUserStore;

    let tokens = TokenService::new("test-secret-key-for-jwt-testing-minimum-32-chars", 10);
    let store = Arc::new(InMemoryUserStore::new());
    let auth = AuthService::new(store, tokens.clone()).expect("test auth service");

    Arc::new(AppState::new(auth, tokens, None))
}
