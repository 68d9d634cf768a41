//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/auth/signup` - 회원가입
//! - `/api/v1/auth/signin` - 로그인
//! - `/api/v1/auth/users` - 사용자 목록 (admin/super_admin 전용)
//!
//! 라우트별 요구 역할은 라우트 등록과 나란히 [`RoutePolicy`]에
//! 선언되며, 가드 미들웨어가 요청 시점에 조회합니다.

pub mod auth;
pub mod health;

pub use auth::{
    auth_router, ListUsersQuery, SignInRequest, SignInResponse, SignUpRequest, UserResponse,
    UsersListResponse,
};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use std::sync::Arc;

use axum::{middleware, Router};
use blog_core::Role;

use crate::auth::{authorize, GuardState, RoutePolicy};
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하고 권한 부여 가드를 레이어로
/// 적용합니다. 정책에 없는 라우트는 제한이 없습니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    // 요구 역할 선언 - 라우트 등록과 같은 자리에서 유지한다
    let policy = RoutePolicy::new().require(
        "/api/v1/auth/users",
        &[Role::Admin, Role::SuperAdmin],
    );

    let guard = GuardState::new(policy, state.tokens.clone());

    Router::new()
        .nest("/health", health_router())
        .nest("/api/v1/auth", auth_router())
        .layer(middleware::from_fn_with_state(guard, authorize))
        .with_state(state)
}
