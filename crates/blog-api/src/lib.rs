//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원가입/로그인/사용자 관리)
//! - JWT 인증 및 역할 기반 권한 부여 가드
//! - 헬스 체크 엔드포인트
//! - OpenAPI 문서 및 Swagger UI
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트 및 라우트 정책
//! - [`auth`]: JWT 토큰 서비스 및 권한 부여 가드
//! - [`services`]: 인증 흐름 오케스트레이션
//! - [`repository`]: 자격증명 저장소
//! - [`error`]: 통합 API 에러 응답
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{authorize, Claims, CurrentUser, GuardState, RoutePolicy, TokenService};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use openapi::swagger_ui_router;
pub use repository::{PgUserStore, UserStore, UserStoreError};
pub use routes::create_api_router;
pub use services::{AuthService, SignInOutcome};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
