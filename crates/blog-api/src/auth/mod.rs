//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체
//! - [`TokenService`]: 토큰 발급/검증 서비스
//! - [`RoutePolicy`]: 라우트 → 요구 역할 매핑
//! - [`authorize`]: 라우터에 레이어로 적용하는 가드 미들웨어
//! - [`CurrentUser`]: 핸들러용 인증 사용자 추출기
//!
//! 비밀번호 해싱은 `blog_core::password`에 있습니다.

mod guard;
mod jwt;

pub use guard::{authorize, CurrentUser, GuardState, RoutePolicy};
pub use jwt::{Claims, TokenError, TokenService};
