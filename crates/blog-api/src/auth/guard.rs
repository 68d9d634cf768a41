//! 역할 권한 부여 가드.
//!
//! 요청별 상태 기계로, Allow 또는 Deny로 종결됩니다:
//!
//! 1. 매칭된 라우트의 요구 역할 집합 조회. 미선언 → Allow (토큰 불필요)
//! 2. Bearer 토큰 추출. 부재 → Deny (`MissingToken`)
//! 3. 토큰 검증. 만료 → Deny (`ExpiredToken`), 서명/구조 불량 → Deny (`InvalidToken`)
//! 4. 보유 역할과 요구 역할의 교집합이 비어 있지 않으면 Allow,
//!    아니면 Deny (`InsufficientRole`)
//!
//! 모든 결정은 감사 추적을 위해 사용자 이름, 라우트, 요구 역할,
//! 보유 역할, 결과와 함께 로깅됩니다. 가드 자체의 내부 장애는
//! 네 가지 구조화된 거부 사유와 구분되는 일반 거부로 축약됩니다.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use blog_core::{AuthError, Role};
use tracing::{error, info, warn};

use super::jwt::{Claims, TokenError, TokenService};
use crate::error::ApiError;

/// 라우트별 요구 역할 매핑.
///
/// 라우트 등록 시점에 선언적으로 구성되며 요청 시점에는 읽기
/// 전용입니다. 매핑에 없는 라우트는 제한이 없는 것으로
/// 취급됩니다.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    requirements: HashMap<String, Vec<Role>>,
}

impl RoutePolicy {
    /// 빈 정책 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 라우트에 요구 역할 집합을 선언.
    ///
    /// `route`는 Axum 라우트 템플릿 문자열입니다
    /// (예: `/api/v1/auth/users`).
    #[must_use]
    pub fn require(mut self, route: impl Into<String>, roles: &[Role]) -> Self {
        self.requirements.insert(route.into(), roles.to_vec());
        self
    }

    /// 라우트의 요구 역할 집합 조회.
    pub fn required_roles(&self, route: &str) -> Option<&[Role]> {
        self.requirements.get(route).map(Vec::as_slice)
    }
}

/// 가드 미들웨어 상태.
///
/// 정책과 토큰 서비스는 프로세스 전역으로 공유되며 요청별
/// 가변 상태는 없습니다.
#[derive(Clone)]
pub struct GuardState {
    policy: Arc<RoutePolicy>,
    tokens: TokenService,
}

impl GuardState {
    pub fn new(policy: RoutePolicy, tokens: TokenService) -> Self {
        Self {
            policy: Arc::new(policy),
            tokens,
        }
    }
}

/// 요청별 가드 결정.
enum Decision {
    /// 접근 허용. 검증된 토큰이 있으면 Claims 포함.
    Allow(Option<Claims>),
    /// 접근 거부. 토큰이 검증까지 통과한 경우 (역할 부족)
    /// 감사 로그용 Claims를 함께 보존.
    Deny {
        reason: AuthError,
        claims: Option<Claims>,
    },
}

/// 가드 결정 로직.
///
/// (요구 역할, Bearer 토큰, 토큰 서비스)에 대한 순수 함수입니다.
fn evaluate(tokens: &TokenService, required: Option<&[Role]>, bearer: Option<&str>) -> Decision {
    // 1. 요구 역할 미선언 → 토큰 없이도 허용
    let Some(required) = required else {
        return Decision::Allow(None);
    };

    // 2. Bearer 토큰 부재
    let Some(token) = bearer else {
        return Decision::Deny {
            reason: AuthError::MissingToken,
            claims: None,
        };
    };

    // 3. 서명 + 만료 검증
    let claims = match tokens.verify(token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            return Decision::Deny {
                reason: AuthError::ExpiredToken,
                claims: None,
            }
        }
        Err(_) => {
            return Decision::Deny {
                reason: AuthError::InvalidToken,
                claims: None,
            }
        }
    };

    // 4. 역할 집합 비교 - 요구 역할 중 하나라도 보유하면 충분
    if Role::intersects(&claims.roles, required) {
        Decision::Allow(Some(claims))
    } else {
        Decision::Deny {
            reason: AuthError::InsufficientRole,
            claims: Some(claims),
        }
    }
}

/// Authorization 헤더에서 Bearer 토큰 추출.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 권한 부여 미들웨어.
///
/// 라우터 전체에 레이어로 적용되며, 매칭된 라우트 템플릿으로
/// 정책을 조회합니다. 허용 시 검증된 [`Claims`]를 요청 확장에
/// 삽입하여 핸들러가 [`CurrentUser`]로 꺼낼 수 있게 합니다.
pub async fn authorize(
    State(guard): State<GuardState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let required = guard.policy.required_roles(&route);

    match evaluate(&guard.tokens, required, bearer_token(request.headers())) {
        Decision::Allow(maybe_claims) => {
            if let Some(claims) = maybe_claims {
                info!(
                    user = %claims.username,
                    route = %route,
                    required = ?required,
                    held = ?claims.roles,
                    allowed = true,
                    "authorization decision"
                );
                request.extensions_mut().insert(claims);
            }
            Ok(next.run(request).await)
        }
        Decision::Deny { reason, claims } => {
            let username = claims
                .as_ref()
                .map(|c| c.username.as_str())
                .unwrap_or("anonymous");

            if let AuthError::Internal(detail) = &reason {
                error!(route = %route, detail = %detail, "guard internal fault");
            } else {
                warn!(
                    user = %username,
                    route = %route,
                    required = ?required,
                    held = ?claims.as_ref().map(|c| &c.roles),
                    allowed = false,
                    reason = reason.code(),
                    "authorization decision"
                );
            }

            Err(ApiError::from(reason))
        }
    }
}

/// 인증된 사용자 추출기.
///
/// 가드가 요청 확장에 삽입한 검증 완료 Claims를 핸들러에서
/// 꺼냅니다. 가드를 거치지 않은 라우트에서 사용하면 내부
/// 장애로 처리됩니다 - 검증 없는 신원은 존재하지 않습니다.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                ApiError::from(AuthError::Internal(
                    "인증 컨텍스트가 없는 라우트에서 CurrentUser 요청".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::User;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn token_for(service: &TokenService, roles: Vec<Role>, ttl_secs: i64) -> String {
        let user = User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            password_hash: String::new(),
            roles,
            created_at: Utc::now(),
        };
        service
            .issue_with_ttl(&user, Duration::seconds(ttl_secs))
            .unwrap()
    }

    fn deny_reason(decision: Decision) -> AuthError {
        match decision {
            Decision::Deny { reason, .. } => reason,
            Decision::Allow(_) => panic!("expected deny"),
        }
    }

    #[test]
    fn test_no_requirement_allows_without_token() {
        let service = TokenService::new(TEST_SECRET, 10);
        assert!(matches!(
            evaluate(&service, None, None),
            Decision::Allow(None)
        ));
    }

    #[test]
    fn test_missing_token_denied() {
        let service = TokenService::new(TEST_SECRET, 10);
        let required = [Role::Admin];
        assert_eq!(
            deny_reason(evaluate(&service, Some(&required), None)),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_insufficient_role_denied() {
        let service = TokenService::new(TEST_SECRET, 10);
        let required = [Role::Admin, Role::SuperAdmin];
        let token = token_for(&service, vec![Role::User], 600);

        assert_eq!(
            deny_reason(evaluate(&service, Some(&required), Some(&token))),
            AuthError::InsufficientRole
        );
    }

    #[test]
    fn test_any_required_role_suffices() {
        let service = TokenService::new(TEST_SECRET, 10);
        let required = [Role::Admin, Role::SuperAdmin];
        let token = token_for(&service, vec![Role::Admin], 600);

        assert!(matches!(
            evaluate(&service, Some(&required), Some(&token)),
            Decision::Allow(Some(_))
        ));
    }

    #[test]
    fn test_expired_token_denied_before_role_check() {
        let service = TokenService::new(TEST_SECRET, 10);
        let required = [Role::Admin];

        // 올바른 역할을 보유했지만 1초 전에 만료된 토큰
        let token = token_for(&service, vec![Role::Admin], -1);

        assert_eq!(
            deny_reason(evaluate(&service, Some(&required), Some(&token))),
            AuthError::ExpiredToken
        );
    }

    #[test]
    fn test_tampered_token_denied_as_invalid() {
        let service = TokenService::new(TEST_SECRET, 10);
        let required = [Role::Admin];
        let mut token = token_for(&service, vec![Role::Admin], 600);
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(
            deny_reason(evaluate(&service, Some(&required), Some(&token))),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        // Bearer 접두사가 없으면 토큰 부재로 취급
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_route_policy_lookup() {
        let policy = RoutePolicy::new()
            .require("/api/v1/auth/users", &[Role::Admin, Role::SuperAdmin]);

        assert_eq!(
            policy.required_roles("/api/v1/auth/users"),
            Some(&[Role::Admin, Role::SuperAdmin][..])
        );
        assert_eq!(policy.required_roles("/api/v1/auth/signin"), None);
    }
}
