//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 내부 에러 분류(`AuthError`)는 여기서 HTTP 상태 코드와
//! 클라이언트용 본문으로 변환됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::AuthError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "USERNAME_TAKEN",
///   "message": "이미 사용 중인 사용자 이름입니다",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "USERNAME_TAKEN", "NOT_LOGGED_IN")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    ///
    /// 반복 요청 간에 본문이 바이트 단위로 동일해야 하는 응답에
    /// 사용합니다 (로그인 실패 응답은 계정 존재 여부를 누설하지
    /// 않아야 함).
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// HTTP 응답으로 변환 가능한 에러.
///
/// 핸들러와 가드 미들웨어의 에러 타입입니다. `AuthError`의
/// 분류 체계를 상태 코드로 변환합니다:
/// 409 `UsernameTaken`, 401 `InvalidCredentials`/토큰 거부,
/// 403 `InsufficientRole`, 400 검증 실패, 500 내부 장애.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

impl ApiError {
    /// 상태 코드와 본문으로 직접 생성.
    pub fn new(status: StatusCode, body: ApiErrorResponse) -> Self {
        Self { status, body }
    }

    /// DTO 검증 실패 → 400.
    pub fn validation(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorResponse::with_details(
                "VALIDATION_ERROR",
                "요청 본문이 유효하지 않습니다",
                details,
            ),
        }
    }

    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 응답 본문.
    pub fn body(&self) -> &ApiErrorResponse {
        &self.body
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // 로그인 실패 본문은 타임스탬프 없이 고정 - 존재하지 않는
        // 사용자와 잘못된 비밀번호가 동일한 바이트를 반환해야 함.
        // AuthError의 Display는 내부 상세를 노출하지 않는다.
        let body = match &err {
            AuthError::InvalidCredentials => {
                ApiErrorResponse::simple(err.code(), err.to_string())
            }
            _ => ApiErrorResponse::new(err.code(), err.to_string()),
        };

        Self { status, body }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(AuthError::UsernameTaken).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::ExpiredToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InsufficientRole).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::Internal("x".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_credentials_body_is_deterministic() {
        // 존재하지 않는 사용자와 잘못된 비밀번호는 같은 AuthError를
        // 거치므로, 본문 직렬화가 결정적이면 응답도 바이트 동일
        let a = ApiError::from(AuthError::InvalidCredentials);
        let b = ApiError::from(AuthError::InvalidCredentials);

        let json_a = serde_json::to_string(a.body()).unwrap();
        let json_b = serde_json::to_string(b.body()).unwrap();
        assert_eq!(json_a, json_b);
        assert!(!json_a.contains("timestamp"));
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = ApiError::from(AuthError::Internal("pool exhausted".to_string()));
        let json = serde_json::to_string(err.body()).unwrap();
        assert!(!json.contains("pool exhausted"));
    }

    #[test]
    fn test_simple_body_has_no_timestamp() {
        let body = ApiErrorResponse::simple("CODE", "msg");
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"CODE""#));
    }
}
