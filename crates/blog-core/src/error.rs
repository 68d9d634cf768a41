//! 인증 파이프라인의 에러 분류 체계.
//!
//! 모든 인증/권한 부여 코드 경로는 이 분류 체계의 종류 중
//! 하나로 종결됩니다. 내부 장애가 비구조화된 실패로 유출되지
//! 않습니다.

use thiserror::Error;

/// 인증 및 권한 부여 에러.
///
/// 네 가지 구조화된 거부 사유(`MissingToken`, `InvalidToken`,
/// `ExpiredToken`, `InsufficientRole`)는 내부적으로 정확히
/// 로깅되지만, 클라이언트에는 축약된 메시지로 전달됩니다.
/// `Internal`은 시스템 장애를 나타내며 권한 거부와 구분됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 회원가입 시 사용자 이름 중복
    #[error("이미 사용 중인 사용자 이름입니다")]
    UsernameTaken,

    /// 로그인 실패 - 존재하지 않는 사용자와 잘못된 비밀번호를
    /// 구분하지 않습니다 (계정 존재 여부 비공개)
    #[error("사용자 이름 또는 비밀번호를 확인해 주세요")]
    InvalidCredentials,

    /// Authorization 헤더에 Bearer 토큰 없음
    #[error("로그인이 필요합니다")]
    MissingToken,

    /// 서명 또는 구조가 유효하지 않은 토큰
    #[error("로그인이 필요합니다")]
    InvalidToken,

    /// 만료된 토큰
    #[error("로그인이 만료되었습니다")]
    ExpiredToken,

    /// 요구 역할 집합과 교집합 없음
    #[error("접근 권한이 없습니다")]
    InsufficientRole,

    /// 내부 장애 - 저장소 장애, 디코딩 실패 등.
    /// 상세 내용은 로그에만 남기고 클라이언트에는 노출하지 않습니다.
    #[error("문제가 발생했습니다. 관리자에게 문의하세요")]
    Internal(String),
}

/// 인증 작업을 위한 Result 타입.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// 구조화된 권한 거부 사유인지 확인합니다.
    ///
    /// `Internal`은 거부가 아닌 시스템 장애이므로 false입니다.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::ExpiredToken
                | AuthError::InsufficientRole
        )
    }

    /// 클라이언트 응답용 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingToken => "NOT_LOGGED_IN",
            AuthError::InvalidToken => "NOT_LOGGED_IN",
            AuthError::ExpiredToken => "EXPIRED_LOGIN",
            AuthError::InsufficientRole => "FORBIDDEN",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_denial() {
        assert!(AuthError::MissingToken.is_denial());
        assert!(AuthError::InvalidToken.is_denial());
        assert!(AuthError::ExpiredToken.is_denial());
        assert!(AuthError::InsufficientRole.is_denial());

        assert!(!AuthError::UsernameTaken.is_denial());
        assert!(!AuthError::InvalidCredentials.is_denial());
        assert!(!AuthError::Internal("db down".to_string()).is_denial());
    }

    #[test]
    fn test_collapsed_client_messages() {
        // 토큰 없음과 유효하지 않은 토큰은 같은 메시지로 축약
        assert_eq!(
            AuthError::MissingToken.to_string(),
            AuthError::InvalidToken.to_string()
        );
        assert_eq!(AuthError::MissingToken.code(), AuthError::InvalidToken.code());

        // 만료는 별도 메시지
        assert_ne!(
            AuthError::ExpiredToken.to_string(),
            AuthError::InvalidToken.to_string()
        );
    }

    #[test]
    fn test_internal_message_opaque() {
        // 내부 상세는 Display에 노출되지 않음
        let err = AuthError::Internal("connection pool exhausted".to_string());
        assert!(!err.to_string().contains("connection pool"));
    }
}
