//! 인증 흐름.
//!
//! 회원가입(해싱 + 저장)과 로그인(자격증명 검증 + 토큰 발급)을
//! 오케스트레이션합니다. Argon2 해싱은 CPU 집약적이므로
//! blocking 태스크로 넘겨 다른 동시 요청을 막지 않습니다.

use std::sync::Arc;

use blog_core::{hash_password, verify_password, AuthError, NewUser, PasswordError, Role, User};
use tracing::{debug, info, warn};

use crate::auth::TokenService;
use crate::repository::{UserStore, UserStoreError};

/// 로그인 성공 결과.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// 발급된 Access Token
    pub access_token: String,
}

/// 인증 서비스.
///
/// 요청별 가변 상태를 갖지 않으며, 공유 가변 자원은 자격증명
/// 저장소뿐입니다 (일관성은 저장소의 제약에 위임).
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
    /// 존재하지 않는 사용자 로그인 시에도 동일 비용의 검증을
    /// 수행하기 위한 더미 해시. 계정 존재 여부가 응답 시간으로
    /// 누설되지 않아야 한다.
    dummy_hash: String,
}

impl AuthService {
    /// 새 인증 서비스 생성.
    ///
    /// # Errors
    ///
    /// 더미 해시 생성이 실패하면 `PasswordError`를 반환합니다.
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Result<Self, PasswordError> {
        let dummy_hash = hash_password("invalid-credentials-placeholder")?;

        Ok(Self {
            store,
            tokens,
            dummy_hash,
        })
    }

    /// 회원가입.
    ///
    /// 비밀번호를 해싱하고 사용자를 저장합니다. `roles`가 없으면
    /// 기본 역할(`user`)이 부여됩니다.
    ///
    /// # Errors
    ///
    /// - `AuthError::UsernameTaken`: 사용자 이름 중복
    /// - `AuthError::Internal`: 그 외 저장소/해싱 장애
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        roles: Option<Vec<Role>>,
    ) -> Result<User, AuthError> {
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("해싱 태스크 실패: {e}")))?
            .map_err(|e| AuthError::Internal(format!("비밀번호 해싱 실패: {e}")))?;

        let input = NewUser::new(username, password_hash, roles.unwrap_or_default());

        let user = self.store.create_user(input).await.map_err(|e| match e {
            UserStoreError::UsernameTaken => AuthError::UsernameTaken,
            UserStoreError::Database(detail) => AuthError::Internal(detail),
        })?;

        info!(user = %user.username, roles = ?user.roles, "user signed up");
        Ok(user)
    }

    /// 로그인.
    ///
    /// 존재하지 않는 사용자와 잘못된 비밀번호는 단일한
    /// `AuthError::InvalidCredentials`로 귀결됩니다 - 메시지와
    /// 타이밍 어느 쪽으로도 계정 존재 여부를 드러내지 않습니다.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SignInOutcome, AuthError> {
        let found = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // 계정이 없어도 더미 해시에 대해 검증을 수행한다
        let stored_hash = found
            .as_ref()
            .map(|user| user.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());

        let candidate = password.to_owned();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
                .await
                .map_err(|e| AuthError::Internal(format!("검증 태스크 실패: {e}")))?;

        let user = match (found, verified) {
            (Some(user), Ok(())) => user,
            _ => {
                warn!(username, "sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let access_token = self
            .tokens
            .issue(&user)
            .map_err(|e| AuthError::Internal(format!("토큰 발급 실패: {e}")))?;

        // 진단 전용 디코딩 - 인가 결정에는 사용되지 않는다
        if let Some(claims) = TokenService::decode_unverified(&access_token) {
            debug!(sub = %claims.sub, exp = claims.exp, "issued token payload");
        }

        info!(user = %user.username, "user signed in");
        Ok(SignInOutcome { access_token })
    }

    /// 사용자 목록 조회.
    pub async fn list_users(&self, skip: i64, take: i64) -> Result<Vec<User>, AuthError> {
        self.store
            .list_users(skip, take)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserStore;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn test_service() -> (AuthService, TokenService) {
        let tokens = TokenService::new(TEST_SECRET, 10);
        let store = Arc::new(InMemoryUserStore::new());
        let service = AuthService::new(store, tokens.clone()).unwrap();
        (service, tokens)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let (service, tokens) = test_service();

        service
            .sign_up("alice", "CorrectHorse1", None)
            .await
            .unwrap();

        let outcome = service.sign_in("alice", "CorrectHorse1").await.unwrap();

        // 발급된 토큰의 페이로드가 로그인한 사용자와 일치
        let claims = tokens.verify(&outcome.access_token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.roles, vec![Role::User]);
    }

    #[tokio::test]
    async fn test_sign_up_defaults_to_user_role() {
        let (service, _) = test_service();

        let user = service.sign_up("bob", "Password123", None).await.unwrap();
        assert_eq!(user.roles, vec![Role::User]);
    }

    #[tokio::test]
    async fn test_sign_up_with_explicit_roles() {
        let (service, _) = test_service();

        let user = service
            .sign_up("carol", "Password123", Some(vec![Role::Admin]))
            .await
            .unwrap();
        assert_eq!(user.roles, vec![Role::Admin]);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_fails() {
        let (service, _) = test_service();

        service.sign_up("dave", "Password123", None).await.unwrap();

        // 비밀번호가 다르더라도 두 번째 가입은 실패
        let result = service.sign_up("dave", "OtherPassword9", None).await;
        assert_eq!(result.unwrap_err(), AuthError::UsernameTaken);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let (service, _) = test_service();

        service.sign_up("erin", "Password123", None).await.unwrap();

        let result = service.sign_in("erin", "WrongPassword1").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let (service, _) = test_service();

        service.sign_up("frank", "Password123", None).await.unwrap();

        // 존재하는 사용자 + 잘못된 비밀번호
        let wrong_password = service.sign_in("frank", "WrongPassword1").await.unwrap_err();
        // 존재하지 않는 사용자
        let unknown_user = service.sign_in("nobody", "WrongPassword1").await.unwrap_err();

        // 두 실패는 같은 에러 종류이며 클라이언트 본문도 동일하다
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
    }
}
