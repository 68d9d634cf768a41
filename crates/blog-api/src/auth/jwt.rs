//! JWT 토큰 처리.
//!
//! Access Token 발급 및 검증 로직. 서명 비밀 키는 프로세스
//! 시작 시 설정에서 주입되며 회전은 모델링하지 않습니다.

use blog_core::{config::AuthConfig, Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT Access Token 페이로드.
///
/// 사용자 신원과 보유 역할 집합을 포함합니다. 발급 이후
/// 페이로드는 불변이며, 만료는 발급 시점이 아닌 검증 시점에
/// 강제됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이름
    pub username: String,
    /// 발급 시점의 보유 역할 집합
    pub roles: Vec<Role>,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// 동일한 페이로드, 발급 시각, 비밀 키에 대해 발급은
    /// 결정적입니다 (nonce 없음).
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        roles: Vec<Role>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.into(),
            username: username.into(),
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// JWT 토큰 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패")]
    Encoding,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("잘못된 토큰 형식 또는 서명")]
    Malformed,
}

/// 토큰 발급/검증 서비스.
///
/// 비밀 키는 생성 시 한 번 주입됩니다. 검증은 서명과 만료를
/// 모두 확인하는 순수 계산입니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl TokenService {
    /// 새 토큰 서비스 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - 서명 비밀 키
    /// * `default_ttl_hours` - 기본 토큰 수명 (시간)
    pub fn new(secret: &str, default_ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl: Duration::hours(default_ttl_hours),
        }
    }

    /// 인증 설정에서 토큰 서비스 생성.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.expose_secret(), config.token_ttl_hours)
    }

    /// 사용자에 대한 Access Token 발급 (기본 수명).
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_with_ttl(user, self.default_ttl)
    }

    /// 명시적 수명으로 Access Token 발급.
    ///
    /// 음수 수명은 이미 만료된 토큰을 만듭니다 (만료 경로 테스트용).
    pub fn issue_with_ttl(&self, user: &User, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::new(user.id.to_string(), &user.username, user.roles.clone(), ttl);
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Encoding)
    }

    /// 토큰 검증 및 디코딩.
    ///
    /// 서명과 만료를 모두 확인합니다. 만료 판정에 여유 시간(leeway)을
    /// 두지 않으므로 `now > exp`이면 즉시 `Expired`입니다.
    ///
    /// # Returns
    ///
    /// 검증된 Claims. 만료면 `TokenError::Expired`, 서명/구조가
    /// 유효하지 않으면 `TokenError::Malformed`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// 서명/만료 검증 없는 디코딩.
    ///
    /// 진단 및 로깅 경로 전용입니다. 페이로드는 위조 가능하므로
    /// 절대 인가 결정의 근거로 사용해서는 안 됩니다 - 인가는
    /// 반드시 [`TokenService::verify`]를 거칩니다.
    pub fn decode_unverified(token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }
}
