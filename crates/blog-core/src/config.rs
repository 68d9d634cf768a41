//! 설정 관리.
//!
//! 모든 설정은 프로세스 시작 시 환경 변수에서 한 번 읽습니다.
//! 서명 비밀 키 부재는 요청별 실패가 아닌 시작 시 치명적
//! 설정 에러로 처리합니다.

use secrecy::SecretString;

/// 설정 에러.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JWT_SECRET 환경 변수 미설정 - 서버를 시작할 수 없음
    #[error("JWT_SECRET 환경 변수가 설정되지 않았습니다")]
    MissingJwtSecret,

    /// DATABASE_URL 환경 변수 미설정
    #[error("DATABASE_URL 환경 변수가 설정되지 않았습니다")]
    MissingDatabaseUrl,

    /// 파싱할 수 없는 설정 값
    #[error("잘못된 설정 값: {key}={value}")]
    InvalidValue { key: &'static str, value: String },
}

/// 인증 설정.
///
/// 서명 비밀 키와 토큰 수명. 프로세스 전역에서 단일하며
/// 시작 이후 변경되지 않습니다 (비밀 키 회전은 모델링하지 않음).
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키
    pub jwt_secret: SecretString,
    /// 발급 토큰 수명 (시간 단위, 기본값 10시간)
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    ///
    /// - `JWT_SECRET`: 서명 비밀 키 (필수)
    /// - `JWT_EXPIRES_IN_HOURS`: 토큰 수명 (기본값: 10)
    ///
    /// # Errors
    ///
    /// `JWT_SECRET`이 없으면 `ConfigError::MissingJwtSecret`을 반환합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("JWT_SECRET").ok(),
            std::env::var("JWT_EXPIRES_IN_HOURS").ok(),
        )
    }

    fn from_values(secret: Option<String>, ttl_hours: Option<String>) -> Result<Self, ConfigError> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let token_ttl_hours = match ttl_hours {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "JWT_EXPIRES_IN_HOURS",
                value: raw,
            })?,
            None => 10,
        };

        Ok(Self {
            jwt_secret: SecretString::from(secret),
            token_ttl_hours,
        })
    }
}

/// 서버 설정.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    ///
    /// - `API_HOST`: 바인딩 호스트 (기본값: 127.0.0.1)
    /// - `API_PORT`: 바인딩 포트 (기본값: 3000)
    pub fn from_env() -> Self {
        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self { host, port }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    ///
    /// - `DATABASE_URL`: 연결 URL (필수)
    /// - `DATABASE_MAX_CONNECTIONS`: 풀 크기 (기본값: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_auth_config_requires_secret() {
        let result = AuthConfig::from_values(None, None);
        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));

        // 빈 값도 미설정으로 취급
        let result = AuthConfig::from_values(Some(String::new()), None);
        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));
    }

    #[test]
    fn test_auth_config_default_ttl() {
        let config = AuthConfig::from_values(Some("secret".to_string()), None).unwrap();
        assert_eq!(config.token_ttl_hours, 10);
        assert_eq!(config.jwt_secret.expose_secret(), "secret");
    }

    #[test]
    fn test_auth_config_explicit_ttl() {
        let config =
            AuthConfig::from_values(Some("secret".to_string()), Some("24".to_string())).unwrap();
        assert_eq!(config.token_ttl_hours, 24);
    }

    #[test]
    fn test_auth_config_invalid_ttl() {
        let result =
            AuthConfig::from_values(Some("secret".to_string()), Some("soon".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "JWT_EXPIRES_IN_HOURS", .. })
        ));
    }

    #[test]
    fn test_server_config_socket_addr() {
        let config = ServerConfig::default();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
