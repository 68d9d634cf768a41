//! # Blog Core
//!
//! 블로그 백엔드의 핵심 도메인 모델 및 인증 기본 요소를 제공합니다.
//!
//! 이 크레이트는 인증 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 및 역할 정의
//! - 비밀번호 해싱 (Argon2id)
//! - 인증 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod password;
pub mod roles;
pub mod user;

pub use config::{AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use error::{AuthError, AuthResult};
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::Role;
pub use user::{NewUser, User};
