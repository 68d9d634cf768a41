//! 애플리케이션 서비스.

pub mod auth;

pub use auth::{AuthService, SignInOutcome};
