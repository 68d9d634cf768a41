//! 사용자 자격증명 저장소.
//!
//! `users` 테이블에 대한 데이터베이스 작업을 처리합니다.
//! 기대하는 테이블 형태 (스키마/마이그레이션은 외부 소관):
//!
//! ```sql
//! CREATE TABLE users (
//!     id            UUID PRIMARY KEY,
//!     username      TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     roles         TEXT[] NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! 동시 가입의 유일성 보장은 전적으로 데이터베이스의 유니크
//! 제약에 위임하며 이 코어는 추가 잠금을 수행하지 않습니다.

use async_trait::async_trait;
use blog_core::{NewUser, Role, User};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    /// username 유니크 제약 위반
    #[error("이미 존재하는 사용자 이름")]
    UsernameTaken,
    /// 그 외 저장소 장애
    #[error("저장소 에러: {0}")]
    Database(String),
}

/// 자격증명 저장소 인터페이스.
///
/// 인증 흐름이 소비하는 외부 협력자입니다. 운영 구현은
/// [`PgUserStore`], 테스트 구현은 `InMemoryUserStore`입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자 이름으로 조회.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// 새 사용자 생성.
    ///
    /// 사용자 이름이 이미 존재하면 `UserStoreError::UsernameTaken`.
    async fn create_user(&self, input: NewUser) -> Result<User, UserStoreError>;

    /// 사용자 목록 조회 (생성 순, skip/take).
    async fn list_users(&self, skip: i64, take: i64) -> Result<Vec<User>, UserStoreError>;
}

/// users 테이블의 데이터베이스 표현.
#[derive(Debug, Clone, FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
    password_hash: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        // 알 수 없는 역할 문자열은 도메인 경계에서 버린다
        let roles = record
            .roles
            .iter()
            .filter_map(|raw| Role::parse(raw))
            .collect();

        User {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            roles,
            created_at: record.created_at,
        }
    }
}

/// PostgreSQL 기반 사용자 저장소.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, roles, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map(|record| record.map(User::from))
        .map_err(|e| UserStoreError::Database(e.to_string()))
    }

    async fn create_user(&self, input: NewUser) -> Result<User, UserStoreError> {
        let roles: Vec<String> = input
            .roles
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, username, password_hash, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, roles, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&roles)
        .fetch_one(&self.pool)
        .await
        .map(User::from)
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserStoreError::UsernameTaken
            }
            _ => UserStoreError::Database(e.to_string()),
        })
    }

    async fn list_users(&self, skip: i64, take: i64) -> Result<Vec<User>, UserStoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, roles, created_at
            FROM users
            ORDER BY created_at ASC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(take)
        .fetch_all(&self.pool)
        .await
        .map(|records| records.into_iter().map(User::from).collect())
        .map_err(|e| UserStoreError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_to_user_drops_unknown_roles() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            roles: vec![
                "user".to_string(),
                "moderator".to_string(), // 더 이상 존재하지 않는 역할
                "admin".to_string(),
            ],
            created_at: Utc::now(),
        };

        let user = User::from(record);
        assert_eq!(user.roles, vec![Role::User, Role::Admin]);
    }
}
