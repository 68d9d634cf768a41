//! 테스트용 인메모리 사용자 저장소.
//!
//! 데이터베이스 없이 인증 흐름과 라우터를 시험하기 위한
//! [`UserStore`] 구현입니다.

use async_trait::async_trait;
use blog_core::{NewUser, User};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::users::{UserStore, UserStoreError};

/// 인메모리 사용자 저장소.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;

        // 유니크 제약 흉내
        if users.iter().any(|u| u.username == input.username) {
            return Err(UserStoreError::UsernameTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: input.username,
            password_hash: input.password_hash,
            roles: input.roles,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self, skip: i64, take: i64) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .skip(skip.max(0) as usize)
            .take(take.max(0) as usize)
            .cloned()
            .collect())
    }
}
