//! 사용자 도메인 모델.
//!
//! 자격증명 저장소가 다루는 사용자 레코드 타입을 정의합니다.
//! 역할 변경 등 관리 작업은 이 코어의 범위 밖이며, 생성 이후
//! 인증 파이프라인은 사용자를 읽기만 합니다.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::roles::Role;

/// 저장된 사용자 자격증명.
///
/// 불변 조건: `username`은 전역적으로 유일하며 (저장소의 유니크
/// 제약으로 보장), `roles`는 비어 있지 않습니다 (생성 시 기본
/// 역할이 부여됨).
#[derive(Debug, Clone)]
pub struct User {
    /// 사용자 ID
    pub id: Uuid,
    /// 사용자 이름 (유일)
    pub username: String,
    /// PHC 형식 비밀번호 해시 (솔트 포함)
    pub password_hash: String,
    /// 보유 역할 집합
    pub roles: Vec<Role>,
    /// 생성 시간
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 이 사용자가 특정 역할을 보유하는지 확인.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// 새 사용자 생성 입력.
///
/// 회원가입 흐름이 비밀번호를 해싱한 뒤 저장소에 전달합니다.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

impl NewUser {
    /// 새 사용자 입력 생성.
    ///
    /// `roles`가 비어 있으면 기본 역할 집합으로 대체합니다.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, roles: Vec<Role>) -> Self {
        let roles = if roles.is_empty() {
            Role::default_set()
        } else {
            roles
        };

        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_roles() {
        let user = NewUser::new("alice", "$argon2id$...", vec![]);
        assert_eq!(user.roles, vec![Role::User]);
    }

    #[test]
    fn test_new_user_keeps_explicit_roles() {
        let user = NewUser::new("bob", "$argon2id$...", vec![Role::Admin]);
        assert_eq!(user.roles, vec![Role::Admin]);
    }

    #[test]
    fn test_has_role() {
        let user = User {
            id: Uuid::new_v4(),
            username: "carol".to_string(),
            password_hash: String::new(),
            roles: vec![Role::User, Role::Admin],
            created_at: Utc::now(),
        };

        assert!(user.has_role(Role::Admin));
        assert!(!user.has_role(Role::SuperAdmin));
    }
}
