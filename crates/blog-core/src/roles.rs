//! 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 역할 정의 및 역할 집합 비교.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 시스템에서 사용자의 권한 수준을 정의합니다.
/// 유효한 역할의 집합은 컴파일 타임에 고정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// 일반 사용자 - 가입 시 기본 역할
    User,
    /// 관리자 - 사용자 조회 등 관리 기능 접근 가능
    Admin,
    /// 최고 관리자
    SuperAdmin,
}

impl Role {
    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// 역할의 저장용 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// 가입 시 기본으로 부여되는 역할 집합.
    pub fn default_set() -> Vec<Role> {
        vec![Role::User]
    }

    /// 두 역할 집합의 교집합이 비어 있지 않은지 확인.
    ///
    /// 라우트 접근 허용 판정에 사용됩니다. 요구 역할 중
    /// 하나라도 보유하면 충분합니다 (ANY 의미론).
    pub fn intersects(held: &[Role], required: &[Role]) -> bool {
        held.iter().any(|role| required.contains(role))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("Super_Admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("unknown"), None);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_default_set() {
        assert_eq!(Role::default_set(), vec![Role::User]);
    }

    #[test]
    fn test_intersects_any_semantics() {
        let required = [Role::Admin, Role::SuperAdmin];

        // 요구 역할 중 하나만 보유해도 충분
        assert!(Role::intersects(&[Role::Admin], &required));
        assert!(Role::intersects(&[Role::User, Role::SuperAdmin], &required));

        // 교집합이 없으면 거부
        assert!(!Role::intersects(&[Role::User], &required));
        assert!(!Role::intersects(&[], &required));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");

        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::SuperAdmin);
    }
}
