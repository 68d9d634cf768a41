//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Blog Auth API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Auth API",
        version = "0.1.0",
        description = r#"
# 블로그 백엔드 인증 API

회원가입, 로그인, 역할 기반 접근 제어를 위한 REST API입니다.

## 인증

보호된 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
토큰은 `POST /api/v1/auth/signin`에서 발급됩니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    paths(
        crate::routes::auth::sign_up,
        crate::routes::auth::sign_in,
        crate::routes::auth::list_users,
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
    ),
    components(schemas(
        crate::routes::auth::SignUpRequest,
        crate::routes::auth::SignInRequest,
        crate::routes::auth::SignInResponse,
        crate::routes::auth::UserResponse,
        crate::routes::auth::UsersListResponse,
        crate::routes::health::HealthResponse,
        crate::routes::health::ComponentHealth,
        crate::routes::health::ComponentStatus,
        crate::error::ApiErrorResponse,
        blog_core::Role,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "회원가입, 로그인, 사용자 관리"),
        (name = "health", description = "헬스 체크")
    )
)]
pub struct ApiDoc;

/// Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json().unwrap();

        assert!(json.contains("/api/v1/auth/signup"));
        assert!(json.contains("/api/v1/auth/signin"));
        assert!(json.contains("/api/v1/auth/users"));
        assert!(json.contains("bearer_auth"));
    }
}
