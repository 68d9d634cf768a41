//! 인증 엔드포인트.
//!
//! - `POST /api/v1/auth/signup` - 회원가입
//! - `POST /api/v1/auth/signin` - 로그인 (Access Token 발급)
//! - `GET  /api/v1/auth/users`  - 사용자 목록 (관리자 전용, 가드로 보호)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use blog_core::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiErrorResponse};
use crate::state::AppState;

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    /// 사용자 이름 (4~20자, 전역 유일)
    #[validate(length(min = 4, max = 20))]
    pub username: String,
    /// 비밀번호 (8~32자)
    #[validate(length(min = 8, max = 32))]
    pub password: String,
    /// 부여할 역할 (생략 시 `user`)
    pub roles: Option<Vec<Role>>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 4, max = 20))]
    pub username: String,
    #[validate(length(min = 8, max = 32))]
    pub password: String,
}

/// 로그인 응답.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// 발급된 JWT Access Token
    pub access_token: String,
}

/// 사용자 응답 (비밀번호 해시 제외).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<blog_core::User> for UserResponse {
    fn from(user: blog_core::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles,
            created_at: user.created_at,
        }
    }
}

/// 사용자 목록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
}

/// 사용자 목록 조회 파라미터.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// 건너뛸 레코드 수 (기본값: 0)
    pub skip: Option<i64>,
    /// 가져올 레코드 수 (기본값: 10, 최대 100)
    pub take: Option<i64>,
}

/// 회원가입.
///
/// 성공 시 본문 없이 201을 반환합니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "가입 성공"),
        (status = 400, description = "요청 본문 검증 실패", body = ApiErrorResponse),
        (status = 409, description = "사용자 이름 중복", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate().map_err(ApiError::validation)?;

    state
        .auth
        .sign_up(&payload.username, &payload.password, payload.roles)
        .await?;

    Ok(StatusCode::CREATED)
}

/// 로그인.
///
/// 자격증명이 올바르면 Access Token을 반환합니다. 존재하지 않는
/// 사용자와 잘못된 비밀번호는 구분되지 않는 401로 응답합니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SignInResponse),
        (status = 400, description = "요청 본문 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "자격증명 불일치", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    payload.validate().map_err(ApiError::validation)?;

    let outcome = state
        .auth
        .sign_in(&payload.username, &payload.password)
        .await?;

    Ok(Json(SignInResponse {
        access_token: outcome.access_token,
    }))
}

/// 사용자 목록 조회 (관리자 전용).
///
/// 이 라우트는 가드 미들웨어가 `{admin, super_admin}` 요구
/// 역할로 보호합니다. 비밀번호 해시는 응답에 포함되지 않습니다.
#[utoipa::path(
    get,
    path = "/api/v1/auth/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "사용자 목록", body = UsersListResponse),
        (status = 401, description = "토큰 부재/만료/불량", body = ApiErrorResponse),
        (status = 403, description = "역할 부족", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UsersListResponse>, ApiError> {
    let skip = query.skip.unwrap_or(0).max(0);
    let take = query.take.unwrap_or(10).clamp(1, 100);

    let users = state.auth.list_users(skip, take).await?;
    debug!(admin = %claims.username, count = users.len(), "user list served");

    Ok(Json(UsersListResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/users", get(list_users))
}
