//! User API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sundry_core::{UserId, UserName};

use crate::error::Result;
use crate::models::User;
use crate::services::UserService;
use crate::state::AppState;

use super::SuccessResponse;

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user).get(list_users))
        .route("/user/login", post(login))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Request for creating or updating a user.
///
/// Fields default so that missing required data surfaces as a validation
/// error with a fixed message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_password: String,
    #[serde(default)]
    pub admin_permission: i16,
}

/// Request for logging in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_password: String,
}

/// A user as exposed on the wire. Password material never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: UserName,
    pub admin_permission: i16,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.user_name,
            admin_permission: user.admin_permission,
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub admin_permission: i16,
}

/// Create a user.
///
/// # Errors
///
/// 400 for a missing/malformed user name, 409 for a taken name.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> Result<Json<UserResponse>> {
    let user = UserService::new(state.pool())
        .register(&body.user_name, &body.user_password, body.admin_permission)
        .await?;

    Ok(Json(user.into()))
}

/// Login with user name and password.
///
/// # Errors
///
/// 401 for a wrong name or password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, token) = UserService::new(state.pool())
        .login(&body.user_name, &body.user_password)
        .await?;

    Ok(Json(LoginResponse {
        token: token.to_string(),
        admin_permission: user.admin_permission,
    }))
}

/// List all users.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = UserService::new(state.pool()).list().await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Read one user.
///
/// # Errors
///
/// 404 when the id doesn't exist.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>> {
    let user = UserService::new(state.pool()).get(id).await?;

    Ok(Json(user.into()))
}

/// Update a user.
///
/// # Errors
///
/// 400 for bad fields, 404 when the id doesn't exist, 409 for a taken name.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(body): Json<UserRequest>,
) -> Result<Json<SuccessResponse>> {
    UserService::new(state.pool())
        .update(id, &body.user_name, &body.user_password, body.admin_permission)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Delete a user.
///
/// # Errors
///
/// 404 when the id doesn't exist.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<SuccessResponse>> {
    UserService::new(state.pool()).delete(id).await?;

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_request_defaults_missing_fields() {
        let body: UserRequest = serde_json::from_str(r#"{"userPassword": "pw"}"#).unwrap();
        assert_eq!(body.user_name, "");
        assert_eq!(body.user_password, "pw");
        assert_eq!(body.admin_permission, 0);
    }

    #[test]
    fn test_user_request_camel_case() {
        let body: UserRequest = serde_json::from_str(
            r#"{"userName": "dino", "userPassword": "pw", "adminPermission": 1}"#,
        )
        .unwrap();
        assert_eq!(body.user_name, "dino");
        assert_eq!(body.admin_permission, 1);
    }

    #[test]
    fn test_user_response_shape() {
        let response = UserResponse {
            user_id: UserId::new(1),
            user_name: UserName::parse("dino").unwrap(),
            admin_permission: 1,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"userId": 1, "userName": "dino", "adminPermission": 1})
        );
    }

    #[test]
    fn test_login_response_shape() {
        let response = LoginResponse {
            token: "tok".to_owned(),
            admin_permission: 0,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"token": "tok", "adminPermission": 0})
        );
    }
}
