use actix_web::{http::StatusCode, web, HttpResponse};

use crate::models::{UserRequest, UserResponse, UserView};
use crate::services::UserService;
use crate::utils::UserError;

pub const DELETED_MESSAGE: &str = "User successfully deleted!";

/// Routes body extraction failures into the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| UserError::InvalidBody(err.to_string()).into())
}

fn reject(route: &str, err: UserError) -> UserError {
    if err.is_client_error() {
        log::warn!("⚠️ {} rejected: {}", route, err);
    } else {
        log::error!("❌ {} failed: {}", route, err);
    }
    err
}

#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created (wrapped in the response envelope)", body = UserView),
        (status = 400, description = "Invalid body or a user with the same name already exists"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, UserError> {
    log::info!("📝 POST /user - name: {}", body.name);

    let user = service
        .create_user(body.into_inner())
        .await
        .map_err(|e| reject("POST /user", e))?;

    log::info!("✅ User created: {}", user.id);
    Ok(UserResponse::success(StatusCode::CREATED, UserView::from(user)).into_http())
}

#[utoipa::path(
    get,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "The user (wrapped in the response envelope)", body = UserView),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, UserError> {
    let user = service
        .get_user(&user_id)
        .await
        .map_err(|e| reject("GET /user/{userId}", e))?;

    Ok(UserResponse::success(StatusCode::OK, UserView::from(user)).into_http())
}

#[utoipa::path(
    put,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "Hex ObjectId of the user")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "The updated user (wrapped in the response envelope)", body = UserView),
        (status = 400, description = "Malformed user ID or invalid body"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, UserError> {
    log::info!("🔧 PUT /user/{}", user_id);

    let user = service
        .update_user(&user_id, body.into_inner())
        .await
        .map_err(|e| reject("PUT /user/{userId}", e))?;

    log::info!("✅ User updated: {}", user.id);
    Ok(UserResponse::success(StatusCode::OK, UserView::from(user)).into_http())
}

#[utoipa::path(
    delete,
    path = "/user/{userId}",
    tag = "Users",
    params(("userId" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, UserError> {
    log::info!("🗑️ DELETE /user/{}", user_id);

    let user = service
        .delete_user(&user_id)
        .await
        .map_err(|e| reject("DELETE /user/{userId}", e))?;

    log::info!("✅ User deleted: {} ({})", user.id, user.name);
    Ok(UserResponse::success(StatusCode::OK, DELETED_MESSAGE).into_http())
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user (wrapped in the response envelope)", body = [UserView]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, UserError> {
    let users: Vec<UserView> = service
        .list_users()
        .await
        .map_err(|e| reject("GET /users", e))?
        .into_iter()
        .map(UserView::from)
        .collect();

    log::info!("📋 Listed {} users", users.len());
    Ok(UserResponse::success(StatusCode::OK, users).into_http())
}
