use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::body::UserBody;
use crate::{
    models::{UserDocument, UserFields},
    services::UserStore,
    utils::AppError,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Registers the five user routes. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/createUser", web::post().to(create_user))
        .route("/", web::get().to(get_users))
        .route("/getUser/{id}", web::get().to(get_user))
        .route("/updateUser/{id}", web::put().to(update_user))
        .route("/deleteUser/{id}", web::delete().to(delete_user));
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "User not found".to_string(),
        details: None,
    })
}

fn internal_error(context: &str, err: &AppError) -> HttpResponse {
    log::error!("❌ {}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        details: Some(err.to_string()),
    })
}

/// POST /createUser - Cria um usuário com os campos recebidos
#[utoipa::path(
    post,
    path = "/createUser",
    tag = "Users",
    request_body(content = serde_json::Value, description = "Arbitrary user fields"),
    responses(
        (status = 201, description = "User created", body = UserDocument),
        (status = 400, description = "JSON body is not an object", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: UserBody,
) -> HttpResponse {
    log::info!("📝 POST /createUser - {} field(s)", body.0.len());

    match store.create(body.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User created: {}", user.id);
            HttpResponse::Created().json(user)
        }
        Err(e) => internal_error("Error creating user", &e),
    }
}

/// GET / - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserDocument]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_users(store: web::Data<dyn UserStore>) -> HttpResponse {
    log::info!("📋 GET / - Listing users");

    match store.find_all().await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => internal_error("Error fetching users", &e),
    }
}

#[utoipa::path(
    get,
    path = "/getUser/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "The user", body = UserDocument),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
pub async fn get_user(store: web::Data<dyn UserStore>, id: web::Path<String>) -> HttpResponse {
    log::info!("🔍 GET /getUser/{}", id);

    match store.find_by_id(&id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => not_found(),
        Err(e) => internal_error("Error fetching user", &e),
    }
}

/// PUT /updateUser/{id} - Atualiza apenas os campos enviados
#[utoipa::path(
    put,
    path = "/updateUser/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body(content = serde_json::Value, description = "Fields to set"),
    responses(
        (status = 200, description = "User after the update", body = UserDocument),
        (status = 400, description = "JSON body is not an object", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
    body: UserBody,
) -> HttpResponse {
    log::info!("🔧 PUT /updateUser/{} - {} field(s)", id, body.0.len());

    match store.update_by_id(&id, body.into_inner()).await {
        Ok(Some(user)) => {
            log::info!("✅ User updated: {}", user.id);
            HttpResponse::Ok().json(user)
        }
        Ok(None) => not_found(),
        Err(e) => internal_error("Error updating user", &e),
    }
}

#[utoipa::path(
    delete,
    path = "/deleteUser/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
pub async fn delete_user(store: web::Data<dyn UserStore>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /deleteUser/{}", id);

    match store.delete_by_id(&id).await {
        Ok(Some(_)) => {
            log::info!("✅ User deleted: {}", id);
            HttpResponse::Ok().json(MessageResponse {
                message: "User deleted successfully".to_string(),
            })
        }
        Ok(None) => not_found(),
        Err(e) => internal_error("Error deleting user", &e),
    }
}
