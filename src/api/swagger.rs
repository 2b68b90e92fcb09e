use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Service API",
        version = "1.0.0",
        description = "CRUD over a schema-less `users` collection. No authentication.",
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::models::UserDocument,
            crate::api::users::ErrorResponse,
            crate::api::users::MessageResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, list, fetch, update and delete user documents."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_user_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        let expected_paths = [
            "/",
            "/createUser",
            "/getUser/{id}",
            "/updateUser/{id}",
            "/deleteUser/{id}",
        ];

        for expected in expected_paths {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
