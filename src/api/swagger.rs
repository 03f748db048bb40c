use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User CRUD API",
        version = "1.0.0",
        description = "CRUD over a single user resource stored in MongoDB. \n\nEvery `/user*` response is wrapped in `{status, message, data: {data: <payload>}}`. The administrator is emailed when a user is created or deleted."
    ),
    paths(
        crate::api::root::hello,
        crate::api::health::health_check,
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::list_users,
    ),
    components(
        schemas(
            crate::api::root::Greeting,
            crate::api::health::HealthResponse,
            crate::models::UserRequest,
            crate::models::UserView,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete users."),
        (name = "Health", description = "Greeting and health check."),
    )
)]
pub struct ApiDoc;
