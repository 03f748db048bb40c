pub mod health;
pub mod root;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Fixed route table. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(users::json_config())
        .route("/", web::get().to(root::hello))
        .route("/health", web::get().to(health::health_check))
        .route("/user", web::post().to(users::create_user))
        .route("/user/{userId}", web::get().to(users::get_user))
        .route("/user/{userId}", web::put().to(users::update_user))
        .route("/user/{userId}", web::delete().to(users::delete_user))
        .route("/users", web::get().to(users::list_users));
}
