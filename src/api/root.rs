use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct Greeting {
    pub data: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Greeting", body = Greeting)
    )
)]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(Greeting {
        data: "Hello from CRUD-API".to_string(),
    })
}
