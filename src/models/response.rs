use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Envelope shared by every `/user*` endpoint:
/// `{status, message: "success"|"error", data: {data: <payload>}}`.
#[derive(Debug, Serialize)]
pub struct UserResponse<T> {
    #[serde(skip)]
    code: StatusCode,
    pub status: u16,
    pub message: String,
    pub data: Payload<T>,
}

#[derive(Debug, Serialize)]
pub struct Payload<T> {
    pub data: T,
}

impl<T: Serialize> UserResponse<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        Self::build(status, "success", data)
    }

    fn build(code: StatusCode, message: &str, data: T) -> Self {
        UserResponse {
            code,
            status: code.as_u16(),
            message: message.to_string(),
            data: Payload { data },
        }
    }

    pub fn into_http(self) -> HttpResponse {
        HttpResponse::build(self.code).json(self)
    }
}

impl UserResponse<String> {
    pub fn error(status: StatusCode, text: String) -> Self {
        Self::build(status, "error", text)
    }
}
