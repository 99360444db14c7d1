use axum::{response::IntoResponse, Json};

use crate::dto::StatusResponse;

pub async fn get_status() -> impl IntoResponse {
    Json(StatusResponse::default())
}
