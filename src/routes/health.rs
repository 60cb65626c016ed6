use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthData {
    status: &'static str,
    service: &'static str,
}

pub async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
    })
}
