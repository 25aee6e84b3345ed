use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_business::aggregate::{Business, BusinessDto, BusinessStatusRequest};
use serde_json::json;

use super::parse_path_id;
use crate::domain::a004_business;

/// GET /api/business
pub async fn list_all() -> Result<Json<Vec<Business>>, StatusCode> {
    a004_business::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/business/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Business>, StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a004_business::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/business
pub async fn upsert(Json(dto): Json<BusinessDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a004_business::service::update(dto).await.map(|_| id),
        None => a004_business::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(e.into_status()),
    }
}

/// DELETE /api/business/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a004_business::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/business/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(req): Json<BusinessStatusRequest>,
) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    a004_business::service::set_status(uuid, req.status)
        .await
        .map_err(|e| e.into_status())
}
