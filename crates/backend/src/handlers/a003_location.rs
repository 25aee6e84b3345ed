use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_location::aggregate::{Location, LocationDto};
use contracts::shared::reorder::{HiddenRequest, ReorderRequest};
use serde_json::json;

use super::parse_path_id;
use crate::domain::a003_location;

/// GET /api/location
pub async fn list_all() -> Result<Json<Vec<Location>>, StatusCode> {
    a003_location::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/location/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Location>, StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a003_location::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/location
pub async fn upsert(Json(dto): Json<LocationDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a003_location::service::update(dto).await.map(|_| id),
        None => a003_location::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(e.into_status()),
    }
}

/// DELETE /api/location/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a003_location::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/location/:id/hidden
pub async fn set_hidden(
    Path(id): Path<String>,
    Json(req): Json<HiddenRequest>,
) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    a003_location::service::set_hidden(uuid, req.hidden)
        .await
        .map_err(|e| e.into_status())
}

/// POST /api/location/reorder
pub async fn reorder(Json(req): Json<ReorderRequest>) -> Result<(), StatusCode> {
    a003_location::service::reorder(&req.ids)
        .await
        .map_err(|e| e.into_status())
}
