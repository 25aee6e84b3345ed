use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryDto};
use contracts::domain::common::AggregateId;
use contracts::shared::reorder::{HiddenRequest, ReorderRequest};
use serde::Deserialize;
use serde_json::json;

use super::parse_path_id;
use crate::domain::a002_subcategory;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category_id: String,
}

/// GET /api/subcategory?category_id=
///
/// Пустой `category_id` - все подкатегории; некорректный - 400.
pub async fn list_all(Query(query): Query<ListQuery>) -> Result<Json<Vec<Subcategory>>, StatusCode> {
    let result = if query.category_id.trim().is_empty() {
        a002_subcategory::service::list_all().await
    } else {
        let category_id = <uuid::Uuid as AggregateId>::from_filter(&query.category_id)
            .ok_or(StatusCode::BAD_REQUEST)?;
        a002_subcategory::service::list_by_category(category_id).await
    };
    result.map(Json).map_err(|e| e.into_status())
}

/// GET /api/subcategory/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Subcategory>, StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a002_subcategory::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/subcategory
pub async fn upsert(
    Json(dto): Json<SubcategoryDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a002_subcategory::service::update(dto).await.map(|_| id),
        None => a002_subcategory::service::create(dto)
            .await
            .map(|id| id.to_string()),
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(e.into_status()),
    }
}

/// DELETE /api/subcategory/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    match a002_subcategory::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/subcategory/:id/hidden
pub async fn set_hidden(
    Path(id): Path<String>,
    Json(req): Json<HiddenRequest>,
) -> Result<(), StatusCode> {
    let uuid = parse_path_id(&id)?;
    a002_subcategory::service::set_hidden(uuid, req.hidden)
        .await
        .map_err(|e| e.into_status())
}

/// POST /api/subcategory/reorder
pub async fn reorder(Json(req): Json<ReorderRequest>) -> Result<(), StatusCode> {
    a002_subcategory::service::reorder(&req.ids)
        .await
        .map_err(|e| e.into_status())
}
