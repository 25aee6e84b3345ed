pub mod a001_category;
pub mod a002_subcategory;
pub mod a003_location;
pub mod a004_business;
pub mod guide_home;

use axum::http::StatusCode;

/// UUID из пути запроса; некорректный ID -> 400
pub(crate) fn parse_path_id(id: &str) -> Result<uuid::Uuid, StatusCode> {
    uuid::Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}
