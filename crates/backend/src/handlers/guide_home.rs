use axum::{extract::Query, http::StatusCode, Json};
use contracts::domain::a004_business::aggregate::Business;
use contracts::shared::guide_home::{GuideHomeQuery, GuideHomeResponse};
use contracts::shared::taxonomy_filter::TaxonomySnapshot;

use crate::domain::guide_home;

/// GET /api/guide/home?category_id=&subcategory_id=&location_id=&search=&rating_min=
///
/// Некорректные ID в параметрах - это устаревший выбор, а не ошибка запроса.
pub async fn home(Query(query): Query<GuideHomeQuery>) -> Result<Json<GuideHomeResponse>, StatusCode> {
    guide_home::service::home(&query)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/guide/snapshot
pub async fn snapshot() -> Result<Json<TaxonomySnapshot<Business>>, StatusCode> {
    guide_home::service::load_snapshot()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// POST /api/guide/testdata
pub async fn insert_test_data() -> StatusCode {
    match guide_home::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => e.into_status(),
    }
}
