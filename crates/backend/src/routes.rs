use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // TAXONOMY (admin)
        // ========================================
        // A001 Category handlers
        .route(
            "/api/category",
            get(handlers::a001_category::list_all).post(handlers::a001_category::upsert),
        )
        .route(
            "/api/category/reorder",
            post(handlers::a001_category::reorder),
        )
        .route(
            "/api/category/:id",
            get(handlers::a001_category::get_by_id).delete(handlers::a001_category::delete),
        )
        .route(
            "/api/category/:id/hidden",
            post(handlers::a001_category::set_hidden),
        )
        // A002 Subcategory handlers
        .route(
            "/api/subcategory",
            get(handlers::a002_subcategory::list_all).post(handlers::a002_subcategory::upsert),
        )
        .route(
            "/api/subcategory/reorder",
            post(handlers::a002_subcategory::reorder),
        )
        .route(
            "/api/subcategory/:id",
            get(handlers::a002_subcategory::get_by_id)
                .delete(handlers::a002_subcategory::delete),
        )
        .route(
            "/api/subcategory/:id/hidden",
            post(handlers::a002_subcategory::set_hidden),
        )
        // A003 Location handlers
        .route(
            "/api/location",
            get(handlers::a003_location::list_all).post(handlers::a003_location::upsert),
        )
        .route(
            "/api/location/reorder",
            post(handlers::a003_location::reorder),
        )
        .route(
            "/api/location/:id",
            get(handlers::a003_location::get_by_id).delete(handlers::a003_location::delete),
        )
        .route(
            "/api/location/:id/hidden",
            post(handlers::a003_location::set_hidden),
        )
        // A004 Business handlers
        .route(
            "/api/business",
            get(handlers::a004_business::list_all).post(handlers::a004_business::upsert),
        )
        .route(
            "/api/business/:id",
            get(handlers::a004_business::get_by_id).delete(handlers::a004_business::delete),
        )
        .route(
            "/api/business/:id/status",
            post(handlers::a004_business::set_status),
        )
        // ========================================
        // PUBLIC GUIDE
        // ========================================
        .route("/api/guide/home", get(handlers::guide_home::home))
        .route("/api/guide/snapshot", get(handlers::guide_home::snapshot))
        .route(
            "/api/guide/testdata",
            post(handlers::guide_home::insert_test_data),
        )
}
