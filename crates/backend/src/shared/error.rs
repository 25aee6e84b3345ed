use axum::http::StatusCode;
use contracts::domain::common::AggregateRoot;
use thiserror::Error;

/// Ошибки уровня сервисов
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Version conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.into())
    }
}

impl ServiceError {
    /// `NotFound` с полным именем агрегата: "a001_category <id>"
    pub fn not_found<A: AggregateRoot>(id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} {}", A::full_name(), id))
    }

    /// `Conflict`: запись изменена после того, как ее прочитали
    pub fn conflict<A: AggregateRoot>(id: impl std::fmt::Display) -> Self {
        ServiceError::Conflict(format!("{} {}", A::full_name(), id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Залогировать ошибку и получить HTTP-статус для ответа
    pub fn into_status(self) -> StatusCode {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{:#}", self);
        } else {
            tracing::warn!("{}", self);
        }
        status
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_names_aggregate() {
        use contracts::domain::a002_subcategory::aggregate::Subcategory;
        let err = ServiceError::not_found::<Subcategory>("42");
        assert_eq!(err.to_string(), "Not found: a002_subcategory 42");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        use contracts::domain::a004_business::aggregate::Business;
        let err = ServiceError::conflict::<Business>("7");
        assert_eq!(err.to_string(), "Version conflict: a004_business 7");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_db_error_is_internal() {
        let err = ServiceError::from(sea_orm::DbErr::Custom("locked".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
