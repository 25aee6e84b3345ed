use super::repository;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a004_business::aggregate::{Business, BusinessDto};
use contracts::enums::business_status::BusinessStatus;
use uuid::Uuid;

/// Создание нового бизнеса. Без явного статуса попадает на модерацию.
pub async fn create(dto: BusinessDto) -> ServiceResult<Uuid> {
    let mut aggregate = Business::new_for_insert(dto.name.trim().to_string());
    aggregate.update(&dto).map_err(ServiceError::Validation)?;

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

/// Обновление существующего бизнеса
pub async fn update(dto: BusinessDto) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found::<Business>(id))?;

    if !aggregate.metadata.is_current(dto.version) {
        return Err(ServiceError::conflict::<Business>(id));
    }
    let expected_version = aggregate.metadata.version;

    aggregate.update(&dto).map_err(ServiceError::Validation)?;

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    if !repository::update(&aggregate, expected_version).await? {
        return Err(ServiceError::conflict::<Business>(id));
    }
    Ok(())
}

pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Business>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Business>> {
    Ok(repository::list_all().await?)
}

/// Смена статуса модерации
pub async fn set_status(id: Uuid, status: BusinessStatus) -> ServiceResult<()> {
    if !repository::set_status(id, status).await? {
        return Err(ServiceError::not_found::<Business>(id));
    }
    tracing::info!("Business {} status -> {}", id, status);
    Ok(())
}
