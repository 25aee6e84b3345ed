use super::repository;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto};
use contracts::shared::reorder::plan_reorder;
use uuid::Uuid;

/// Создание новой категории
pub async fn create(dto: CategoryDto) -> ServiceResult<Uuid> {
    let sort_order = match dto.sort_order {
        Some(v) => v,
        None => repository::next_sort_order().await?,
    };
    let mut aggregate = Category::new_for_insert(
        dto.name.trim().to_string(),
        sort_order,
        dto.hidden.unwrap_or(false),
    );

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    Ok(repository::insert(&aggregate).await?)
}

/// Обновление существующей категории
pub async fn update(dto: CategoryDto) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found::<Category>(id))?;

    if !aggregate.metadata.is_current(dto.version) {
        return Err(ServiceError::conflict::<Category>(id));
    }
    let expected_version = aggregate.metadata.version;

    aggregate.update(&dto);

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    if !repository::update(&aggregate, expected_version).await? {
        return Err(ServiceError::conflict::<Category>(id));
    }
    Ok(())
}

/// Мягкое удаление категории.
///
/// Подкатегории и ссылки бизнесов не трогаем: оставшиеся ссылки становятся
/// висячими и из публичных списков выпадают сами.
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Category>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Category>> {
    Ok(repository::list_all().await?)
}

/// Скрыть / показать категорию в публичной части
pub async fn set_hidden(id: Uuid, hidden: bool) -> ServiceResult<()> {
    if !repository::set_hidden(id, hidden).await? {
        return Err(ServiceError::not_found::<Category>(id));
    }
    tracing::info!("Category {} hidden={}", id, hidden);
    Ok(())
}

/// Новый порядок категорий: позиция в `ids` становится `sort_order`
pub async fn reorder(ids: &[String]) -> ServiceResult<()> {
    let existing = repository::list_all().await?;
    let plan = plan_reorder(&existing, ids).map_err(ServiceError::Validation)?;
    repository::set_sort_orders(&plan).await?;
    tracing::info!("Reordered {} categories", plan.len());
    Ok(())
}
