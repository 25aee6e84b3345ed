use super::repository;
use crate::domain::a001_category;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryDto};
use contracts::shared::reorder::plan_reorder;
use uuid::Uuid;

/// Родительская категория из DTO: должна существовать и не быть удаленной
async fn resolve_category(dto: &SubcategoryDto) -> ServiceResult<CategoryId> {
    let category_uuid = Uuid::parse_str(dto.category_id.trim())
        .map_err(|_| ServiceError::Validation("Не указана категория".into()))?;
    if a001_category::repository::get_by_id(category_uuid)
        .await?
        .is_none()
    {
        return Err(ServiceError::Validation(format!(
            "Категория не найдена: {}",
            category_uuid
        )));
    }
    Ok(CategoryId(category_uuid))
}

/// Новая подкатегория встает в конец списка своей категории
async fn next_sort_order(category_id: CategoryId) -> ServiceResult<i32> {
    let siblings = repository::list_by_category(category_id.value()).await?;
    Ok(siblings.iter().map(|s| s.sort_order + 1).max().unwrap_or(0))
}

/// Создание новой подкатегории
pub async fn create(dto: SubcategoryDto) -> ServiceResult<Uuid> {
    let category_id = resolve_category(&dto).await?;
    let sort_order = match dto.sort_order {
        Some(v) => v,
        None => next_sort_order(category_id).await?,
    };
    let mut aggregate = Subcategory::new_for_insert(
        dto.name.trim().to_string(),
        category_id,
        sort_order,
        dto.hidden.unwrap_or(false),
    );

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

/// Обновление подкатегории (в том числе перенос в другую категорию)
pub async fn update(dto: SubcategoryDto) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found::<Subcategory>(id))?;

    if !aggregate.metadata.is_current(dto.version) {
        return Err(ServiceError::conflict::<Subcategory>(id));
    }
    let expected_version = aggregate.metadata.version;

    let category_id = resolve_category(&dto).await?;
    aggregate.update(&dto, category_id);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    if !repository::update(&aggregate, expected_version).await? {
        return Err(ServiceError::conflict::<Subcategory>(id));
    }
    Ok(())
}

pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Subcategory>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Subcategory>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_category(category_id: Uuid) -> ServiceResult<Vec<Subcategory>> {
    Ok(repository::list_by_category(category_id).await?)
}

pub async fn set_hidden(id: Uuid, hidden: bool) -> ServiceResult<()> {
    if !repository::set_hidden(id, hidden).await? {
        return Err(ServiceError::not_found::<Subcategory>(id));
    }
    tracing::info!("Subcategory {} hidden={}", id, hidden);
    Ok(())
}

/// Новый порядок подкатегорий.
///
/// Сортировка идет внутри одной категории, но проверяем по всему списку:
/// ID из чужой категории тоже допустим, `sort_order` у них независимы.
pub async fn reorder(ids: &[String]) -> ServiceResult<()> {
    let existing = repository::list_all().await?;
    let plan = plan_reorder(&existing, ids).map_err(ServiceError::Validation)?;
    repository::set_sort_orders(&plan).await?;
    tracing::info!("Reordered {} subcategories", plan.len());
    Ok(())
}
