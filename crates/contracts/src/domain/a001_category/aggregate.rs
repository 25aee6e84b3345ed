use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata, TaxonomyNode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор категории
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Категория гида (верхний уровень таксономии: "Comida", "Hospedagem", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Category {
    /// Создать новую категорию для вставки в БД
    pub fn new_for_insert(name: String, sort_order: i32, hidden: bool) -> Self {
        Self::new_with_id(CategoryId::new_v4(), name, sort_order, hidden)
    }

    /// Создать категорию с заданным UUID
    pub fn new_with_id(id: CategoryId, name: String, sort_order: i32, hidden: bool) -> Self {
        Self {
            id,
            name,
            sort_order,
            hidden,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CategoryDto) {
        self.name = dto.name.trim().to_string();
        if let Some(sort_order) = dto.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(hidden) = dto.hidden {
            self.hidden = hidden;
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Название категории не может быть пустым".into());
        }
        if self.sort_order < 0 {
            return Err("Порядок сортировки не может быть отрицательным".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn list_name() -> &'static str {
        "Категории"
    }
}

impl TaxonomyNode for Category {
    type NodeId = CategoryId;

    fn node_id(&self) -> CategoryId {
        self.id
    }

    fn node_name(&self) -> &str {
        &self.name
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления категории
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub id: Option<String>,
    /// Версия, с которой начиналось редактирование (`None` - не проверять)
    #[serde(default)]
    pub version: Option<i32>,
    pub name: String,
    pub sort_order: Option<i32>,
    pub hidden: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_name() {
        let c = Category::new_for_insert("   ".into(), 0, false);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut c = Category::new_for_insert("Comida".into(), 3, true);
        c.update(&CategoryDto {
            id: None,
            version: None,
            name: "  Gastronomia ".into(),
            sort_order: None,
            hidden: None,
        });
        assert_eq!(c.name, "Gastronomia");
        assert_eq!(c.sort_order, 3);
        assert!(c.hidden);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_before_write_bumps_version() {
        let mut c = Category::new_for_insert("Comida".into(), 0, false);
        c.before_write();
        assert_eq!(c.metadata.version, 1);
        let seen = c.metadata.version;
        c.before_write();
        assert!(!c.metadata.is_current(Some(seen)));
        assert!(c.metadata.is_current(Some(seen + 1)));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CategoryId::new(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::from_u128(1)));
    }
}
