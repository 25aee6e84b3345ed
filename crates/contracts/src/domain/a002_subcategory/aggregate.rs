use crate::domain::a001_category::aggregate::CategoryId;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata, TaxonomyNode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор подкатегории
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubcategoryId(pub Uuid);

impl SubcategoryId {
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

impl AggregateId for SubcategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SubcategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Подкатегория (второй уровень таксономии, принадлежит одной категории)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Subcategory {
    /// Создать новую подкатегорию для вставки в БД
    pub fn new_for_insert(
        name: String,
        category_id: CategoryId,
        sort_order: i32,
        hidden: bool,
    ) -> Self {
        Self::new_with_id(SubcategoryId::new_v4(), name, category_id, sort_order, hidden)
    }

    /// Создать подкатегорию с заданным UUID
    pub fn new_with_id(
        id: SubcategoryId,
        name: String,
        category_id: CategoryId,
        sort_order: i32,
        hidden: bool,
    ) -> Self {
        Self {
            id,
            name,
            category_id,
            sort_order,
            hidden,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO (родительская категория передается уже разобранной)
    pub fn update(&mut self, dto: &SubcategoryDto, category_id: CategoryId) {
        self.name = dto.name.trim().to_string();
        self.category_id = category_id;
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
            return Err("Название подкатегории не может быть пустым".into());
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

impl AggregateRoot for Subcategory {
    type Id = SubcategoryId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "subcategory"
    }

    fn list_name() -> &'static str {
        "Подкатегории"
    }
}

impl TaxonomyNode for Subcategory {
    type NodeId = SubcategoryId;

    fn node_id(&self) -> SubcategoryId {
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

/// DTO для создания/обновления подкатегории
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubcategoryDto {
    pub id: Option<String>,
    /// Версия, с которой начиналось редактирование (`None` - не проверять)
    #[serde(default)]
    pub version: Option<i32>,
    pub name: String,
    pub category_id: String,
    pub sort_order: Option<i32>,
    pub hidden: Option<bool>,
}
