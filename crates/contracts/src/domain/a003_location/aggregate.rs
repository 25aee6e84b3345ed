use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata, TaxonomyNode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор локации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
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

impl AggregateId for LocationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LocationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Локация (пляж, поселок, район). Плоский список, без связи с категориями:
/// связь появляется только через бизнесы.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Location {
    pub fn new_for_insert(name: String, sort_order: i32, hidden: bool) -> Self {
        Self::new_with_id(LocationId::new_v4(), name, sort_order, hidden)
    }

    pub fn new_with_id(id: LocationId, name: String, sort_order: i32, hidden: bool) -> Self {
        Self {
            id,
            name,
            sort_order,
            hidden,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &LocationDto) {
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
            return Err("Название локации не может быть пустым".into());
        }
        if self.sort_order < 0 {
            return Err("Порядок сортировки не может быть отрицательным".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}

impl AggregateRoot for Location {
    type Id = LocationId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "location"
    }

    fn list_name() -> &'static str {
        "Локации"
    }
}

impl TaxonomyNode for Location {
    type NodeId = LocationId;

    fn node_id(&self) -> LocationId {
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

/// DTO для создания/обновления локации
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationDto {
    pub id: Option<String>,
    /// Версия, с которой начиналось редактирование (`None` - не проверять)
    #[serde(default)]
    pub version: Option<i32>,
    pub name: String,
    pub sort_order: Option<i32>,
    pub hidden: Option<bool>,
}
