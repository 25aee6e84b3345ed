use crate::domain::a001_category::aggregate::CategoryId;
use crate::domain::a002_subcategory::aggregate::SubcategoryId;
use crate::domain::a003_location::aggregate::LocationId;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::enums::business_status::BusinessStatus;
use crate::shared::taxonomy_filter::{HasTaxonomyLink, TaxonomyLink};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор бизнеса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusinessId(pub Uuid);

impl BusinessId {
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

impl AggregateId for BusinessId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BusinessId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Бизнес (ресторан, pousada, агентство), публикуемый в гиде
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    /// Текстовая метка категории для карточки (не путать с `category_id`)
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub instagram: String,
    pub tripadvisor: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub status: BusinessStatus,

    // Привязка к таксономии
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub location_id: Option<LocationId>,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Business {
    /// Создать новый бизнес (в статусе "на модерации") для вставки в БД
    pub fn new_for_insert(name: String) -> Self {
        Self::new_with_id(BusinessId::new_v4(), name)
    }

    /// Создать бизнес с заданным UUID и пустыми полями
    pub fn new_with_id(id: BusinessId, name: String) -> Self {
        Self {
            id,
            name,
            category: String::new(),
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            instagram: String::new(),
            tripadvisor: None,
            website: None,
            logo: None,
            images: Vec::new(),
            tags: Vec::new(),
            rating: 0.0,
            review_count: 0,
            is_premium: false,
            status: BusinessStatus::Pending,
            category_id: None,
            subcategory_id: None,
            location_id: None,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn is_approved(&self) -> bool {
        self.status == BusinessStatus::Approved
    }

    /// Обновить данные из DTO.
    ///
    /// Пустой ID таксономии снимает классификацию на уровне; некорректный ID
    /// отклоняется, и бизнес не меняется.
    pub fn update(&mut self, dto: &BusinessDto) -> Result<(), String> {
        let category_id = parse_link_id::<CategoryId>("category_id", &dto.category_id)?;
        let subcategory_id = parse_link_id::<SubcategoryId>("subcategory_id", &dto.subcategory_id)?;
        let location_id = parse_link_id::<LocationId>("location_id", &dto.location_id)?;

        self.name = dto.name.trim().to_string();
        self.category = dto.category.clone().unwrap_or_default();
        self.description = dto.description.clone().unwrap_or_default();
        self.address = dto.address.clone().unwrap_or_default();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.whatsapp = dto.whatsapp.clone().unwrap_or_default();
        self.instagram = dto.instagram.clone().unwrap_or_default();
        self.tripadvisor = non_empty(&dto.tripadvisor);
        self.website = non_empty(&dto.website);
        self.logo = non_empty(&dto.logo);
        self.images = dto
            .images
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        self.tags = dto
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if let Some(rating) = dto.rating {
            self.rating = rating;
        }
        if let Some(review_count) = dto.review_count {
            self.review_count = review_count;
        }
        if let Some(is_premium) = dto.is_premium {
            self.is_premium = is_premium;
        }
        if let Some(status) = dto.status {
            self.status = status;
        }
        self.category_id = category_id;
        self.subcategory_id = subcategory_id;
        self.location_id = location_id;
        Ok(())
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err("Рейтинг должен быть в диапазоне от 0 до 5".into());
        }
        if self.review_count < 0 {
            return Err("Количество отзывов не может быть отрицательным".into());
        }
        if self.subcategory_id.is_some() && self.category_id.is_none() {
            return Err("Подкатегория указана без категории".into());
        }
        if let Some(website) = &self.website {
            if !website.starts_with("http://") && !website.starts_with("https://") {
                return Err("Сайт должен начинаться с http:// или https://".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}

/// ID таксономии из DTO: отсутствующий или пустой - `None`, некорректный - ошибка
fn parse_link_id<Id: AggregateId>(field: &str, raw: &Option<String>) -> Result<Option<Id>, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Id::from_string(value)
            .map(Some)
            .map_err(|e| format!("{}: {}", field, e)),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl HasTaxonomyLink for Business {
    fn taxonomy_link(&self) -> TaxonomyLink {
        TaxonomyLink {
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            location_id: self.location_id,
        }
    }
}

impl AggregateRoot for Business {
    type Id = BusinessId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "business"
    }

    fn list_name() -> &'static str {
        "Бизнесы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления бизнеса
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BusinessDto {
    pub id: Option<String>,
    /// Версия, с которой начиналось редактирование (`None` - не проверять)
    #[serde(default)]
    pub version: Option<i32>,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub tripadvisor: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub is_premium: Option<bool>,
    pub status: Option<BusinessStatus>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub location_id: Option<String>,
}

/// Запрос на смену статуса модерации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessStatusRequest {
    pub status: BusinessStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_treats_empty_taxonomy_ids_as_unclassified() {
        let category = CategoryId::new(Uuid::from_u128(10));
        let mut b = Business::new_for_insert("Bar do Zé".into());
        b.location_id = Some(LocationId::new_v4());
        b.update(&BusinessDto {
            name: "Bar do Zé".into(),
            category_id: Some(category.as_string()),
            subcategory_id: Some("".into()),
            location_id: None,
            tags: vec![" praia ".into(), "".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(b.category_id, Some(category));
        assert_eq!(b.subcategory_id, None);
        assert_eq!(b.location_id, None);
        assert_eq!(b.tags, vec!["praia".to_string()]);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_malformed_taxonomy_id_and_keeps_link() {
        let category = CategoryId::new(Uuid::from_u128(10));
        let mut b = Business::new_for_insert("Pousada".into());
        b.category_id = Some(category);

        let err = b
            .update(&BusinessDto {
                name: "Pousada Nova".into(),
                category_id: Some("not-a-uuid".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.starts_with("category_id"));
        assert_eq!(b.category_id, Some(category));
        assert_eq!(b.name, "Pousada");

        assert!(b
            .update(&BusinessDto {
                name: "Pousada".into(),
                category_id: Some(category.as_string()),
                location_id: Some("garbage".into()),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn test_validate_subcategory_requires_category() {
        let mut b = Business::new_for_insert("Pousada".into());
        b.subcategory_id = Some(SubcategoryId::new_v4());
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_validate_rating_range() {
        let mut b = Business::new_for_insert("Pousada".into());
        b.rating = 5.5;
        assert!(b.validate().is_err());
        b.rating = 4.5;
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_taxonomy_link_projection() {
        let mut b = Business::new_for_insert("Restaurante".into());
        let location = LocationId::new_v4();
        b.location_id = Some(location);
        let link = b.taxonomy_link();
        assert_eq!(link.category_id, None);
        assert_eq!(link.subcategory_id, None);
        assert_eq!(link.location_id, Some(location));
    }
}
