use crate::domain::a001_category::aggregate::CategoryId;
use crate::domain::a002_subcategory::aggregate::SubcategoryId;
use crate::domain::a003_location::aggregate::LocationId;
use serde::{Deserialize, Serialize};

/// Проекция бизнеса на таксономию. `None` на уровне = бизнес не классифицирован
/// на этом уровне и не попадает в активное множество уровня.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TaxonomyLink {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub location_id: Option<LocationId>,
}

/// Все, что можно спроецировать на таксономию
pub trait HasTaxonomyLink {
    fn taxonomy_link(&self) -> TaxonomyLink;
}

impl HasTaxonomyLink for TaxonomyLink {
    fn taxonomy_link(&self) -> TaxonomyLink {
        *self
    }
}

impl TaxonomyLink {
    /// Проходит ли связь фильтр по категории (`None` = без фильтра)
    pub fn matches_category(&self, category_id: Option<CategoryId>) -> bool {
        category_id.map_or(true, |c| self.category_id == Some(c))
    }

    /// Проходит ли связь фильтр по подкатегории (`None` = без фильтра)
    pub fn matches_subcategory(&self, subcategory_id: Option<SubcategoryId>) -> bool {
        subcategory_id.map_or(true, |s| self.subcategory_id == Some(s))
    }

    /// Проходит ли связь фильтр по локации (`None` = без фильтра)
    pub fn matches_location(&self, location_id: Option<LocationId>) -> bool {
        location_id.map_or(true, |l| self.location_id == Some(l))
    }
}
