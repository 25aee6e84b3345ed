//! Фильтр таксономии главной страницы гида.
//!
//! Из сырых списков категорий, подкатегорий, локаций и одобренных бизнесов
//! выводит:
//! - активные множества узлов (на которые ссылается хотя бы один бизнес
//!   при текущем частичном выборе);
//! - видимые списки узлов для каждого уровня;
//! - выбор пользователя (категория → подкатегория → локация), который
//!   сам себя чинит при изменении данных.
//!
//! Все функции чистые и синхронные. Владелец снимка и выбора вызывает
//! [`recompute`] после каждого обновления данных и после каждого перехода.

pub mod active_set;
pub mod engine;
pub mod link;
pub mod selection;
pub mod visible;

pub use active_set::{active_category_ids, active_location_ids, active_subcategory_ids, ActiveSets};
pub use engine::{dangling_links, recompute, DanglingLinks, TaxonomySnapshot, TaxonomyView};
pub use link::{HasTaxonomyLink, TaxonomyLink};
pub use selection::{RepairOutcome, Selection, SelectionDto, SelectionState};
pub use visible::{visible_categories, visible_locations, visible_subcategories};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::TaxonomyLink;
    use crate::domain::a001_category::aggregate::{Category, CategoryId};
    use crate::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryId};
    use crate::domain::a003_location::aggregate::{Location, LocationId};
    use uuid::Uuid;

    pub fn cat_id(n: u128) -> CategoryId {
        CategoryId::new(Uuid::from_u128(0x100 + n))
    }

    pub fn sub_id(n: u128) -> SubcategoryId {
        SubcategoryId::new(Uuid::from_u128(0x200 + n))
    }

    pub fn loc_id(n: u128) -> LocationId {
        LocationId::new(Uuid::from_u128(0x300 + n))
    }

    pub fn category(n: u128, name: &str, hidden: bool) -> Category {
        Category::new_with_id(cat_id(n), name.to_string(), n as i32, hidden)
    }

    pub fn subcategory(n: u128, parent: u128, name: &str, hidden: bool) -> Subcategory {
        Subcategory::new_with_id(sub_id(n), name.to_string(), cat_id(parent), n as i32, hidden)
    }

    pub fn location(n: u128, name: &str, hidden: bool) -> Location {
        Location::new_with_id(loc_id(n), name.to_string(), n as i32, hidden)
    }

    /// Связь бизнеса с таксономией; 0 означает "не указано"
    pub fn link(c: u128, s: u128, l: u128) -> TaxonomyLink {
        TaxonomyLink {
            category_id: (c != 0).then(|| cat_id(c)),
            subcategory_id: (s != 0).then(|| sub_id(s)),
            location_id: (l != 0).then(|| loc_id(l)),
        }
    }
}
