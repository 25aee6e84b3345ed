use super::link::HasTaxonomyLink;
use super::selection::Selection;
use crate::domain::a001_category::aggregate::CategoryId;
use crate::domain::a002_subcategory::aggregate::SubcategoryId;
use crate::domain::a003_location::aggregate::LocationId;
use std::collections::HashSet;

/// Категории, на которые ссылается хотя бы один бизнес.
/// От выбора не зависит: категория - верхний уровень.
pub fn active_category_ids<B: HasTaxonomyLink>(businesses: &[B]) -> HashSet<CategoryId> {
    businesses
        .iter()
        .filter_map(|b| b.taxonomy_link().category_id)
        .collect()
}

/// Подкатегории бизнесов выбранной категории (или всех бизнесов, если категория не выбрана)
pub fn active_subcategory_ids<B: HasTaxonomyLink>(
    businesses: &[B],
    category_id: Option<CategoryId>,
) -> HashSet<SubcategoryId> {
    businesses
        .iter()
        .map(|b| b.taxonomy_link())
        .filter(|link| link.matches_category(category_id))
        .filter_map(|link| link.subcategory_id)
        .collect()
}

/// Локации бизнесов, прошедших оба фильтра (пустой фильтр пропускает всех)
pub fn active_location_ids<B: HasTaxonomyLink>(
    businesses: &[B],
    category_id: Option<CategoryId>,
    subcategory_id: Option<SubcategoryId>,
) -> HashSet<LocationId> {
    businesses
        .iter()
        .map(|b| b.taxonomy_link())
        .filter(|link| link.matches_category(category_id) && link.matches_subcategory(subcategory_id))
        .filter_map(|link| link.location_id)
        .collect()
}

/// Активные множества всех трех уровней для заданного выбора
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSets {
    pub categories: HashSet<CategoryId>,
    pub subcategories: HashSet<SubcategoryId>,
    pub locations: HashSet<LocationId>,
}

impl ActiveSets {
    pub fn derive<B: HasTaxonomyLink>(businesses: &[B], selection: &Selection) -> Self {
        Self {
            categories: active_category_ids(businesses),
            subcategories: active_subcategory_ids(businesses, selection.category_id),
            locations: active_location_ids(
                businesses,
                selection.category_id,
                selection.subcategory_id,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::taxonomy_filter::fixtures::*;
    use crate::shared::taxonomy_filter::TaxonomyLink;

    #[test]
    fn test_active_categories_skip_unclassified() {
        let businesses = vec![link(1, 0, 0), link(0, 0, 3), link(2, 5, 0), link(1, 4, 0)];
        let active = active_category_ids(&businesses);
        assert_eq!(active, HashSet::from([cat_id(1), cat_id(2)]));
    }

    #[test]
    fn test_active_subcategories_follow_category_filter() {
        let businesses = vec![link(1, 1, 0), link(1, 2, 0), link(2, 3, 0), link(1, 0, 0)];

        let all = active_subcategory_ids(&businesses, None);
        assert_eq!(all, HashSet::from([sub_id(1), sub_id(2), sub_id(3)]));

        let only_first = active_subcategory_ids(&businesses, Some(cat_id(1)));
        assert_eq!(only_first, HashSet::from([sub_id(1), sub_id(2)]));

        let unknown = active_subcategory_ids(&businesses, Some(cat_id(9)));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_active_locations_follow_both_filters() {
        let businesses = vec![
            link(1, 1, 1),
            link(1, 2, 2),
            link(2, 3, 3),
            link(1, 1, 0),
            link(0, 0, 4),
        ];

        assert_eq!(
            active_location_ids(&businesses, None, None),
            HashSet::from([loc_id(1), loc_id(2), loc_id(3), loc_id(4)])
        );
        assert_eq!(
            active_location_ids(&businesses, Some(cat_id(1)), None),
            HashSet::from([loc_id(1), loc_id(2)])
        );
        assert_eq!(
            active_location_ids(&businesses, Some(cat_id(1)), Some(sub_id(1))),
            HashSet::from([loc_id(1)])
        );
        // подкатегория без категории тоже фильтрует
        assert_eq!(
            active_location_ids(&businesses, None, Some(sub_id(3))),
            HashSet::from([loc_id(3)])
        );
    }

    #[test]
    fn test_empty_snapshot_has_empty_sets() {
        let businesses: Vec<TaxonomyLink> = Vec::new();
        let sets = ActiveSets::derive(&businesses, &Selection::default());
        assert_eq!(sets, ActiveSets::default());
    }
}
