use crate::domain::a001_category::aggregate::{Category, CategoryId};
use crate::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryId};
use crate::domain::a003_location::aggregate::{Location, LocationId};
use crate::domain::common::TaxonomyNode;
use std::collections::HashSet;

/// Узлы, которые не скрыты и входят в активное множество.
/// Порядок исходного среза сохраняется.
fn filter_visible<N: TaxonomyNode>(nodes: &[N], active: &HashSet<N::NodeId>) -> Vec<N> {
    nodes
        .iter()
        .filter(|n| !n.is_hidden() && active.contains(&n.node_id()))
        .cloned()
        .collect()
}

pub fn visible_categories(categories: &[Category], active: &HashSet<CategoryId>) -> Vec<Category> {
    filter_visible(categories, active)
}

/// Подкатегории выбранной категории. Без выбранной категории список пуст:
/// подкатегории не показываются без родителя. Скрытость самой категории
/// не проверяется - скрытую категорию нельзя выбрать.
pub fn visible_subcategories(
    subcategories: &[Subcategory],
    category_id: Option<CategoryId>,
    active: &HashSet<SubcategoryId>,
) -> Vec<Subcategory> {
    let Some(category_id) = category_id else {
        return Vec::new();
    };
    subcategories
        .iter()
        .filter(|s| s.category_id == category_id && !s.hidden && active.contains(&s.id))
        .cloned()
        .collect()
}

pub fn visible_locations(locations: &[Location], active: &HashSet<LocationId>) -> Vec<Location> {
    filter_visible(locations, active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::taxonomy_filter::fixtures::*;

    #[test]
    fn test_hidden_nodes_never_visible() {
        let categories = vec![category(1, "Comida", true), category(2, "Praias", false)];
        let active = HashSet::from([cat_id(1), cat_id(2)]);
        let visible = visible_categories(&categories, &active);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, cat_id(2));
    }

    #[test]
    fn test_source_order_preserved() {
        let locations = vec![
            location(3, "Moreré", false),
            location(1, "Velha Boipeba", false),
            location(2, "Cova da Onça", false),
        ];
        let active = HashSet::from([loc_id(1), loc_id(2), loc_id(3)]);
        let names: Vec<String> = visible_locations(&locations, &active)
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Moreré", "Velha Boipeba", "Cova da Onça"]);
    }

    #[test]
    fn test_subcategories_require_selected_parent() {
        let subcategories = vec![
            subcategory(1, 1, "Restaurantes", false),
            subcategory(2, 2, "Pousadas", false),
        ];
        let active = HashSet::from([sub_id(1), sub_id(2)]);

        assert!(visible_subcategories(&subcategories, None, &active).is_empty());

        let visible = visible_subcategories(&subcategories, Some(cat_id(1)), &active);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, sub_id(1));
    }

    #[test]
    fn test_inactive_nodes_filtered_out() {
        let categories = vec![category(1, "Comida", false), category(2, "Praias", false)];
        let visible = visible_categories(&categories, &HashSet::from([cat_id(2)]));
        assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![cat_id(2)]);
    }
}
