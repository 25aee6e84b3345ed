use super::active_set::{active_category_ids, active_location_ids, active_subcategory_ids};
use super::link::HasTaxonomyLink;
use super::selection::{RepairOutcome, Selection};
use super::visible::{visible_categories, visible_locations, visible_subcategories};
use crate::domain::a001_category::aggregate::{Category, CategoryId};
use crate::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryId};
use crate::domain::a003_location::aggregate::{Location, LocationId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Снимок данных, которыми владеет вызывающая сторона.
///
/// Списки таксономии ожидаются уже отсортированными (`sort_order`, затем название).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySnapshot<B> {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub locations: Vec<Location>,
    pub businesses: Vec<B>,
}

impl<B> Default for TaxonomySnapshot<B> {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            subcategories: Vec::new(),
            locations: Vec::new(),
            businesses: Vec::new(),
        }
    }
}

/// Результат пересчета: видимые списки и исправленный выбор
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxonomyView {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub locations: Vec<Location>,
    pub selection: Selection,
    pub outcome: RepairOutcome,
}

/// Пересчитать видимые списки и починить выбор.
///
/// Каждое заданное поле выбора после пересчета входит в соответствующий видимый
/// список; иначе поле (и его потомки) сбрасывается, сверху вниз. Функция
/// идемпотентна: повторный вызов с полученным выбором дает `Unchanged`.
pub fn recompute<B: HasTaxonomyLink>(
    snapshot: &TaxonomySnapshot<B>,
    selection: Selection,
) -> TaxonomyView {
    let businesses = snapshot.businesses.as_slice();
    let categories = visible_categories(&snapshot.categories, &active_category_ids(businesses));

    let mut selection = selection;
    let outcome = selection.repair_top_down(
        |c| categories.iter().any(|n| n.id == c),
        |c, s| {
            visible_subcategories(
                &snapshot.subcategories,
                c,
                &active_subcategory_ids(businesses, c),
            )
            .iter()
            .any(|n| n.id == s)
        },
        |c, s, l| {
            visible_locations(&snapshot.locations, &active_location_ids(businesses, c, s))
                .iter()
                .any(|n| n.id == l)
        },
    );

    let subcategories = visible_subcategories(
        &snapshot.subcategories,
        selection.category_id,
        &active_subcategory_ids(businesses, selection.category_id),
    );
    let locations = visible_locations(
        &snapshot.locations,
        &active_location_ids(businesses, selection.category_id, selection.subcategory_id),
    );

    TaxonomyView {
        categories,
        subcategories,
        locations,
        selection,
        outcome,
    }
}

/// ID, на которые ссылаются бизнесы, но которых нет среди узлов таксономии
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DanglingLinks {
    pub categories: Vec<CategoryId>,
    pub subcategories: Vec<SubcategoryId>,
    pub locations: Vec<LocationId>,
}

impl DanglingLinks {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.subcategories.is_empty() && self.locations.is_empty()
    }
}

/// Диагностика висячих ссылок. Фильтр их терпит: такие ID попадают в активные
/// множества, но не совпадают ни с одним узлом.
pub fn dangling_links<B: HasTaxonomyLink>(snapshot: &TaxonomySnapshot<B>) -> DanglingLinks {
    let known_categories: HashSet<CategoryId> = snapshot.categories.iter().map(|c| c.id).collect();
    let known_subcategories: HashSet<SubcategoryId> =
        snapshot.subcategories.iter().map(|s| s.id).collect();
    let known_locations: HashSet<LocationId> = snapshot.locations.iter().map(|l| l.id).collect();

    let mut categories = BTreeSet::new();
    let mut subcategories = BTreeSet::new();
    let mut locations = BTreeSet::new();

    for link in snapshot.businesses.iter().map(|b| b.taxonomy_link()) {
        if let Some(id) = link.category_id.filter(|id| !known_categories.contains(id)) {
            categories.insert(id);
        }
        if let Some(id) = link.subcategory_id.filter(|id| !known_subcategories.contains(id)) {
            subcategories.insert(id);
        }
        if let Some(id) = link.location_id.filter(|id| !known_locations.contains(id)) {
            locations.insert(id);
        }
    }

    DanglingLinks {
        categories: categories.into_iter().collect(),
        subcategories: subcategories.into_iter().collect(),
        locations: locations.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::taxonomy_filter::fixtures::*;
    use crate::shared::taxonomy_filter::TaxonomyLink;

    fn guide_snapshot() -> TaxonomySnapshot<TaxonomyLink> {
        TaxonomySnapshot {
            categories: vec![
                category(1, "Comida", false),
                category(2, "Hospedagem", false),
                category(3, "Passeios", true),
                category(4, "Serviços", false),
            ],
            subcategories: vec![
                subcategory(1, 1, "Restaurantes", false),
                subcategory(2, 1, "Bares", false),
                subcategory(3, 2, "Pousadas", false),
                subcategory(4, 2, "Campings", true),
                subcategory(5, 9, "Órfã", false),
                subcategory(6, 2, "Hostels", false),
            ],
            locations: vec![
                location(1, "Velha Boipeba", false),
                location(2, "Moreré", false),
                location(3, "Cova da Onça", false),
                location(4, "São Sebastião", true),
            ],
            businesses: vec![
                link(1, 1, 1),
                link(1, 2, 2),
                link(1, 1, 4),
                link(2, 3, 2),
                link(2, 4, 3),
                link(3, 0, 3),
                link(9, 5, 1),
                link(0, 0, 3),
                // подкатегория 6 принадлежит категории 2, а бизнес отнесен к категории 1
                link(1, 6, 1),
            ],
        }
    }

    fn all_selections() -> Vec<Selection> {
        let categories = [None, Some(cat_id(1)), Some(cat_id(2)), Some(cat_id(3)), Some(cat_id(9))];
        let subcategories = [
            None,
            Some(sub_id(1)),
            Some(sub_id(3)),
            Some(sub_id(4)),
            Some(sub_id(5)),
            Some(sub_id(6)),
        ];
        let locations = [None, Some(loc_id(1)), Some(loc_id(2)), Some(loc_id(3)), Some(loc_id(4))];
        let mut out = Vec::new();
        for c in categories {
            for s in subcategories {
                for l in locations {
                    out.push(Selection {
                        category_id: c,
                        subcategory_id: c.and(s),
                        location_id: l,
                    });
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------------
    // Сценарии
    // ------------------------------------------------------------------------

    #[test]
    fn test_single_active_category_is_visible() {
        let snapshot = TaxonomySnapshot {
            categories: vec![category(1, "Comida", false)],
            businesses: vec![link(1, 0, 0)],
            ..Default::default()
        };
        let view = recompute(&snapshot, Selection::default());
        assert_eq!(view.categories.iter().map(|c| c.id).collect::<Vec<_>>(), vec![cat_id(1)]);
    }

    #[test]
    fn test_business_with_unknown_category_yields_nothing() {
        let snapshot = TaxonomySnapshot {
            categories: vec![category(1, "Comida", false)],
            businesses: vec![link(2, 0, 0)],
            ..Default::default()
        };
        let view = recompute(&snapshot, Selection::default());
        assert!(view.categories.is_empty());
        assert_eq!(dangling_links(&snapshot).categories, vec![cat_id(2)]);
    }

    #[test]
    fn test_hidden_active_category_not_visible() {
        let snapshot = TaxonomySnapshot {
            categories: vec![category(1, "Comida", true)],
            businesses: vec![link(1, 0, 0)],
            ..Default::default()
        };
        let view = recompute(&snapshot, Selection::default());
        assert!(view.categories.is_empty());
    }

    #[test]
    fn test_refresh_without_category_clears_whole_selection() {
        let mut snapshot = TaxonomySnapshot {
            categories: vec![category(1, "Comida", false), category(2, "Praias", false)],
            subcategories: vec![subcategory(1, 1, "Restaurantes", false)],
            locations: vec![location(1, "Moreré", false)],
            businesses: vec![link(1, 1, 1)],
        };
        let mut selection = Selection::default();
        selection.select_category(cat_id(1));
        selection.select_subcategory(sub_id(1));
        selection.select_location(loc_id(1));
        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::Unchanged);

        snapshot.businesses = vec![link(2, 0, 1)];
        let view = recompute(&snapshot, view.selection);
        assert_eq!(view.outcome, RepairOutcome::CategoryCleared);
        assert_eq!(view.selection, Selection::default());
    }

    #[test]
    fn test_switching_category_clears_descendants_immediately() {
        let snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_category(cat_id(1));
        selection.select_subcategory(sub_id(1));
        selection.select_location(loc_id(1));

        selection.select_category(cat_id(2));
        assert_eq!(selection.category_id, Some(cat_id(2)));
        assert_eq!(selection.subcategory_id, None);
        assert_eq!(selection.location_id, None);

        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::Unchanged);
        assert_eq!(view.subcategories.iter().map(|s| s.id).collect::<Vec<_>>(), vec![sub_id(3)]);
    }

    // ------------------------------------------------------------------------
    // Свойства
    // ------------------------------------------------------------------------

    #[test]
    fn test_subcategories_always_children_of_selected_category() {
        let snapshot = guide_snapshot();
        for selection in all_selections() {
            let view = recompute(&snapshot, selection);
            for s in &view.subcategories {
                assert_eq!(Some(s.category_id), view.selection.category_id);
            }
        }
    }

    #[test]
    fn test_narrowing_never_adds_locations() {
        let snapshot = guide_snapshot();
        let unfiltered = recompute(&snapshot, Selection::default()).locations.len();
        for selection in all_selections() {
            let view = recompute(&snapshot, selection);
            assert!(view.locations.len() <= unfiltered);
        }
    }

    #[test]
    fn test_hidden_and_orphan_nodes_never_visible() {
        let snapshot = guide_snapshot();
        for selection in all_selections() {
            let view = recompute(&snapshot, selection);
            assert!(view.categories.iter().all(|c| !c.hidden));
            assert!(view.subcategories.iter().all(|s| !s.hidden));
            assert!(view.locations.iter().all(|l| !l.hidden));
            assert!(view.subcategories.iter().all(|s| s.id != sub_id(5)));
        }
    }

    #[test]
    fn test_selection_always_member_of_visible_lists() {
        let snapshot = guide_snapshot();
        for selection in all_selections() {
            let view = recompute(&snapshot, selection);
            if let Some(c) = view.selection.category_id {
                assert!(view.categories.iter().any(|n| n.id == c), "{selection:?}");
            }
            if let Some(s) = view.selection.subcategory_id {
                assert!(view.subcategories.iter().any(|n| n.id == s), "{selection:?}");
            }
            if let Some(l) = view.selection.location_id {
                assert!(view.locations.iter().any(|n| n.id == l), "{selection:?}");
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let snapshot = guide_snapshot();
        for selection in all_selections() {
            let first = recompute(&snapshot, selection);
            let second = recompute(&snapshot, first.selection);
            assert_eq!(second.outcome, RepairOutcome::Unchanged);
            assert_eq!(second.selection, first.selection);
            assert_eq!(second.categories, first.categories);
            assert_eq!(second.subcategories, first.subcategories);
            assert_eq!(second.locations, first.locations);
        }
    }

    // ------------------------------------------------------------------------
    // Частные случаи
    // ------------------------------------------------------------------------

    #[test]
    fn test_selected_hidden_category_is_treated_as_stale() {
        let snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_category(cat_id(3));
        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::CategoryCleared);
        assert!(view.selection.is_empty());
    }

    #[test]
    fn test_selected_hidden_subcategory_is_treated_as_stale() {
        let snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_category(cat_id(2));
        selection.select_subcategory(sub_id(4));
        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::SubcategoryCleared);
        assert_eq!(view.selection.category_id, Some(cat_id(2)));
        assert_eq!(view.selection.subcategory_id, None);
    }

    #[test]
    fn test_location_list_reflects_repaired_selection() {
        let snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_category(cat_id(2));
        selection.select_subcategory(sub_id(4));
        let view = recompute(&snapshot, selection);
        // после сброса подкатегории локации считаются по всей категории 2
        let ids: Vec<_> = view.locations.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![loc_id(2), loc_id(3)]);
    }

    #[test]
    fn test_location_without_category_filters_nothing_above() {
        let snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_location(loc_id(3));
        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::Unchanged);
        assert!(view.subcategories.is_empty());
        assert_eq!(view.categories.len(), 2);
    }

    #[test]
    fn test_removed_parent_category_clears_from_the_top() {
        let mut snapshot = guide_snapshot();
        let mut selection = Selection::default();
        selection.select_category(cat_id(1));
        selection.select_subcategory(sub_id(1));
        selection.select_location(loc_id(1));
        assert_eq!(recompute(&snapshot, selection).outcome, RepairOutcome::Unchanged);

        // категория удалена, а бизнесы и подкатегория 1 остались
        snapshot.categories.retain(|c| c.id != cat_id(1));
        assert!(active_subcategory_ids(&snapshot.businesses, Some(cat_id(1))).contains(&sub_id(1)));

        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::CategoryCleared);
        assert!(view.selection.is_empty());
        assert!(view.subcategories.is_empty());
    }

    #[test]
    fn test_subcategory_linked_under_foreign_category_never_visible() {
        let snapshot = guide_snapshot();
        for category in [None, Some(cat_id(1)), Some(cat_id(2))] {
            let selection = Selection {
                category_id: category,
                ..Default::default()
            };
            let view = recompute(&snapshot, selection);
            assert!(
                view.subcategories.iter().all(|s| s.id != sub_id(6)),
                "{category:?}"
            );
        }

        let mut selection = Selection::default();
        selection.select_category(cat_id(1));
        selection.select_subcategory(sub_id(6));
        let view = recompute(&snapshot, selection);
        assert_eq!(view.outcome, RepairOutcome::SubcategoryCleared);
        assert_eq!(view.selection.category_id, Some(cat_id(1)));
    }

    #[test]
    fn test_dangling_links_report() {
        let report = dangling_links(&guide_snapshot());
        assert_eq!(report.categories, vec![cat_id(9)]);
        assert!(report.subcategories.is_empty());
        assert!(report.locations.is_empty());
        assert!(!report.is_empty());
    }
}
